//! # Component Macros
//!
//! 这个 crate 提供了把类型注册为可发现类型的过程宏。
//!
//! ## 核心宏
//!
//! - [`discoverable`] - 生成类型描述符、`Component` 实现并注册到全局类型目录
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use autoconfig_common::{BeanConverter, ConversionError, MappedValue, TypeInfo};
//! use component_macros::discoverable;
//!
//! #[derive(Debug, Default)]
//! #[discoverable(converter, namespace = "app.convert")]
//! pub struct MoneyConverter;
//!
//! impl BeanConverter for MoneyConverter {
//!     // ...
//! }
//! ```
//!
//! 使用宏的 crate 需要依赖 `autoconfig-common` 和 `ctor`。

use proc_macro::TokenStream;

mod discoverable;

// Re-exports are not allowed in proc-macro crates

/// 可发现类型宏
///
/// 为结构体生成 `type_descriptor()`、`Component` 实现，并在程序启动时注册到全局类型目录。
/// 命名字段按声明顺序成为类型的属性。
///
/// # 参数
///
/// - `converter` / `collection_handler` / `secured_check` - 实现的契约
/// - `entry_point` - 应用入口，决定默认扫描范围
/// - `no_arg` - 通过 `Default` 构造；声明了契约且未指定构造方式时默认使用
/// - `with_context` - 通过 `FromContext` 构造
/// - `abstract_type` - 抽象类型，不参与实例化
/// - `namespace = "a.b"` - 命名空间，缺省时取模块路径
/// - `name = "Name"` - 简单名，缺省时取结构体名
/// - `map_to = "a.Target"` / `map_from = "a.Source"` - 严格映射声明
/// - `extends = "a.Base"` - 直接超类型，可重复
/// - `requires = "a.Dependency"` - 能力检测时需要一并解析的类型，可重复
///
/// # 示例
///
/// ```rust,ignore
/// #[discoverable(map_to = "app.model.Person")]
/// pub struct PersonForm {
///     name: String,
///     email: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn discoverable(args: TokenStream, input: TokenStream) -> TokenStream {
    discoverable::discoverable_impl(args, input)
}
