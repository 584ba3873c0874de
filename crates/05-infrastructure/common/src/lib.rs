//! # Autoconfig Common
//!
//! 映射自动配置的公共类型：类型描述符、类型目录、扫描范围、能力谓词和诊断。
//!
//! ## 核心组件
//!
//! - [`TypeDescriptor`] - 可发现类型的元数据
//! - [`TypeCatalog`] - 进程内类型目录，按注册顺序保存描述符
//! - [`CapabilityPredicate`] - 扫描使用的封闭谓词集合
//! - [`Scope`] - 按段边界匹配的命名空间前缀
//! - [`DiagnosticsSink`] - 非致命问题的接收器
//! - [`Component`] - 类型擦除后的实例，可转换为具体契约
//!
//! ## 设计原则
//!
//! - 元数据在编译期生成，运行时不做反射
//! - 致命错误与可诊断的跳过严格区分
//! - 诊断随调用链显式传递

pub mod capabilities;
pub mod component;
pub mod context;
pub mod contracts;
pub mod descriptor;
pub mod diagnostics;
pub mod discovery;
pub mod errors;
pub mod metadata;
pub mod predicate;
pub mod scope;

pub use capabilities::*;
pub use component::*;
pub use context::*;
pub use contracts::*;
pub use descriptor::*;
pub use diagnostics::*;
pub use discovery::*;
pub use errors::*;
pub use metadata::*;
pub use predicate::*;
pub use scope::*;
