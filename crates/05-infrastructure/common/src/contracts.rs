//! 映射引擎扩展点契约
//!
//! 扫描器按这些契约发现候选类型，装配器把实例化结果折叠进映射配置。

use crate::{ConversionError, TypeInfo};
use std::any::Any;
use std::sync::Arc;

/// 被转换的值
pub type MappedValue = Arc<dyn Any + Send + Sync>;

/// 值转换器
pub trait BeanConverter: Send + Sync {
    /// 是否能把 `source` 类型的值转换为 `target` 类型
    fn matches(&self, source: &TypeInfo, target: &TypeInfo) -> bool;

    /// 执行转换
    fn convert(
        &self,
        value: &(dyn Any + Send + Sync),
        target: &TypeInfo,
    ) -> Result<MappedValue, ConversionError>;
}

/// 集合处理器
pub trait CollectionHandler: Send + Sync {
    /// 处理的集合类型名称
    fn handled_type(&self) -> &str;

    /// 创建一个空集合
    fn create_empty(&self) -> MappedValue;
}

/// 逻辑安全检查
///
/// 映射引擎在复制受保护属性前调用，返回 `false` 时跳过该属性。
pub trait LogicSecuredCheck: Send + Sync {
    /// 是否允许从 `source` 映射到 `target`
    fn is_allowed(&self, source: &(dyn Any + Send + Sync), target: &(dyn Any + Send + Sync))
        -> bool;
}
