//! 组件基础 trait 定义

use crate::{ApplicationContext, BeanConverter, CollectionHandler, ConstructionError, LogicSecuredCheck};
use std::sync::Arc;

/// 实例化后的组件
pub type Instance = Arc<dyn Component>;

/// 组件基础 trait
///
/// 所有可被发现的类型都实现此 trait。装配器拿到的是类型擦除后的实例，
/// 通过 `as_*` 方法转换成具体的契约对象；不满足契约时返回 `None`。
pub trait Component: Send + Sync + 'static {
    /// 获取组件名称
    fn name(&self) -> &'static str;

    /// 转换为值转换器
    fn as_bean_converter(self: Arc<Self>) -> Option<Arc<dyn BeanConverter>> {
        None
    }

    /// 转换为集合处理器
    fn as_collection_handler(self: Arc<Self>) -> Option<Arc<dyn CollectionHandler>> {
        None
    }

    /// 转换为逻辑安全检查
    fn as_logic_secured_check(self: Arc<Self>) -> Option<Arc<dyn LogicSecuredCheck>> {
        None
    }
}

/// 由应用上下文构造
///
/// 对应"上下文构造函数"，无参构造不可用时由实例化器回退调用。
pub trait FromContext: Sized {
    /// 使用应用上下文创建实例
    fn from_context(context: &ApplicationContext) -> Result<Self, ConstructionError>;
}
