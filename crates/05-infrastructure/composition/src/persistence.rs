//! 持久化集成
//!
//! 持久化适配层通过上下文中的 [`EntityManager`] bean 接入，这里不直接依赖任何 ORM。

use autoconfig_common::{
    ApplicationContext, BeanConverter, ConversionError, MappedValue, TypeInfo,
};
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

/// 实体管理器
pub trait EntityManager: Send + Sync {
    /// 是否为受管理的实体类型
    fn manages(&self, entity_type: &TypeInfo) -> bool;

    /// 按 ID 查找实体
    fn find(&self, entity_type: &TypeInfo, id: &str) -> Option<MappedValue>;

    /// 将挂起的变更刷新到存储
    fn flush(&self);
}

/// 把 ID 转换为受管理实体的转换器
///
/// 实体管理器在转换时才从上下文中查找，构造时不要求它已存在。
pub struct IdToEntityConverter {
    context: Arc<ApplicationContext>,
}

impl IdToEntityConverter {
    /// 在映射配置中登记的名称
    pub const NAME: &'static str = "persistence.IdToEntityConverter";

    /// 创建转换器
    pub fn new(context: Arc<ApplicationContext>) -> Self {
        Self { context }
    }

    fn entity_manager(&self) -> Result<Arc<dyn EntityManager>, ConversionError> {
        self.context
            .get_bean::<dyn EntityManager>()
            .ok_or_else(|| ConversionError::MissingBean {
                bean: "EntityManager".to_string(),
            })
    }
}

impl BeanConverter for IdToEntityConverter {
    fn matches(&self, source: &TypeInfo, target: &TypeInfo) -> bool {
        if !is_id_type(source) {
            return false;
        }
        self.entity_manager()
            .map(|manager| manager.manages(target) && !manager.manages(source))
            .unwrap_or(false)
    }

    fn convert(
        &self,
        value: &(dyn Any + Send + Sync),
        target: &TypeInfo,
    ) -> Result<MappedValue, ConversionError> {
        let id = id_to_string(value).ok_or_else(|| ConversionError::UnsupportedValue {
            expected: "整数或字符串 ID".to_string(),
        })?;
        debug!("按 ID 加载实体: {}#{}", target.name, id);

        self.entity_manager()?
            .find(target, &id)
            .ok_or_else(|| ConversionError::EntityNotFound {
                entity: target.name.clone(),
                id,
            })
    }
}

fn is_id_type(info: &TypeInfo) -> bool {
    info.is::<i64>()
        || info.is::<i32>()
        || info.is::<u64>()
        || info.is::<u32>()
        || info.is::<String>()
}

fn id_to_string(value: &(dyn Any + Send + Sync)) -> Option<String> {
    if let Some(id) = value.downcast_ref::<i64>() {
        return Some(id.to_string());
    }
    if let Some(id) = value.downcast_ref::<i32>() {
        return Some(id.to_string());
    }
    if let Some(id) = value.downcast_ref::<u64>() {
        return Some(id.to_string());
    }
    if let Some(id) = value.downcast_ref::<u32>() {
        return Some(id.to_string());
    }
    value.downcast_ref::<String>().cloned()
}

/// 清理后刷新钩子
///
/// 映射引擎清理集合后调用，保证孤儿记录在后续查询前被删除。
pub trait AfterClearFlusher: Send + Sync {
    /// 钩子名称
    fn name(&self) -> &str;

    /// 执行刷新
    fn flush(&self);
}

/// 通过实体管理器刷新的钩子
pub struct PersistenceAfterClearFlusher {
    entity_manager: Arc<dyn EntityManager>,
}

impl PersistenceAfterClearFlusher {
    /// 创建钩子
    pub fn new(entity_manager: Arc<dyn EntityManager>) -> Self {
        Self { entity_manager }
    }
}

impl AfterClearFlusher for PersistenceAfterClearFlusher {
    fn name(&self) -> &str {
        "persistence.AfterClearFlusher"
    }

    fn flush(&self) {
        debug!("集合清理后刷新实体管理器");
        self.entity_manager.flush();
    }
}
