//! 应用上下文
//!
//! 装配过程可见的宿主环境句柄：按类型注册的 bean、按名称注册的组件 bean 和简单属性。
//! 上下文在构建完成后只读，可以在多个装配过程之间共享。

use crate::Instance;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 应用上下文
#[derive(Default)]
pub struct ApplicationContext {
    /// 上下文名称
    name: String,
    /// 是否为 Web 应用
    web_application: bool,
    /// 按类型注册的 bean
    beans: HashMap<TypeId, (&'static str, Arc<dyn Any + Send + Sync>)>,
    /// 按限定名注册的组件 bean
    components: HashMap<String, Instance>,
    /// 环境属性
    properties: HashMap<String, String>,
}

impl ApplicationContext {
    /// 创建新的应用上下文
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 标记为 Web 应用
    pub fn web_application(mut self, enabled: bool) -> Self {
        self.web_application = enabled;
        self
    }

    /// 注册按类型查找的 bean，`T` 可以是 trait object
    pub fn with_bean<T>(mut self, bean: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let erased: Arc<dyn Any + Send + Sync> = Arc::new(bean);
        self.beans
            .insert(TypeId::of::<T>(), (std::any::type_name::<T>(), erased));
        self
    }

    /// 注册按限定名查找的组件 bean
    pub fn with_component(mut self, qualified_name: impl Into<String>, instance: Instance) -> Self {
        self.components.insert(qualified_name.into(), instance);
        self
    }

    /// 设置环境属性
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// 上下文名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 是否为 Web 应用
    pub fn is_web_application(&self) -> bool {
        self.web_application
    }

    /// 按类型获取 bean
    pub fn get_bean<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.beans
            .get(&TypeId::of::<T>())
            .and_then(|(_, bean)| bean.downcast_ref::<Arc<T>>())
            .cloned()
    }

    /// 按类型检查 bean 是否存在
    pub fn contains_bean<T>(&self) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.beans.contains_key(&TypeId::of::<T>())
    }

    /// 按限定名获取组件 bean
    pub fn get_component(&self, qualified_name: &str) -> Option<Instance> {
        self.components.get(qualified_name).cloned()
    }

    /// 获取环境属性
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

impl fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut beans: Vec<&str> = self.beans.values().map(|(name, _)| *name).collect();
        beans.sort_unstable();
        let mut components: Vec<&str> = self.components.keys().map(String::as_str).collect();
        components.sort_unstable();

        f.debug_struct("ApplicationContext")
            .field("name", &self.name)
            .field("web_application", &self.web_application)
            .field("beans", &beans)
            .field("components", &components)
            .field("properties", &self.properties)
            .finish()
    }
}
