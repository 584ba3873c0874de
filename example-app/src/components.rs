//! 演示用的可发现类型

#![allow(dead_code)]

use autoconfig_common::{
    BeanConverter, CollectionHandler, ConversionError, LogicSecuredCheck, MappedValue, TypeInfo,
};
use autoconfig_composition::EntityManager;
use component_macros::discoverable;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

/// 应用入口，决定默认扫描范围 `demo.shop`
#[discoverable(entry_point, namespace = "demo.shop")]
pub struct ShopApplication;

/// 持久化适配层的标记类型
#[discoverable(abstract_type, namespace = "persistence", name = "EntityManager")]
pub struct EntityManagerMarker;

/// 安全适配层的标记类型
#[discoverable(abstract_type, namespace = "security", name = "AuthenticationManager")]
pub struct AuthenticationManagerMarker;

#[derive(Debug, Default)]
#[discoverable(converter, namespace = "demo.shop.convert")]
pub struct CentsToPriceConverter;

impl BeanConverter for CentsToPriceConverter {
    fn matches(&self, source: &TypeInfo, target: &TypeInfo) -> bool {
        source.is::<i64>() && target.is::<String>()
    }

    fn convert(
        &self,
        value: &(dyn Any + Send + Sync),
        _target: &TypeInfo,
    ) -> Result<MappedValue, ConversionError> {
        let cents = value.downcast_ref::<i64>().ok_or(ConversionError::UnsupportedValue {
            expected: "i64".to_string(),
        })?;
        Ok(Arc::new(format!("{}.{:02}", cents / 100, cents % 100)))
    }
}

#[derive(Debug, Default)]
#[discoverable(collection_handler, namespace = "demo.shop.collections")]
pub struct TagListHandler;

impl CollectionHandler for TagListHandler {
    fn handled_type(&self) -> &str {
        "Vec<String>"
    }

    fn create_empty(&self) -> MappedValue {
        Arc::new(Vec::<String>::new())
    }
}

#[derive(Debug, Default)]
#[discoverable(secured_check, namespace = "demo.shop.security")]
pub struct OwnerCheck;

impl LogicSecuredCheck for OwnerCheck {
    fn is_allowed(
        &self,
        source: &(dyn Any + Send + Sync),
        target: &(dyn Any + Send + Sync),
    ) -> bool {
        match (source.downcast_ref::<String>(), target.downcast_ref::<String>()) {
            (Some(user), Some(owner)) => user == owner,
            _ => false,
        }
    }
}

#[discoverable(namespace = "demo.shop.model")]
pub struct Product {
    id: i64,
    name: String,
    price: i64,
}

#[discoverable(namespace = "demo.shop.web", map_to = "demo.shop.model.Product")]
pub struct ProductForm {
    name: String,
    price: i64,
}

#[discoverable(namespace = "demo.shop.web", map_from = "demo.shop.model.Product")]
pub struct ProductResult {
    id: i64,
    name: String,
}

/// 内存实体管理器
#[derive(Debug, Default)]
pub struct InMemoryEntityManager {
    products: HashMap<String, String>,
    flushes: AtomicUsize,
}

impl InMemoryEntityManager {
    /// 添加商品
    pub fn with_product(mut self, id: i64, name: &str) -> Self {
        self.products.insert(id.to_string(), name.to_string());
        self
    }
}

impl EntityManager for InMemoryEntityManager {
    fn manages(&self, entity_type: &TypeInfo) -> bool {
        entity_type.is::<Product>()
    }

    fn find(&self, entity_type: &TypeInfo, id: &str) -> Option<MappedValue> {
        if !self.manages(entity_type) {
            return None;
        }
        self.products
            .get(id)
            .map(|name| Arc::new(name.clone()) as MappedValue)
    }

    fn flush(&self) {
        let count = self.flushes.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("实体管理器刷新，第 {} 次", count);
    }
}
