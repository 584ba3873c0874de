//! 测试用组件

use autoconfig_common::{
    ApplicationContext, BeanConverter, Component, ConstructionError, Contract, ConversionError,
    FromContext, MappedValue, TypeDescriptor, TypeInfo,
};
use std::any::Any;
use std::sync::Arc;

/// 只有无参构造的转换器
#[derive(Debug, Default)]
pub struct NoArgConverter;

impl NoArgConverter {
    pub fn descriptor(namespace: &str) -> TypeDescriptor {
        TypeDescriptor::in_namespace(namespace, "NoArgConverter")
            .implementing(Contract::bean_converter())
            .with_default_constructor::<Self>()
    }
}

impl Component for NoArgConverter {
    fn name(&self) -> &'static str {
        "NoArgConverter"
    }

    fn as_bean_converter(self: Arc<Self>) -> Option<Arc<dyn BeanConverter>> {
        Some(self)
    }
}

impl BeanConverter for NoArgConverter {
    fn matches(&self, source: &TypeInfo, target: &TypeInfo) -> bool {
        source.is::<i64>() && target.is::<String>()
    }

    fn convert(
        &self,
        value: &(dyn Any + Send + Sync),
        _target: &TypeInfo,
    ) -> Result<MappedValue, ConversionError> {
        let number = value.downcast_ref::<i64>().ok_or(ConversionError::UnsupportedValue {
            expected: "i64".to_string(),
        })?;
        Ok(Arc::new(number.to_string()))
    }
}

/// 只有上下文构造的转换器
#[derive(Debug)]
pub struct ContextOnlyConverter {
    currency: String,
}

impl ContextOnlyConverter {
    pub fn descriptor(namespace: &str) -> TypeDescriptor {
        TypeDescriptor::in_namespace(namespace, "ContextOnlyConverter")
            .implementing(Contract::bean_converter())
            .with_from_context::<Self>()
    }
}

impl FromContext for ContextOnlyConverter {
    fn from_context(context: &ApplicationContext) -> Result<Self, ConstructionError> {
        Ok(Self {
            currency: context.property("currency").unwrap_or("USD").to_string(),
        })
    }
}

impl Component for ContextOnlyConverter {
    fn name(&self) -> &'static str {
        "ContextOnlyConverter"
    }

    fn as_bean_converter(self: Arc<Self>) -> Option<Arc<dyn BeanConverter>> {
        Some(self)
    }
}

impl BeanConverter for ContextOnlyConverter {
    fn matches(&self, source: &TypeInfo, target: &TypeInfo) -> bool {
        source.is::<f64>() && target.is::<String>()
    }

    fn convert(
        &self,
        value: &(dyn Any + Send + Sync),
        _target: &TypeInfo,
    ) -> Result<MappedValue, ConversionError> {
        let amount = value.downcast_ref::<f64>().ok_or(ConversionError::UnsupportedValue {
            expected: "f64".to_string(),
        })?;
        Ok(Arc::new(format!("{amount:.2} {}", self.currency)))
    }
}
