//! 宏注册与全局类型目录的端到端测试

#![allow(dead_code)]

use autoconfig_common::{
    global_type_catalog, ApplicationContext, BeanConverter, CollectionHandler, ConstructionError,
    ConversionError, FromContext, LogicSecuredCheck, MappedValue, Marker, TypeInfo,
    SECURITY_MARKER,
};
use autoconfig_composition::{
    AutoconfigProperties, MapperAutoConfig, SecuredPropertyHandler, StrictSide, UnproxyStrategy,
};
use autoconfig_integration_tests::init_test_logger;
use component_macros::discoverable;
use discovery_impl::CatalogCapabilityDetector;
use std::any::Any;
use std::io::Write;
use std::sync::Arc;

#[discoverable(entry_point, namespace = "it.shop")]
pub struct ShopApplication;

/// 宿主链接安全适配层时注册的标记类型
#[discoverable(abstract_type, namespace = "security", name = "AuthenticationManager")]
pub struct AuthenticationManagerMarker;

#[derive(Debug, Default)]
#[discoverable(converter, namespace = "it.shop.convert")]
pub struct CentsConverter;

impl BeanConverter for CentsConverter {
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

#[derive(Debug)]
#[discoverable(converter, with_context, namespace = "it.shop.convert")]
pub struct PrefixConverter {
    prefix: String,
}

impl FromContext for PrefixConverter {
    fn from_context(context: &ApplicationContext) -> Result<Self, ConstructionError> {
        Ok(Self {
            prefix: context.property("prefix").unwrap_or("#").to_string(),
        })
    }
}

impl BeanConverter for PrefixConverter {
    fn matches(&self, source: &TypeInfo, target: &TypeInfo) -> bool {
        source.is::<u32>() && target.is::<String>()
    }

    fn convert(
        &self,
        value: &(dyn Any + Send + Sync),
        _target: &TypeInfo,
    ) -> Result<MappedValue, ConversionError> {
        let number = value.downcast_ref::<u32>().ok_or(ConversionError::UnsupportedValue {
            expected: "u32".to_string(),
        })?;
        Ok(Arc::new(format!("{}{}", self.prefix, number)))
    }
}

#[derive(Debug, Default)]
#[discoverable(collection_handler, namespace = "it.shop.collections")]
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
#[discoverable(secured_check, namespace = "it.shop.security")]
pub struct AdminOnly;

impl LogicSecuredCheck for AdminOnly {
    fn is_allowed(
        &self,
        source: &(dyn Any + Send + Sync),
        _target: &(dyn Any + Send + Sync),
    ) -> bool {
        source.downcast_ref::<&str>().is_some_and(|role| *role == "admin")
    }
}

#[discoverable(namespace = "it.shop.model")]
pub struct Order {
    id: i64,
    total: i64,
    customer: String,
}

#[discoverable(namespace = "it.shop.web", map_to = "it.shop.model.Order")]
pub struct OrderForm {
    total: i64,
    customer: String,
}

#[discoverable(namespace = "it.shop.web", map_from = "it.shop.model.Order")]
pub struct OrderResult {
    id: i64,
    total: i64,
}

#[derive(Debug, Default)]
#[discoverable(converter)]
pub struct ModulePathConverter;

impl BeanConverter for ModulePathConverter {
    fn matches(&self, _source: &TypeInfo, _target: &TypeInfo) -> bool {
        false
    }

    fn convert(
        &self,
        _value: &(dyn Any + Send + Sync),
        _target: &TypeInfo,
    ) -> Result<MappedValue, ConversionError> {
        Err(ConversionError::UnsupportedValue {
            expected: "nothing".to_string(),
        })
    }
}

fn shop_context() -> ApplicationContext {
    ApplicationContext::new("shop").with_property("prefix", "No.")
}

#[test]
fn test_macro_registers_descriptors_globally() {
    init_test_logger();
    let catalog = global_type_catalog();

    for name in [
        "it.shop.ShopApplication",
        "it.shop.convert.CentsConverter",
        "it.shop.convert.PrefixConverter",
        "it.shop.collections.TagListHandler",
        "it.shop.security.AdminOnly",
        "it.shop.model.Order",
        "it.shop.web.OrderForm",
        "it.shop.web.OrderResult",
        SECURITY_MARKER,
    ] {
        assert!(catalog.contains(name), "类型 {name} 应该已注册");
    }
}

#[test]
fn test_generated_descriptor() {
    let form = OrderForm::type_descriptor();
    assert_eq!(form.qualified_name(), "it.shop.web.OrderForm");
    assert_eq!(form.properties(), ["total".to_string(), "customer".to_string()]);
    assert!(form.has_marker(Marker::BEAN_MAP_TO));
    assert!(form.no_arg_constructor().is_none());

    let converter = PrefixConverter::type_descriptor();
    assert!(converter.context_constructor().is_some());
    assert!(converter.no_arg_constructor().is_none());

    let marker = AuthenticationManagerMarker::type_descriptor();
    assert!(marker.is_abstract());
    assert_eq!(marker.qualified_name(), SECURITY_MARKER);
}

#[test]
fn test_namespace_defaults_to_module_path() {
    let descriptor = ModulePathConverter::type_descriptor();
    assert_eq!(descriptor.namespace(), module_path!().replace("::", "."));
    assert_eq!(descriptor.simple_name(), "ModulePathConverter");
}

#[test]
fn test_assemble_from_global_catalog() {
    init_test_logger();
    let configuration = MapperAutoConfig::from_global(AutoconfigProperties::default())
        .with_context(shop_context())
        .build()
        .assemble()
        .expect("装配应该成功");

    assert_eq!(configuration.record().scope.as_str(), "it.shop");

    let converters = configuration.converter_names();
    assert_eq!(converters.len(), 2);
    assert!(converters.contains("it.shop.convert.CentsConverter"));
    assert!(converters.contains("it.shop.convert.PrefixConverter"));
    assert!(!converters.iter().any(|name| name.ends_with("ModulePathConverter")));

    assert!(configuration
        .collection_handler_names()
        .contains("it.shop.collections.TagListHandler"));

    let pairs = configuration.strict_pairs();
    assert_eq!(pairs.involving("it.shop.model.Order").len(), 2);
    assert_eq!(
        pairs
            .get("it.shop.web.OrderForm", "it.shop.model.Order")
            .map(|pair| pair.strict),
        Some(StrictSide::Source)
    );

    assert_eq!(
        configuration.secured_property_handler(),
        SecuredPropertyHandler::RoleBased
    );
    assert!(configuration
        .logic_secured_check_names()
        .contains("it.shop.security.AdminOnly"));

    // 没有链接持久化和 ORM 适配层
    assert!(!configuration.record().capabilities.persistence);
    assert_eq!(configuration.unproxy(), UnproxyStrategy::Default);
}

#[test]
fn test_assembled_converters_convert() {
    init_test_logger();
    let configuration = MapperAutoConfig::from_global(AutoconfigProperties::default())
        .with_context(shop_context())
        .build()
        .assemble()
        .expect("装配应该成功");

    let source = TypeInfo::of::<u32>();
    let target = TypeInfo::of::<String>();
    let converter = configuration
        .converters()
        .iter()
        .find(|registered| registered.instance.matches(&source, &target))
        .expect("应该有 u32 到 String 的转换器");

    let converted = converter
        .instance
        .convert(&42_u32, &target)
        .expect("转换应该成功");
    assert_eq!(
        converted.downcast_ref::<String>().map(String::as_str),
        Some("No.42")
    );
}

#[test]
fn test_properties_file_and_hidden_security() {
    init_test_logger();
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("创建临时文件应该成功");
    writeln!(
        file,
        r#"
package_prefix = "it.shop"
diagnostics_level = "full"

[features]
collection_handlers = false
"#
    )
    .expect("写入临时文件应该成功");

    let properties = AutoconfigProperties::load_with_prefix(Some(file.path()), "MAPPER_IT_FILE")
        .expect("加载属性应该成功");

    let configuration = MapperAutoConfig::from_global(properties)
        .with_context(shop_context())
        .with_detector(
            CatalogCapabilityDetector::new(global_type_catalog()).hiding([SECURITY_MARKER]),
        )
        .build()
        .assemble()
        .expect("装配应该成功");

    assert!(configuration.collection_handler_names().is_empty());
    assert!(configuration.logic_secured_checks().is_empty());
    assert_eq!(
        configuration.secured_property_handler(),
        SecuredPropertyHandler::None
    );
    assert!(configuration.diagnostics_level().is_enabled());
}
