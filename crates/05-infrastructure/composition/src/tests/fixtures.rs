//! 装配测试用的组件和类型目录

use autoconfig_common::{
    ApplicationContext, BeanConverter, CollectionHandler, Component, ConstructionError, Contract,
    ConversionError, FromContext, LogicSecuredCheck, MappedValue, Marker, TypeCatalog,
    TypeDescriptor, TypeInfo, ORM_PROXY_MARKER, PERSISTENCE_MARKER, REPOSITORY_WEB_MARKER,
    SECURITY_MARKER,
};
use std::any::Any;
use std::sync::Arc;

pub const ROOT: &str = "app.root";

/// 整数转字符串
#[derive(Debug, Default)]
pub struct MoneyConverter;

impl Component for MoneyConverter {
    fn name(&self) -> &'static str {
        "MoneyConverter"
    }

    fn as_bean_converter(self: Arc<Self>) -> Option<Arc<dyn BeanConverter>> {
        Some(self)
    }
}

impl BeanConverter for MoneyConverter {
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

/// 需要上下文中 `locale` 属性的转换器
#[derive(Debug)]
pub struct LocaleConverter {
    pub locale: String,
}

impl FromContext for LocaleConverter {
    fn from_context(context: &ApplicationContext) -> Result<Self, ConstructionError> {
        let locale = context.property("locale").ok_or_else(|| {
            ConstructionError::failed("app.root.convert.LocaleConverter", "with_context", "缺少 locale 属性")
        })?;
        Ok(Self {
            locale: locale.to_string(),
        })
    }
}

impl Component for LocaleConverter {
    fn name(&self) -> &'static str {
        "LocaleConverter"
    }

    fn as_bean_converter(self: Arc<Self>) -> Option<Arc<dyn BeanConverter>> {
        Some(self)
    }
}

impl BeanConverter for LocaleConverter {
    fn matches(&self, source: &TypeInfo, target: &TypeInfo) -> bool {
        source.is::<bool>() && target.is::<String>()
    }

    fn convert(
        &self,
        value: &(dyn Any + Send + Sync),
        _target: &TypeInfo,
    ) -> Result<MappedValue, ConversionError> {
        let flag = value.downcast_ref::<bool>().ok_or(ConversionError::UnsupportedValue {
            expected: "bool".to_string(),
        })?;
        let text = match (self.locale.as_str(), flag) {
            ("nl", true) => "ja",
            ("nl", false) => "nee",
            (_, true) => "yes",
            (_, false) => "no",
        };
        Ok(Arc::new(text.to_string()))
    }
}

/// 声明了转换器契约，实例却没有提供
#[derive(Debug, Default)]
pub struct MislabeledConverter;

impl Component for MislabeledConverter {
    fn name(&self) -> &'static str {
        "MislabeledConverter"
    }
}

/// 列表集合处理器
#[derive(Debug, Default)]
pub struct ListHandler;

impl Component for ListHandler {
    fn name(&self) -> &'static str {
        "ListHandler"
    }

    fn as_collection_handler(self: Arc<Self>) -> Option<Arc<dyn CollectionHandler>> {
        Some(self)
    }
}

impl CollectionHandler for ListHandler {
    fn handled_type(&self) -> &str {
        "Vec"
    }

    fn create_empty(&self) -> MappedValue {
        Arc::new(Vec::<String>::new())
    }
}

/// 只允许本人访问的安全检查，只能从上下文中取得
#[derive(Debug)]
pub struct OwnerOnlyCheck {
    pub owner: String,
}

impl Component for OwnerOnlyCheck {
    fn name(&self) -> &'static str {
        "OwnerOnlyCheck"
    }

    fn as_logic_secured_check(self: Arc<Self>) -> Option<Arc<dyn LogicSecuredCheck>> {
        Some(self)
    }
}

impl LogicSecuredCheck for OwnerOnlyCheck {
    fn is_allowed(
        &self,
        source: &(dyn Any + Send + Sync),
        _target: &(dyn Any + Send + Sync),
    ) -> bool {
        source
            .downcast_ref::<String>()
            .is_some_and(|user| *user == self.owner)
    }
}

/// 应用入口
pub fn entry_point() -> TypeDescriptor {
    TypeDescriptor::in_namespace(ROOT, "Application").marked(Marker::ENTRY_POINT)
}

/// 值转换器：一个无参构造、一个上下文构造、一个无法构造
pub fn converters() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::new("app.root.convert.MoneyConverter")
            .implementing(Contract::bean_converter())
            .with_default_constructor::<MoneyConverter>(),
        TypeDescriptor::new("app.root.convert.LocaleConverter")
            .implementing(Contract::bean_converter())
            .with_from_context::<LocaleConverter>(),
        TypeDescriptor::new("app.root.convert.UnbuildableConverter")
            .implementing(Contract::bean_converter()),
    ]
}

/// 集合处理器
pub fn collection_handlers() -> Vec<TypeDescriptor> {
    vec![TypeDescriptor::new("app.root.collections.ListHandler")
        .implementing(Contract::collection_handler())
        .with_default_constructor::<ListHandler>()]
}

/// 安全检查
pub fn secured_checks() -> Vec<TypeDescriptor> {
    vec![TypeDescriptor::new("app.root.security.OwnerOnlyCheck")
        .implementing(Contract::logic_secured_check())]
}

/// 匹配的严格配对：表单的每个属性都能在实体中找到
pub fn person_pair() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::new("app.root.model.Person").with_properties(["id", "name", "email"]),
        TypeDescriptor::new("app.root.web.PersonForm")
            .with_properties(["name", "email"])
            .mapped_to("app.root.model.Person"),
        TypeDescriptor::new("app.root.web.PersonResult")
            .with_properties(["id", "name"])
            .mapped_from("app.root.model.Person"),
    ]
}

/// 可选能力的标记类型
pub fn markers() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::new(PERSISTENCE_MARKER).abstract_type(),
        TypeDescriptor::new(ORM_PROXY_MARKER)
            .abstract_type()
            .requiring(PERSISTENCE_MARKER),
        TypeDescriptor::new(SECURITY_MARKER).abstract_type(),
        TypeDescriptor::new(REPOSITORY_WEB_MARKER).abstract_type(),
    ]
}

/// 组装类型目录
pub fn catalog<I>(groups: I) -> Arc<TypeCatalog>
where
    I: IntoIterator<Item = Vec<TypeDescriptor>>,
{
    let catalog = TypeCatalog::from_descriptors(groups.into_iter().flatten())
        .expect("测试类型目录不应有重名");
    Arc::new(catalog)
}

/// 完整的应用类型目录
pub fn full_catalog() -> Arc<TypeCatalog> {
    catalog([
        vec![entry_point()],
        converters(),
        collection_handlers(),
        secured_checks(),
        person_pair(),
        markers(),
    ])
}
