//! 类型描述符
//!
//! Rust 没有运行时反射，可发现类型在编译期由 `#[discoverable]` 宏生成描述符，
//! 启动时注册到类型目录。描述符携带扫描、能力检测和实例化所需的全部元数据。

use crate::{
    ApplicationContext, BeanConverter, CollectionHandler, Component, ConstructionError,
    FromContext, Instance, LogicSecuredCheck, PairDirectiveKind, TypeInfo,
};
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// 无参构造函数
pub type NoArgConstructor = Arc<dyn Fn() -> Result<Instance, ConstructionError> + Send + Sync>;

/// 上下文构造函数
pub type ContextConstructor =
    Arc<dyn Fn(&ApplicationContext) -> Result<Instance, ConstructionError> + Send + Sync>;

/// 能力契约（trait）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contract {
    id: TypeId,
    name: &'static str,
}

impl Contract {
    /// 从 trait object 类型创建契约
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 值转换器契约
    pub fn bean_converter() -> Self {
        Self::of::<dyn BeanConverter>()
    }

    /// 集合处理器契约
    pub fn collection_handler() -> Self {
        Self::of::<dyn CollectionHandler>()
    }

    /// 逻辑安全检查契约
    pub fn logic_secured_check() -> Self {
        Self::of::<dyn LogicSecuredCheck>()
    }

    /// 契约名称
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// 标记注解
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker(&'static str);

impl Marker {
    /// 应用入口
    pub const ENTRY_POINT: Self = Self("entry_point");
    /// 严格源声明
    pub const BEAN_MAP_TO: Self = Self("map_to");
    /// 严格目标声明
    pub const BEAN_MAP_FROM: Self = Self("map_from");

    /// 自定义标记
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// 标记名称
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#[{}]", self.0)
    }
}

/// 严格映射声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairDeclaration {
    /// 声明种类
    pub kind: PairDirectiveKind,
    /// 配对的另一方（限定名）
    pub counterpart: String,
}

/// 类型描述符
#[derive(Clone)]
pub struct TypeDescriptor {
    qualified_name: String,
    namespace: String,
    simple_name: String,
    is_abstract: bool,
    contracts: Vec<Contract>,
    supertypes: Vec<String>,
    markers: Vec<Marker>,
    properties: Vec<String>,
    pairs: Vec<PairDeclaration>,
    requires: Vec<String>,
    type_info: Option<TypeInfo>,
    no_arg: Option<NoArgConstructor>,
    with_context: Option<ContextConstructor>,
}

impl TypeDescriptor {
    /// 以点号分隔的限定名创建描述符，例如 `app.pkg.MoneyConverter`
    pub fn new(qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        let (namespace, simple_name) = match qualified_name.rfind('.') {
            Some(index) => (
                qualified_name[..index].to_string(),
                qualified_name[index + 1..].to_string(),
            ),
            None => (String::new(), qualified_name.clone()),
        };

        Self {
            qualified_name,
            namespace,
            simple_name,
            is_abstract: false,
            contracts: Vec::new(),
            supertypes: Vec::new(),
            markers: Vec::new(),
            properties: Vec::new(),
            pairs: Vec::new(),
            requires: Vec::new(),
            type_info: None,
            no_arg: None,
            with_context: None,
        }
    }

    /// 在命名空间下创建描述符
    pub fn in_namespace(namespace: &str, simple_name: &str) -> Self {
        if namespace.is_empty() {
            Self::new(simple_name)
        } else {
            Self::new(format!("{namespace}.{simple_name}"))
        }
    }

    /// 声明实现的契约
    pub fn implementing(mut self, contract: Contract) -> Self {
        if !self.contracts.contains(&contract) {
            self.contracts.push(contract);
        }
        self
    }

    /// 声明父类型
    pub fn extending(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    /// 添加标记
    pub fn marked(mut self, marker: Marker) -> Self {
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }

    /// 添加属性
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.properties.push(property.into());
        self
    }

    /// 批量添加属性
    pub fn with_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties.extend(properties.into_iter().map(Into::into));
        self
    }

    /// 声明为严格源，映射到 `target`
    pub fn mapped_to(mut self, target: impl Into<String>) -> Self {
        self.pairs.push(PairDeclaration {
            kind: PairDirectiveKind::MapTo,
            counterpart: target.into(),
        });
        self.marked(Marker::BEAN_MAP_TO)
    }

    /// 声明为严格目标，从 `source` 映射而来
    pub fn mapped_from(mut self, source: impl Into<String>) -> Self {
        self.pairs.push(PairDeclaration {
            kind: PairDirectiveKind::MapFrom,
            counterpart: source.into(),
        });
        self.marked(Marker::BEAN_MAP_FROM)
    }

    /// 声明传递依赖，能力检测时一并解析
    pub fn requiring(mut self, type_name: impl Into<String>) -> Self {
        self.requires.push(type_name.into());
        self
    }

    /// 标记为抽象类型，扫描时跳过
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// 关联 Rust 类型信息
    pub fn for_type<T: 'static>(mut self) -> Self {
        self.type_info = Some(TypeInfo::of::<T>());
        self
    }

    /// 设置无参构造函数
    pub fn with_no_arg_constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn() -> Result<Instance, ConstructionError> + Send + Sync + 'static,
    {
        self.no_arg = Some(Arc::new(constructor));
        self
    }

    /// 设置上下文构造函数
    pub fn with_context_constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn(&ApplicationContext) -> Result<Instance, ConstructionError> + Send + Sync + 'static,
    {
        self.with_context = Some(Arc::new(constructor));
        self
    }

    /// 使用 `Default` 作为无参构造函数
    pub fn with_default_constructor<T>(self) -> Self
    where
        T: Component + Default,
    {
        self.with_no_arg_constructor(|| Ok(Arc::new(T::default()) as Instance))
    }

    /// 使用 `FromContext` 作为上下文构造函数
    pub fn with_from_context<T>(self) -> Self
    where
        T: Component + FromContext,
    {
        self.with_context_constructor(|context| {
            T::from_context(context).map(|component| Arc::new(component) as Instance)
        })
    }

    /// 限定名
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// 所在命名空间
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// 简单名
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// 是否为抽象类型
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// 直接实现的契约
    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    /// 直接声明的父类型
    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    /// 自身声明的标记
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// 是否带有标记
    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    /// 声明的属性
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// 严格映射声明
    pub fn pairs(&self) -> &[PairDeclaration] {
        &self.pairs
    }

    /// 传递依赖
    pub fn requires(&self) -> &[String] {
        &self.requires
    }

    /// 关联的 Rust 类型信息
    pub fn type_info(&self) -> Option<&TypeInfo> {
        self.type_info.as_ref()
    }

    /// 无参构造函数
    pub fn no_arg_constructor(&self) -> Option<&NoArgConstructor> {
        self.no_arg.as_ref()
    }

    /// 上下文构造函数
    pub fn context_constructor(&self) -> Option<&ContextConstructor> {
        self.with_context.as_ref()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("qualified_name", &self.qualified_name)
            .field("is_abstract", &self.is_abstract)
            .field("contracts", &self.contracts)
            .field("supertypes", &self.supertypes)
            .field("markers", &self.markers)
            .field("properties", &self.properties)
            .field("pairs", &self.pairs)
            .field("requires", &self.requires)
            .field("no_arg", &self.no_arg.as_ref().map(|_| "<function>"))
            .field("with_context", &self.with_context.as_ref().map(|_| "<function>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Plain;

    impl Component for Plain {
        fn name(&self) -> &'static str {
            "Plain"
        }
    }

    #[test]
    fn test_qualified_name_split() {
        let descriptor = TypeDescriptor::new("app.pkg.MoneyConverter");
        assert_eq!(descriptor.namespace(), "app.pkg");
        assert_eq!(descriptor.simple_name(), "MoneyConverter");

        let root = TypeDescriptor::new("Standalone");
        assert_eq!(root.namespace(), "");
        assert_eq!(root.simple_name(), "Standalone");

        let nested = TypeDescriptor::in_namespace("app.web", "PersonForm");
        assert_eq!(nested.qualified_name(), "app.web.PersonForm");
    }

    #[test]
    fn test_pair_declarations_add_markers() {
        let descriptor = TypeDescriptor::new("app.PersonForm").mapped_to("app.Person");
        assert!(descriptor.has_marker(Marker::BEAN_MAP_TO));
        assert!(!descriptor.has_marker(Marker::BEAN_MAP_FROM));
        assert_eq!(descriptor.pairs()[0].kind, PairDirectiveKind::MapTo);
        assert_eq!(descriptor.pairs()[0].counterpart, "app.Person");
    }

    #[test]
    fn test_default_constructor_builds_instance() {
        let descriptor = TypeDescriptor::new("app.Plain").with_default_constructor::<Plain>();
        let constructor = descriptor.no_arg_constructor().expect("应该有无参构造函数");
        let instance = constructor().expect("构造应该成功");
        assert_eq!(instance.name(), "Plain");
        assert!(descriptor.context_constructor().is_none());
    }

    #[test]
    fn test_contracts_are_deduplicated() {
        let descriptor = TypeDescriptor::new("app.Twice")
            .implementing(Contract::bean_converter())
            .implementing(Contract::bean_converter());
        assert_eq!(descriptor.contracts().len(), 1);
        assert_ne!(Contract::bean_converter(), Contract::collection_handler());
    }
}
