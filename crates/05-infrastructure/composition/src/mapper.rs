//! 映射配置
//!
//! [`MapperBuilder`] 是装配过程中的累加器，只属于单次装配过程；
//! 装配完成后冻结为不可变的 [`MapperConfiguration`]，交给映射引擎使用。

use crate::persistence::AfterClearFlusher;
use crate::properties::DiagnosticsDetailLevel;
use crate::state::{AssemblyRecord, AssemblyState, CapabilityFlags};
use autoconfig_common::{
    BeanConverter, CollectionHandler, LogicSecuredCheck, PairDirectiveKind, PairingFailure, Scope,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// 带名称的已注册实例
pub struct Registered<T: ?Sized> {
    /// 类型限定名
    pub type_name: String,
    /// 实例
    pub instance: Arc<T>,
}

impl<T: ?Sized> Registered<T> {
    /// 创建
    pub fn new(type_name: impl Into<String>, instance: Arc<T>) -> Self {
        Self {
            type_name: type_name.into(),
            instance,
        }
    }
}

impl<T: ?Sized> Clone for Registered<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name.clone(),
            instance: Arc::clone(&self.instance),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Registered<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Registered({})", self.type_name)
    }
}

/// 受保护属性的处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SecuredPropertyHandler {
    /// 不处理
    #[default]
    None,
    /// 按当前主体的角色判断
    RoleBased,
}

/// 去代理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnproxyStrategy {
    /// 默认策略
    #[default]
    Default,
    /// 感知 ORM 代理
    OrmAware,
}

/// 严格映射命名约定
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrictMappingConvention {
    /// 是否应用
    pub apply: bool,
    /// 严格源后缀
    pub source_suffix: String,
    /// 严格目标后缀
    pub target_suffix: String,
}

impl Default for StrictMappingConvention {
    fn default() -> Self {
        Self {
            apply: true,
            source_suffix: "Form".to_string(),
            target_suffix: "Result".to_string(),
        }
    }
}

/// 严格的一方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrictSide {
    /// 源的每个属性都必须在目标中找到
    Source,
    /// 目标的每个属性都必须在源中找到
    Target,
}

/// 严格配对
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrictPair {
    /// 源类型限定名
    pub source: String,
    /// 目标类型限定名
    pub target: String,
    /// 严格的一方
    pub strict: StrictSide,
}

impl StrictPair {
    /// 由声明种类创建
    pub fn from_directive(
        kind: PairDirectiveKind,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        let strict = match kind {
            PairDirectiveKind::MapTo => StrictSide::Source,
            PairDirectiveKind::MapFrom => StrictSide::Target,
        };
        Self {
            source: source.into(),
            target: target.into(),
            strict,
        }
    }

    /// 是否涉及指定类型
    pub fn involves(&self, type_name: &str) -> bool {
        self.source == type_name || self.target == type_name
    }
}

/// 严格配对表，按 (源, 目标) 索引
#[derive(Debug, Clone, Default)]
pub struct StrictPairRegistry {
    pairs: Vec<StrictPair>,
    index: HashMap<(String, String), usize>,
}

impl StrictPairRegistry {
    /// 注册配对
    ///
    /// 同一配对重复注册是幂等的；以相反的严格方向重复注册是冲突。
    pub fn insert(&mut self, pair: StrictPair) -> Result<(), PairingFailure> {
        let key = (pair.source.clone(), pair.target.clone());
        if let Some(&position) = self.index.get(&key) {
            return if self.pairs[position].strict == pair.strict {
                Ok(())
            } else {
                Err(PairingFailure::ConflictingStrictness)
            };
        }
        self.index.insert(key, self.pairs.len());
        self.pairs.push(pair);
        Ok(())
    }

    /// 按 (源, 目标) 查找
    pub fn get(&self, source: &str, target: &str) -> Option<&StrictPair> {
        self.index
            .get(&(source.to_string(), target.to_string()))
            .map(|&position| &self.pairs[position])
    }

    /// 涉及指定类型的所有配对
    pub fn involving(&self, type_name: &str) -> Vec<&StrictPair> {
        self.pairs.iter().filter(|pair| pair.involves(type_name)).collect()
    }

    /// 所有配对，按注册顺序
    pub fn iter(&self) -> impl Iterator<Item = &StrictPair> {
        self.pairs.iter()
    }

    /// 配对数量
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// 映射配置累加器
#[derive(Default)]
pub struct MapperBuilder {
    package_prefixes: Vec<Scope>,
    converters: Vec<Registered<dyn BeanConverter>>,
    collection_handlers: Vec<Registered<dyn CollectionHandler>>,
    logic_secured_checks: Vec<Registered<dyn LogicSecuredCheck>>,
    secured_property_handler: SecuredPropertyHandler,
    unproxy: UnproxyStrategy,
    after_clear_flushers: Vec<Arc<dyn AfterClearFlusher>>,
    strict_pairs: StrictPairRegistry,
    convention: StrictMappingConvention,
    diagnostics_level: DiagnosticsDetailLevel,
}

impl MapperBuilder {
    /// 创建空累加器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加扫描范围，保持插入顺序并去重
    pub fn add_package_prefix(&mut self, scope: Scope) -> &mut Self {
        if !self.package_prefixes.contains(&scope) {
            self.package_prefixes.push(scope);
        }
        self
    }

    /// 添加值转换器
    pub fn add_converter(
        &mut self,
        type_name: impl Into<String>,
        converter: Arc<dyn BeanConverter>,
    ) -> &mut Self {
        self.converters.push(Registered::new(type_name, converter));
        self
    }

    /// 添加集合处理器
    pub fn add_collection_handler(
        &mut self,
        type_name: impl Into<String>,
        handler: Arc<dyn CollectionHandler>,
    ) -> &mut Self {
        self.collection_handlers.push(Registered::new(type_name, handler));
        self
    }

    /// 添加逻辑安全检查
    pub fn add_logic_secured_check(
        &mut self,
        type_name: impl Into<String>,
        check: Arc<dyn LogicSecuredCheck>,
    ) -> &mut Self {
        self.logic_secured_checks.push(Registered::new(type_name, check));
        self
    }

    /// 设置受保护属性处理方式
    pub fn set_secured_property_handler(&mut self, handler: SecuredPropertyHandler) -> &mut Self {
        self.secured_property_handler = handler;
        self
    }

    /// 设置去代理策略
    pub fn set_unproxy(&mut self, strategy: UnproxyStrategy) -> &mut Self {
        self.unproxy = strategy;
        self
    }

    /// 添加清理后刷新钩子
    pub fn add_after_clear_flusher(&mut self, flusher: Arc<dyn AfterClearFlusher>) -> &mut Self {
        self.after_clear_flushers.push(flusher);
        self
    }

    /// 注册严格配对
    pub fn add_strict_pair(&mut self, pair: StrictPair) -> Result<&mut Self, PairingFailure> {
        self.strict_pairs.insert(pair)?;
        Ok(self)
    }

    /// 设置严格映射约定
    pub fn set_convention(&mut self, convention: StrictMappingConvention) -> &mut Self {
        self.convention = convention;
        self
    }

    /// 设置诊断详细级别
    pub fn set_diagnostics_level(&mut self, level: DiagnosticsDetailLevel) -> &mut Self {
        self.diagnostics_level = level;
        self
    }

    /// 已登记的转换器名称
    pub fn converter_names(&self) -> Vec<&str> {
        self.converters
            .iter()
            .map(|converter| converter.type_name.as_str())
            .collect()
    }

    /// 冻结为不可变配置
    pub fn build(self, record: AssemblyRecord) -> MapperConfiguration {
        MapperConfiguration {
            package_prefixes: self.package_prefixes,
            converters: self.converters,
            collection_handlers: self.collection_handlers,
            logic_secured_checks: self.logic_secured_checks,
            secured_property_handler: self.secured_property_handler,
            unproxy: self.unproxy,
            after_clear_flushers: self.after_clear_flushers,
            strict_pairs: self.strict_pairs,
            convention: self.convention,
            diagnostics_level: self.diagnostics_level,
            record,
        }
    }
}

impl fmt::Debug for MapperBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperBuilder")
            .field("package_prefixes", &self.package_prefixes)
            .field("converters", &self.converters)
            .field("collection_handlers", &self.collection_handlers)
            .field("logic_secured_checks", &self.logic_secured_checks)
            .field("strict_pairs", &self.strict_pairs.len())
            .finish_non_exhaustive()
    }
}

/// 不可变的映射配置
pub struct MapperConfiguration {
    package_prefixes: Vec<Scope>,
    converters: Vec<Registered<dyn BeanConverter>>,
    collection_handlers: Vec<Registered<dyn CollectionHandler>>,
    logic_secured_checks: Vec<Registered<dyn LogicSecuredCheck>>,
    secured_property_handler: SecuredPropertyHandler,
    unproxy: UnproxyStrategy,
    after_clear_flushers: Vec<Arc<dyn AfterClearFlusher>>,
    strict_pairs: StrictPairRegistry,
    convention: StrictMappingConvention,
    diagnostics_level: DiagnosticsDetailLevel,
    record: AssemblyRecord,
}

impl MapperConfiguration {
    /// 扫描范围，按插入顺序
    pub fn package_prefixes(&self) -> &[Scope] {
        &self.package_prefixes
    }

    /// 值转换器
    pub fn converters(&self) -> &[Registered<dyn BeanConverter>] {
        &self.converters
    }

    /// 集合处理器
    pub fn collection_handlers(&self) -> &[Registered<dyn CollectionHandler>] {
        &self.collection_handlers
    }

    /// 逻辑安全检查
    pub fn logic_secured_checks(&self) -> &[Registered<dyn LogicSecuredCheck>] {
        &self.logic_secured_checks
    }

    /// 受保护属性处理方式
    pub fn secured_property_handler(&self) -> SecuredPropertyHandler {
        self.secured_property_handler
    }

    /// 去代理策略
    pub fn unproxy(&self) -> UnproxyStrategy {
        self.unproxy
    }

    /// 清理后刷新钩子
    pub fn after_clear_flushers(&self) -> &[Arc<dyn AfterClearFlusher>] {
        &self.after_clear_flushers
    }

    /// 严格配对表
    pub fn strict_pairs(&self) -> &StrictPairRegistry {
        &self.strict_pairs
    }

    /// 严格映射约定
    pub fn convention(&self) -> &StrictMappingConvention {
        &self.convention
    }

    /// 诊断详细级别
    pub fn diagnostics_level(&self) -> DiagnosticsDetailLevel {
        self.diagnostics_level
    }

    /// 装配记录
    pub fn record(&self) -> &AssemblyRecord {
        &self.record
    }

    /// 转换器名称集合
    pub fn converter_names(&self) -> BTreeSet<String> {
        self.converters.iter().map(|c| c.type_name.clone()).collect()
    }

    /// 集合处理器名称集合
    pub fn collection_handler_names(&self) -> BTreeSet<String> {
        self.collection_handlers
            .iter()
            .map(|h| h.type_name.clone())
            .collect()
    }

    /// 逻辑安全检查名称集合
    pub fn logic_secured_check_names(&self) -> BTreeSet<String> {
        self.logic_secured_checks
            .iter()
            .map(|c| c.type_name.clone())
            .collect()
    }

    /// 可序列化的摘要
    pub fn summary(&self) -> ConfigurationSummary {
        ConfigurationSummary {
            pass_id: self.record.pass_id,
            package_prefixes: self
                .package_prefixes
                .iter()
                .map(|scope| scope.as_str().to_string())
                .collect(),
            converters: self.converters.iter().map(|c| c.type_name.clone()).collect(),
            collection_handlers: self
                .collection_handlers
                .iter()
                .map(|h| h.type_name.clone())
                .collect(),
            logic_secured_checks: self
                .logic_secured_checks
                .iter()
                .map(|c| c.type_name.clone())
                .collect(),
            secured_property_handler: self.secured_property_handler,
            unproxy: self.unproxy,
            after_clear_flushers: self
                .after_clear_flushers
                .iter()
                .map(|flusher| flusher.name().to_string())
                .collect(),
            strict_pairs: self.strict_pairs.iter().cloned().collect(),
            convention: self.convention.clone(),
            diagnostics_level: self.diagnostics_level,
            capabilities: self.record.capabilities,
            states: self.record.states.clone(),
            diagnostics: self
                .record
                .diagnostics
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl fmt::Debug for MapperConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperConfiguration")
            .field("pass_id", &self.record.pass_id)
            .field("package_prefixes", &self.package_prefixes)
            .field("converters", &self.converters)
            .field("collection_handlers", &self.collection_handlers)
            .field("logic_secured_checks", &self.logic_secured_checks)
            .field("secured_property_handler", &self.secured_property_handler)
            .field("unproxy", &self.unproxy)
            .field("after_clear_flushers", &self.after_clear_flushers.len())
            .field("strict_pairs", &self.strict_pairs)
            .finish_non_exhaustive()
    }
}

/// 映射配置摘要
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationSummary {
    /// 装配过程ID
    pub pass_id: Uuid,
    /// 扫描范围
    pub package_prefixes: Vec<String>,
    /// 值转换器
    pub converters: Vec<String>,
    /// 集合处理器
    pub collection_handlers: Vec<String>,
    /// 逻辑安全检查
    pub logic_secured_checks: Vec<String>,
    /// 受保护属性处理方式
    pub secured_property_handler: SecuredPropertyHandler,
    /// 去代理策略
    pub unproxy: UnproxyStrategy,
    /// 清理后刷新钩子
    pub after_clear_flushers: Vec<String>,
    /// 严格配对
    pub strict_pairs: Vec<StrictPair>,
    /// 严格映射约定
    pub convention: StrictMappingConvention,
    /// 诊断详细级别
    pub diagnostics_level: DiagnosticsDetailLevel,
    /// 能力标志
    pub capabilities: CapabilityFlags,
    /// 经过的状态
    pub states: Vec<AssemblyState>,
    /// 诊断
    pub diagnostics: Vec<String>,
}

impl ConfigurationSummary {
    /// 序列化为格式化的 JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
