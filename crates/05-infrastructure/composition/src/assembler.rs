//! 映射自动配置装配器
//!
//! 一次装配过程按固定顺序执行：
//!
//! 1. 解析扫描范围
//! 2. 检测可选能力
//! 3. ID 到实体的转换器（持久化）
//! 4. 集合处理器
//! 5. 值转换器
//! 6. 严格映射声明（失败是致命的）
//! 7. 清理后刷新钩子
//! 8. 逻辑安全检查与受保护属性
//! 9. 去代理策略
//! 10. 定制器
//!
//! 除扫描范围解析和严格映射声明外，其余问题都只记录诊断并跳过。

use crate::customizer::MapperBuilderCustomizer;
use crate::mapper::{
    MapperBuilder, MapperConfiguration, SecuredPropertyHandler, StrictMappingConvention,
    StrictPair, UnproxyStrategy,
};
use crate::pairs::{PropertyCompletenessValidator, StrictPairValidator};
use crate::persistence::{EntityManager, IdToEntityConverter, PersistenceAfterClearFlusher};
use crate::properties::AutoconfigProperties;
use crate::state::{AssemblyRecord, AssemblyState, CapabilityFlags};
use crate::web::{register_merged_form_resolver, MergedFormResolverRegistration};
use autoconfig_common::{
    global_type_catalog, ApplicationContext, AutoconfigError, AutoconfigResult,
    CapabilityPredicate, Contract, Diagnostic, DiagnosticKind, DiagnosticsSink, Instance, Marker,
    OptionalFeature, PairDirectiveKind, PairingFailure, Scope, StrictPairingError, TypeCatalog,
    TypeDescriptor, TracingDiagnosticsSink,
};
use chrono::{DateTime, Utc};
use discovery_abstractions::{
    Candidate, CandidateScanner, CapabilityDetector, ConstructionStrategy, Instantiator,
    ScopeResolver,
};
use discovery_impl::{
    CatalogCandidateScanner, CatalogCapabilityDetector, ContextBeanStrategy,
    EntryPointScopeResolver, StrategyInstantiator,
};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// 装配失败
#[derive(Error, Debug)]
#[error("映射配置装配失败 (pass {pass_id}, 状态 {failed_in}): {source}")]
pub struct AssemblyError {
    /// 装配过程ID
    pub pass_id: Uuid,
    /// 失败时所处的状态
    pub failed_in: AssemblyState,
    /// 失败原因
    #[source]
    pub source: AutoconfigError,
}

/// 映射自动配置装配器
///
/// 每次调用 [`MapperAutoConfig::assemble`] 都是一次独立的装配过程，
/// 多次调用得到等价的配置。
pub struct MapperAutoConfig {
    properties: AutoconfigProperties,
    catalog: Arc<TypeCatalog>,
    context: Arc<ApplicationContext>,
    scope_resolver: Arc<dyn ScopeResolver>,
    scanner: Arc<dyn CandidateScanner>,
    detector: Arc<dyn CapabilityDetector>,
    instantiator: StrategyInstantiator,
    secured_check_instantiator: StrategyInstantiator,
    pair_validator: Arc<dyn StrictPairValidator>,
    customizer: Option<Arc<dyn MapperBuilderCustomizer>>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl MapperAutoConfig {
    /// 基于指定类型目录创建构建器
    pub fn builder(catalog: Arc<TypeCatalog>) -> MapperAutoConfigBuilder {
        MapperAutoConfigBuilder::new(catalog)
    }

    /// 基于全局类型目录创建构建器
    pub fn from_global(properties: AutoconfigProperties) -> MapperAutoConfigBuilder {
        MapperAutoConfigBuilder::new(global_type_catalog()).with_properties(properties)
    }

    /// 自动配置属性
    pub fn properties(&self) -> &AutoconfigProperties {
        &self.properties
    }

    /// 应用上下文
    pub fn context(&self) -> &Arc<ApplicationContext> {
        &self.context
    }

    /// 执行一次装配
    pub fn assemble(&self) -> Result<MapperConfiguration, AssemblyError> {
        let mut pass = AssemblyPass::new();
        let diagnostics = PassDiagnostics::new(self.diagnostics.as_ref());
        info!(pass_id = %pass.id, "开始装配映射配置");

        match self.run(&mut pass, &diagnostics) {
            Ok(configuration) => {
                info!(
                    pass_id = %pass.id,
                    converters = configuration.converters().len(),
                    collection_handlers = configuration.collection_handlers().len(),
                    strict_pairs = configuration.strict_pairs().len(),
                    "映射配置装配完成"
                );
                Ok(configuration)
            }
            Err(source) => {
                let failed_in = pass.state;
                pass.fail();
                error!(pass_id = %pass.id, state = %failed_in, "映射配置装配失败: {}", source);
                Err(AssemblyError {
                    pass_id: pass.id,
                    failed_in,
                    source,
                })
            }
        }
    }

    /// 为装配好的配置决定是否注册合并表单参数解析器
    pub fn register_merged_form_resolver(
        &self,
        configuration: Arc<MapperConfiguration>,
    ) -> Option<MergedFormResolverRegistration> {
        register_merged_form_resolver(
            configuration,
            &self.context,
            self.detector.as_ref(),
            self.diagnostics.as_ref(),
        )
    }

    fn run(
        &self,
        pass: &mut AssemblyPass,
        diagnostics: &PassDiagnostics<'_>,
    ) -> AutoconfigResult<MapperConfiguration> {
        // 第一步：解析扫描范围
        let scope = self.scope_resolver.resolve(self.explicit_prefix())?;
        pass.advance(AssemblyState::ScopeResolved)?;
        info!("扫描范围: [{}]", scope);
        let application_scope = self.application_scope(&scope);

        // 第二步：检测可选能力
        let capabilities = self.detect_capabilities(diagnostics);
        pass.advance(AssemblyState::CapabilitiesDetected)?;

        let mut builder = MapperBuilder::new();
        builder
            .add_package_prefix(scope.clone())
            .set_convention(StrictMappingConvention {
                apply: self.properties.apply_strict_mapping_convention,
                source_suffix: self.properties.strict_source_suffix.clone(),
                target_suffix: self.properties.strict_target_suffix.clone(),
            })
            .set_diagnostics_level(self.properties.diagnostics_level);

        self.add_id_to_entity_converter(&mut builder, &capabilities, diagnostics);
        self.add_collection_handlers(&mut builder, &scope, pass, diagnostics)?;
        self.add_converters(&mut builder, &scope, pass, diagnostics)?;
        self.add_strict_pairs(&mut builder, &application_scope, pass, diagnostics)?;
        self.add_after_clear_flusher(&mut builder, &capabilities, diagnostics);
        self.apply_secured_properties(&mut builder, &scope, &capabilities, pass, diagnostics)?;
        self.set_unproxy(&mut builder, &capabilities, diagnostics);

        if let Some(customizer) = &self.customizer {
            info!("执行映射配置定制器");
            customizer.customize(&mut builder);
        }

        pass.advance(AssemblyState::Assembled)?;
        let record = pass.record(scope, capabilities, diagnostics.entries());
        if self.properties.diagnostics_level.is_enabled() {
            info!("本次装配产生 {} 条诊断", record.diagnostics.len());
            for diagnostic in &record.diagnostics {
                debug!("{}", diagnostic);
            }
        }
        Ok(builder.build(record))
    }

    fn explicit_prefix(&self) -> Option<&str> {
        self.properties
            .package_prefix
            .as_deref()
            .filter(|prefix| !prefix.is_empty())
    }

    /// 严格映射声明在应用命名空间内扫描，不受 package_prefix 限制
    fn application_scope(&self, scope: &Scope) -> Scope {
        if self.explicit_prefix().is_none() {
            return scope.clone();
        }
        match self.scope_resolver.resolve(None) {
            Ok(application) => {
                info!("严格映射声明的扫描范围: [{}]", application);
                application
            }
            Err(err) => {
                warn!("无法确定应用命名空间 ({})，在所有命名空间中扫描严格映射声明", err);
                Scope::root()
            }
        }
    }

    fn detect_capabilities(&self, diagnostics: &dyn DiagnosticsSink) -> CapabilityFlags {
        let capabilities = CapabilityFlags::detect(self.detector.as_ref());
        for feature in OptionalFeature::ALL {
            if !capabilities.get(feature) {
                diagnostics.record(Diagnostic::new(
                    DiagnosticKind::CapabilityUnavailable,
                    feature.to_string(),
                    format!("未检测到 {}", feature.marker()),
                ));
            }
        }
        debug!("可选能力: {:?}", capabilities);
        capabilities
    }

    fn add_id_to_entity_converter(
        &self,
        builder: &mut MapperBuilder,
        capabilities: &CapabilityFlags,
        diagnostics: &dyn DiagnosticsSink,
    ) {
        if !self.properties.features.persistence {
            feature_disabled(diagnostics, "features.persistence");
            return;
        }
        if !capabilities.persistence {
            return;
        }
        builder.add_converter(
            IdToEntityConverter::NAME,
            Arc::new(IdToEntityConverter::new(Arc::clone(&self.context))),
        );
        info!("已添加 ID 到实体的转换器");
    }

    fn add_collection_handlers(
        &self,
        builder: &mut MapperBuilder,
        scope: &Scope,
        pass: &mut AssemblyPass,
        diagnostics: &dyn DiagnosticsSink,
    ) -> AutoconfigResult<()> {
        if !self.properties.features.collection_handlers {
            feature_disabled(diagnostics, "features.collection_handlers");
            return Ok(());
        }

        let created = self.scan_and_instantiate(
            "集合处理器",
            &CapabilityPredicate::Implements(Contract::collection_handler()),
            &self.instantiator,
            scope,
            pass,
            diagnostics,
        )?;
        for (candidate, instance) in created {
            match instance.as_collection_handler() {
                Some(handler) => {
                    info!("已添加集合处理器 [{}]", candidate.qualified_name());
                    builder.add_collection_handler(candidate.qualified_name(), handler);
                }
                None => contract_mismatch(diagnostics, &candidate, "CollectionHandler"),
            }
        }
        Ok(())
    }

    fn add_converters(
        &self,
        builder: &mut MapperBuilder,
        scope: &Scope,
        pass: &mut AssemblyPass,
        diagnostics: &dyn DiagnosticsSink,
    ) -> AutoconfigResult<()> {
        if !self.properties.features.converters {
            feature_disabled(diagnostics, "features.converters");
            return Ok(());
        }

        let created = self.scan_and_instantiate(
            "值转换器",
            &CapabilityPredicate::Implements(Contract::bean_converter()),
            &self.instantiator,
            scope,
            pass,
            diagnostics,
        )?;
        for (candidate, instance) in created {
            match instance.as_bean_converter() {
                Some(converter) => {
                    info!("已添加值转换器 [{}]", candidate.qualified_name());
                    builder.add_converter(candidate.qualified_name(), converter);
                }
                None => contract_mismatch(diagnostics, &candidate, "BeanConverter"),
            }
        }
        Ok(())
    }

    fn add_strict_pairs(
        &self,
        builder: &mut MapperBuilder,
        scope: &Scope,
        pass: &mut AssemblyPass,
        diagnostics: &dyn DiagnosticsSink,
    ) -> AutoconfigResult<()> {
        if !self.properties.features.bean_pairs {
            feature_disabled(diagnostics, "features.bean_pairs");
            return Ok(());
        }

        pass.advance(AssemblyState::Scanning)?;
        let mut seen = HashSet::new();
        let candidates: Vec<Candidate> = [Marker::BEAN_MAP_FROM, Marker::BEAN_MAP_TO]
            .into_iter()
            .flat_map(|marker| {
                self.scanner
                    .scan(scope, &CapabilityPredicate::Annotated(marker), diagnostics)
            })
            .filter(|candidate| seen.insert(candidate.qualified_name().to_string()))
            .collect();
        info!("发现 {} 个声明严格映射的类型", candidates.len());

        for candidate in &candidates {
            self.register_pairs(builder, &candidate.descriptor)?;
        }
        Ok(())
    }

    fn register_pairs(
        &self,
        builder: &mut MapperBuilder,
        descriptor: &TypeDescriptor,
    ) -> Result<(), StrictPairingError> {
        if descriptor.has_marker(Marker::BEAN_MAP_TO) && descriptor.has_marker(Marker::BEAN_MAP_FROM)
        {
            return Err(StrictPairingError::ConflictingRoles {
                type_name: descriptor.qualified_name().to_string(),
            });
        }

        for declaration in descriptor.pairs() {
            let kind = declaration.kind;
            let (source_type, target_type) = match kind {
                PairDirectiveKind::MapTo => (
                    descriptor.qualified_name().to_string(),
                    declaration.counterpart.clone(),
                ),
                PairDirectiveKind::MapFrom => (
                    declaration.counterpart.clone(),
                    descriptor.qualified_name().to_string(),
                ),
            };
            let invalid = |cause: PairingFailure| StrictPairingError::InvalidPair {
                kind,
                source_type: source_type.clone(),
                target_type: target_type.clone(),
                cause,
            };

            let counterpart = self.catalog.resolve(&declaration.counterpart).ok_or_else(|| {
                invalid(PairingFailure::UnresolvedType {
                    type_name: declaration.counterpart.clone(),
                })
            })?;
            // 声明方总是严格的一方
            self.pair_validator
                .validate(descriptor, &counterpart)
                .map_err(&invalid)?;
            builder
                .add_strict_pair(StrictPair::from_directive(
                    kind,
                    source_type.clone(),
                    target_type.clone(),
                ))
                .map_err(&invalid)?;
            info!("已注册严格映射 {} -> {} ({})", source_type, target_type, kind);
        }
        Ok(())
    }

    fn add_after_clear_flusher(
        &self,
        builder: &mut MapperBuilder,
        capabilities: &CapabilityFlags,
        diagnostics: &dyn DiagnosticsSink,
    ) {
        if !self.properties.features.flush_hooks {
            feature_disabled(diagnostics, "features.flush_hooks");
            return;
        }
        if !capabilities.flush_hooks {
            return;
        }

        match self.context.get_bean::<dyn EntityManager>() {
            Some(entity_manager) => {
                builder.add_after_clear_flusher(Arc::new(PersistenceAfterClearFlusher::new(
                    entity_manager,
                )));
                info!("已添加清理后刷新钩子");
            }
            None => diagnostics.record(Diagnostic::new(
                DiagnosticKind::MissingBean,
                "EntityManager",
                "上下文中没有 EntityManager，跳过清理后刷新钩子",
            )),
        }
    }

    fn apply_secured_properties(
        &self,
        builder: &mut MapperBuilder,
        scope: &Scope,
        capabilities: &CapabilityFlags,
        pass: &mut AssemblyPass,
        diagnostics: &dyn DiagnosticsSink,
    ) -> AutoconfigResult<()> {
        if !capabilities.security {
            return Ok(());
        }
        if !self.properties.apply_secured_properties {
            feature_disabled(diagnostics, "apply_secured_properties");
            return Ok(());
        }

        if self.properties.features.secured_checks {
            let created = self.scan_and_instantiate(
                "逻辑安全检查",
                &CapabilityPredicate::Implements(Contract::logic_secured_check()),
                &self.secured_check_instantiator,
                scope,
                pass,
                diagnostics,
            )?;
            for (candidate, instance) in created {
                match instance.as_logic_secured_check() {
                    Some(check) => {
                        info!("已添加逻辑安全检查 [{}]", candidate.qualified_name());
                        builder.add_logic_secured_check(candidate.qualified_name(), check);
                    }
                    None => contract_mismatch(diagnostics, &candidate, "LogicSecuredCheck"),
                }
            }
        } else {
            feature_disabled(diagnostics, "features.secured_checks");
        }

        builder.set_secured_property_handler(SecuredPropertyHandler::RoleBased);
        info!("受保护属性按角色处理");
        Ok(())
    }

    fn set_unproxy(
        &self,
        builder: &mut MapperBuilder,
        capabilities: &CapabilityFlags,
        diagnostics: &dyn DiagnosticsSink,
    ) {
        if !self.properties.use_orm_unproxy {
            debug!("使用默认去代理策略");
            return;
        }
        if capabilities.orm_proxy {
            builder.set_unproxy(UnproxyStrategy::OrmAware);
            info!("使用感知 ORM 的去代理策略");
        } else {
            warn!("use_orm_unproxy 已开启，但未检测到 ORM 代理支持，使用默认去代理策略");
            diagnostics.record(Diagnostic::new(
                DiagnosticKind::FeatureDisabled,
                "use_orm_unproxy",
                "未检测到 ORM 代理支持，使用默认去代理策略",
            ));
        }
    }

    fn scan_and_instantiate(
        &self,
        category: &str,
        predicate: &CapabilityPredicate,
        instantiator: &StrategyInstantiator,
        scope: &Scope,
        pass: &mut AssemblyPass,
        diagnostics: &dyn DiagnosticsSink,
    ) -> AutoconfigResult<Vec<(Candidate, Instance)>> {
        pass.advance(AssemblyState::Scanning)?;
        let candidates = self.scanner.scan(scope, predicate, diagnostics);
        info!("发现 {} 个{}候选类型 ({})", candidates.len(), category, predicate);

        pass.advance(AssemblyState::Instantiating)?;
        Ok(candidates
            .into_iter()
            .filter_map(|candidate| {
                instantiator
                    .instantiate(&candidate, &self.context, diagnostics)
                    .into_instance()
                    .map(|instance| (candidate, instance))
            })
            .collect())
    }
}

impl fmt::Debug for MapperAutoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperAutoConfig")
            .field("properties", &self.properties)
            .field("catalog", &self.catalog.len())
            .field("context", &self.context.name())
            .field("scanner", &self.scanner.name())
            .field("instantiator", &self.instantiator)
            .field("secured_check_instantiator", &self.secured_check_instantiator)
            .field("customizer", &self.customizer.is_some())
            .finish_non_exhaustive()
    }
}

/// 装配器构建器
pub struct MapperAutoConfigBuilder {
    catalog: Arc<TypeCatalog>,
    properties: AutoconfigProperties,
    context: Option<Arc<ApplicationContext>>,
    scope_resolver: Option<Arc<dyn ScopeResolver>>,
    scanner: Option<Arc<dyn CandidateScanner>>,
    detector: Option<Arc<dyn CapabilityDetector>>,
    extra_strategies: Vec<Arc<dyn ConstructionStrategy>>,
    pair_validator: Option<Arc<dyn StrictPairValidator>>,
    customizer: Option<Arc<dyn MapperBuilderCustomizer>>,
    diagnostics: Option<Arc<dyn DiagnosticsSink>>,
}

impl MapperAutoConfigBuilder {
    /// 创建构建器
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self {
            catalog,
            properties: AutoconfigProperties::default(),
            context: None,
            scope_resolver: None,
            scanner: None,
            detector: None,
            extra_strategies: Vec::new(),
            pair_validator: None,
            customizer: None,
            diagnostics: None,
        }
    }

    /// 设置自动配置属性
    pub fn with_properties(mut self, properties: AutoconfigProperties) -> Self {
        self.properties = properties;
        self
    }

    /// 设置应用上下文
    pub fn with_context(mut self, context: ApplicationContext) -> Self {
        self.context = Some(Arc::new(context));
        self
    }

    /// 设置共享的应用上下文
    pub fn with_shared_context(mut self, context: Arc<ApplicationContext>) -> Self {
        self.context = Some(context);
        self
    }

    /// 设置扫描范围解析器
    pub fn with_scope_resolver<R: ScopeResolver + 'static>(mut self, resolver: R) -> Self {
        self.scope_resolver = Some(Arc::new(resolver));
        self
    }

    /// 设置候选扫描器
    pub fn with_scanner<S: CandidateScanner + 'static>(mut self, scanner: S) -> Self {
        self.scanner = Some(Arc::new(scanner));
        self
    }

    /// 设置能力检测器
    pub fn with_detector<D: CapabilityDetector + 'static>(mut self, detector: D) -> Self {
        self.detector = Some(Arc::new(detector));
        self
    }

    /// 追加构造策略，排在默认策略之后
    pub fn with_construction_strategy<S: ConstructionStrategy + 'static>(
        mut self,
        strategy: S,
    ) -> Self {
        self.extra_strategies.push(Arc::new(strategy));
        self
    }

    /// 设置严格配对校验器
    pub fn with_pair_validator<V: StrictPairValidator + 'static>(mut self, validator: V) -> Self {
        self.pair_validator = Some(Arc::new(validator));
        self
    }

    /// 设置定制器
    pub fn with_customizer<C: MapperBuilderCustomizer + 'static>(mut self, customizer: C) -> Self {
        self.customizer = Some(Arc::new(customizer));
        self
    }

    /// 设置诊断接收器
    pub fn with_diagnostics_sink(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// 构建装配器
    pub fn build(self) -> MapperAutoConfig {
        let catalog = self.catalog;

        // 逻辑安全检查额外允许从上下文中取实例
        let mut instantiator = StrategyInstantiator::new();
        let mut secured_check_instantiator =
            StrategyInstantiator::new().with_strategy(ContextBeanStrategy);
        for strategy in self.extra_strategies {
            instantiator = instantiator.with_shared_strategy(Arc::clone(&strategy));
            secured_check_instantiator = secured_check_instantiator.with_shared_strategy(strategy);
        }

        MapperAutoConfig {
            properties: self.properties,
            context: self
                .context
                .unwrap_or_else(|| Arc::new(ApplicationContext::new("default"))),
            scope_resolver: self
                .scope_resolver
                .unwrap_or_else(|| Arc::new(EntryPointScopeResolver::new(Arc::clone(&catalog)))),
            scanner: self
                .scanner
                .unwrap_or_else(|| Arc::new(CatalogCandidateScanner::new(Arc::clone(&catalog)))),
            detector: self
                .detector
                .unwrap_or_else(|| Arc::new(CatalogCapabilityDetector::new(Arc::clone(&catalog)))),
            instantiator,
            secured_check_instantiator,
            pair_validator: self
                .pair_validator
                .unwrap_or_else(|| Arc::new(PropertyCompletenessValidator)),
            customizer: self.customizer,
            diagnostics: self
                .diagnostics
                .unwrap_or_else(|| Arc::new(TracingDiagnosticsSink)),
            catalog,
        }
    }
}

/// 单次装配过程的状态
struct AssemblyPass {
    id: Uuid,
    started_at: DateTime<Utc>,
    state: AssemblyState,
    states: Vec<AssemblyState>,
}

impl AssemblyPass {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            state: AssemblyState::Idle,
            states: vec![AssemblyState::Idle],
        }
    }

    /// 转换到下一个状态；已处于该状态时不做任何事
    fn advance(&mut self, next: AssemblyState) -> AutoconfigResult<()> {
        if self.state == next {
            return Ok(());
        }
        if !self.state.can_transition_to(next) {
            return Err(AutoconfigError::BootstrapFailed {
                message: format!("非法的装配状态转换: {} -> {}", self.state, next),
            });
        }
        debug!(pass_id = %self.id, "装配状态: {} -> {}", self.state, next);
        self.state = next;
        self.states.push(next);
        Ok(())
    }

    fn fail(&mut self) {
        if self.state.can_transition_to(AssemblyState::Failed) {
            self.state = AssemblyState::Failed;
            self.states.push(AssemblyState::Failed);
        }
    }

    fn record(
        &self,
        scope: Scope,
        capabilities: CapabilityFlags,
        diagnostics: Vec<Diagnostic>,
    ) -> AssemblyRecord {
        AssemblyRecord {
            pass_id: self.id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            scope,
            capabilities,
            states: self.states.clone(),
            diagnostics,
        }
    }
}

/// 单次装配过程的诊断：转发给外部接收器，同时保存到装配记录
struct PassDiagnostics<'a> {
    entries: Mutex<Vec<Diagnostic>>,
    outer: &'a dyn DiagnosticsSink,
}

impl<'a> PassDiagnostics<'a> {
    fn new(outer: &'a dyn DiagnosticsSink) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            outer,
        }
    }

    fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }
}

impl DiagnosticsSink for PassDiagnostics<'_> {
    fn record(&self, diagnostic: Diagnostic) {
        self.entries.lock().push(diagnostic.clone());
        self.outer.record(diagnostic);
    }
}

fn feature_disabled(diagnostics: &dyn DiagnosticsSink, toggle: &str) {
    diagnostics.record(Diagnostic::new(
        DiagnosticKind::FeatureDisabled,
        toggle,
        "已被配置关闭",
    ));
}

fn contract_mismatch(diagnostics: &dyn DiagnosticsSink, candidate: &Candidate, contract: &str) {
    diagnostics.record(Diagnostic::new(
        DiagnosticKind::CandidateRejected,
        candidate.qualified_name(),
        format!("实例没有提供 {contract} 契约"),
    ));
}
