//! 构造策略与实例化器实现

use autoconfig_common::{
    ApplicationContext, ConstructionError, Diagnostic, DiagnosticKind, DiagnosticsSink, Instance,
    TypeDescriptor,
};
use discovery_abstractions::{Candidate, ConstructionStrategy, Instantiation, Instantiator};
use std::sync::Arc;
use tracing::{debug, info};

/// 无参构造
#[derive(Debug, Default, Clone, Copy)]
pub struct NoArgStrategy;

impl ConstructionStrategy for NoArgStrategy {
    fn name(&self) -> &'static str {
        "no_arg"
    }

    fn construct(
        &self,
        descriptor: &TypeDescriptor,
        _context: &ApplicationContext,
    ) -> Result<Instance, ConstructionError> {
        let constructor = descriptor
            .no_arg_constructor()
            .ok_or_else(|| ConstructionError::inapplicable(descriptor.qualified_name(), self.name()))?;
        constructor()
    }
}

/// 上下文构造
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextArgStrategy;

impl ConstructionStrategy for ContextArgStrategy {
    fn name(&self) -> &'static str {
        "with_context"
    }

    fn construct(
        &self,
        descriptor: &TypeDescriptor,
        context: &ApplicationContext,
    ) -> Result<Instance, ConstructionError> {
        let constructor = descriptor
            .context_constructor()
            .ok_or_else(|| ConstructionError::inapplicable(descriptor.qualified_name(), self.name()))?;
        constructor(context)
    }
}

/// 从上下文中按限定名查找已注册的组件 bean
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextBeanStrategy;

impl ConstructionStrategy for ContextBeanStrategy {
    fn name(&self) -> &'static str {
        "context_bean"
    }

    fn construct(
        &self,
        descriptor: &TypeDescriptor,
        context: &ApplicationContext,
    ) -> Result<Instance, ConstructionError> {
        context.get_component(descriptor.qualified_name()).ok_or_else(|| {
            ConstructionError::failed(
                descriptor.qualified_name(),
                self.name(),
                format!("上下文 [{}] 中没有该组件 bean", context.name()),
            )
        })
    }
}

/// 按优先级依次尝试构造策略的实例化器
#[derive(Clone)]
pub struct StrategyInstantiator {
    strategies: Vec<Arc<dyn ConstructionStrategy>>,
}

impl StrategyInstantiator {
    /// 默认策略：先无参构造，再上下文构造
    pub fn new() -> Self {
        Self::empty()
            .with_strategy(NoArgStrategy)
            .with_strategy(ContextArgStrategy)
    }

    /// 不含任何策略
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// 在末尾追加策略
    pub fn with_strategy<S: ConstructionStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategies.push(Arc::new(strategy));
        self
    }

    /// 在末尾追加共享策略
    pub fn with_shared_strategy(mut self, strategy: Arc<dyn ConstructionStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// 策略名称，按优先级
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.name()).collect()
    }
}

impl Default for StrategyInstantiator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StrategyInstantiator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyInstantiator")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

impl Instantiator for StrategyInstantiator {
    fn instantiate(
        &self,
        candidate: &Candidate,
        context: &ApplicationContext,
        diagnostics: &dyn DiagnosticsSink,
    ) -> Instantiation {
        let descriptor = &candidate.descriptor;
        info!("发现候选类型 [{}]，开始实例化", candidate.qualified_name());

        let mut attempted = Vec::with_capacity(self.strategies.len());
        let mut reasons = Vec::new();

        for strategy in &self.strategies {
            attempted.push(strategy.name());
            match strategy.construct(descriptor, context) {
                Ok(instance) => {
                    info!(
                        "已实例化 [{}]，构造方式: {}",
                        candidate.qualified_name(),
                        strategy.name()
                    );
                    return Instantiation::Created {
                        instance,
                        strategy: strategy.name(),
                        attempted,
                    };
                }
                Err(e) => {
                    debug!("构造方式 {} 不可用: {}", strategy.name(), e);
                    reasons.push(e);
                }
            }
        }

        let summary = reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        diagnostics.record(Diagnostic::new(
            DiagnosticKind::InstantiationSkipped,
            candidate.qualified_name(),
            format!("所有构造方式均失败，已跳过: {summary}"),
        ));

        Instantiation::Skipped { attempted, reasons }
    }
}
