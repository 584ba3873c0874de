//! 构造策略与实例化器抽象接口
//!
//! 实例化器按优先级依次尝试构造策略，第一个成功的策略胜出；
//! 全部失败时记录诊断并跳过该候选。

use crate::Candidate;
use autoconfig_common::{
    ApplicationContext, ConstructionError, DiagnosticsSink, Instance, TypeDescriptor,
};
use std::fmt;

/// 构造策略 trait
///
/// 从 (描述符, 上下文) 到 (实例 | 失败) 的纯函数。
pub trait ConstructionStrategy: Send + Sync {
    /// 策略名称
    fn name(&self) -> &'static str;

    /// 尝试构造
    fn construct(
        &self,
        descriptor: &TypeDescriptor,
        context: &ApplicationContext,
    ) -> Result<Instance, ConstructionError>;
}

/// 实例化结果
pub enum Instantiation {
    /// 构造成功
    Created {
        /// 实例
        instance: Instance,
        /// 成功的策略
        strategy: &'static str,
        /// 按顺序尝试过的策略（含成功的那个）
        attempted: Vec<&'static str>,
    },
    /// 所有策略都失败，候选被跳过
    Skipped {
        /// 按顺序尝试过的策略
        attempted: Vec<&'static str>,
        /// 各策略的失败原因
        reasons: Vec<ConstructionError>,
    },
}

impl Instantiation {
    /// 取出实例
    pub fn into_instance(self) -> Option<Instance> {
        match self {
            Self::Created { instance, .. } => Some(instance),
            Self::Skipped { .. } => None,
        }
    }

    /// 尝试过的策略
    pub fn attempted(&self) -> &[&'static str] {
        match self {
            Self::Created { attempted, .. } | Self::Skipped { attempted, .. } => attempted,
        }
    }

    /// 是否被跳过
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

impl fmt::Debug for Instantiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created {
                instance,
                strategy,
                attempted,
            } => f
                .debug_struct("Created")
                .field("instance", &instance.name())
                .field("strategy", strategy)
                .field("attempted", attempted)
                .finish(),
            Self::Skipped { attempted, reasons } => f
                .debug_struct("Skipped")
                .field("attempted", attempted)
                .field("reasons", reasons)
                .finish(),
        }
    }
}

/// 实例化器 trait
pub trait Instantiator: Send + Sync {
    /// 实例化候选类型，失败时向诊断接收器记录跳过
    fn instantiate(
        &self,
        candidate: &Candidate,
        context: &ApplicationContext,
        diagnostics: &dyn DiagnosticsSink,
    ) -> Instantiation;
}
