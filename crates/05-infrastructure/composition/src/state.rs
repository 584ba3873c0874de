//! 装配状态机与装配记录

use autoconfig_common::{Diagnostic, OptionalFeature, Scope};
use chrono::{DateTime, Utc};
use discovery_abstractions::CapabilityDetector;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// 装配状态
///
/// `Idle -> ScopeResolved -> CapabilitiesDetected -> (Scanning <-> Instantiating)* -> Assembled`，
/// 任意非终态都可以进入终态 `Failed`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyState {
    /// 尚未开始
    Idle,
    /// 扫描范围已确定
    ScopeResolved,
    /// 可选能力已检测
    CapabilitiesDetected,
    /// 正在扫描某个类别
    Scanning,
    /// 正在实例化某个类别的候选
    Instantiating,
    /// 装配完成
    Assembled,
    /// 致命失败
    Failed,
}

impl AssemblyState {
    /// 是否为终态
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Assembled | Self::Failed)
    }

    /// 是否允许转换到 `next`
    ///
    /// 类别之间允许 `Instantiating -> Scanning`，除此之外没有回退。
    pub fn can_transition_to(self, next: Self) -> bool {
        use AssemblyState::{
            Assembled, CapabilitiesDetected, Failed, Idle, Instantiating, ScopeResolved, Scanning,
        };

        match (self, next) {
            (from, Failed) => !from.is_terminal(),
            (Idle, ScopeResolved)
            | (ScopeResolved, CapabilitiesDetected)
            | (CapabilitiesDetected | Instantiating, Scanning)
            | (Scanning, Instantiating)
            | (CapabilitiesDetected | Scanning | Instantiating, Assembled) => true,
            _ => false,
        }
    }
}

impl fmt::Display for AssemblyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::ScopeResolved => "scope_resolved",
            Self::CapabilitiesDetected => "capabilities_detected",
            Self::Scanning => "scanning",
            Self::Instantiating => "instantiating",
            Self::Assembled => "assembled",
            Self::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// 单次装配过程的能力标志
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CapabilityFlags {
    /// 持久化
    pub persistence: bool,
    /// ORM 代理
    pub orm_proxy: bool,
    /// 安全
    pub security: bool,
    /// 清理后刷新钩子
    pub flush_hooks: bool,
    /// 仓储 Web
    pub repository_web: bool,
}

impl CapabilityFlags {
    /// 对每个可选能力检测一次
    pub fn detect(detector: &dyn CapabilityDetector) -> Self {
        let mut flags = Self::default();
        for feature in OptionalFeature::ALL {
            flags.set(feature, detector.is_feature_available(feature));
        }
        flags
    }

    /// 查询能力
    pub fn get(&self, feature: OptionalFeature) -> bool {
        match feature {
            OptionalFeature::Persistence => self.persistence,
            OptionalFeature::OrmProxy => self.orm_proxy,
            OptionalFeature::Security => self.security,
            OptionalFeature::FlushHooks => self.flush_hooks,
            OptionalFeature::RepositoryWeb => self.repository_web,
        }
    }

    fn set(&mut self, feature: OptionalFeature, available: bool) {
        match feature {
            OptionalFeature::Persistence => self.persistence = available,
            OptionalFeature::OrmProxy => self.orm_proxy = available,
            OptionalFeature::Security => self.security = available,
            OptionalFeature::FlushHooks => self.flush_hooks = available,
            OptionalFeature::RepositoryWeb => self.repository_web = available,
        }
    }
}

/// 装配记录
#[derive(Debug, Clone)]
pub struct AssemblyRecord {
    /// 装配过程ID
    pub pass_id: Uuid,
    /// 开始时间
    pub started_at: DateTime<Utc>,
    /// 完成时间
    pub finished_at: DateTime<Utc>,
    /// 解析出的扫描范围
    pub scope: Scope,
    /// 能力标志
    pub capabilities: CapabilityFlags,
    /// 经过的状态，按顺序
    pub states: Vec<AssemblyState>,
    /// 本次装配产生的诊断
    pub diagnostics: Vec<Diagnostic>,
}
