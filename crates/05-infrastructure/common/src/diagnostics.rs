//! 装配诊断
//!
//! 非致命问题（候选跳过、可选能力缺失、元数据异常）记录到诊断接收器，
//! 由装配器显式传递给扫描器和实例化器，而不是依赖全局日志。

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fmt;
use tracing::{info, warn};

/// 诊断种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// 候选类型无法通过任何构造方式实例化，已跳过
    InstantiationSkipped,
    /// 可选依赖不可用
    CapabilityUnavailable,
    /// 候选类型元数据异常或不满足契约，已排除
    CandidateRejected,
    /// 功能被配置关闭或前置条件不满足
    FeatureDisabled,
    /// 上下文中缺少所需的 bean
    MissingBean,
}

impl DiagnosticKind {
    /// 是否应以警告级别输出
    pub fn is_warning(self) -> bool {
        matches!(
            self,
            Self::InstantiationSkipped | Self::CandidateRejected | Self::MissingBean
        )
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InstantiationSkipped => "instantiation-skipped",
            Self::CapabilityUnavailable => "capability-unavailable",
            Self::CandidateRejected => "candidate-rejected",
            Self::FeatureDisabled => "feature-disabled",
            Self::MissingBean => "missing-bean",
        };
        write!(f, "{label}")
    }
}

/// 单条诊断
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断种类
    pub kind: DiagnosticKind,
    /// 相关的类型或功能
    pub subject: String,
    /// 描述
    pub message: String,
    /// 记录时间
    pub at: DateTime<Utc>,
}

impl Diagnostic {
    /// 创建诊断
    pub fn new(kind: DiagnosticKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
            at: Utc::now(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.subject, self.message)
    }
}

/// 诊断接收器
pub trait DiagnosticsSink: Send + Sync {
    /// 记录一条诊断
    fn record(&self, diagnostic: Diagnostic);
}

/// 内存诊断日志，记录的同时输出到 tracing
#[derive(Debug, Default)]
pub struct DiagnosticsLog {
    entries: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticsLog {
    /// 创建空日志
    pub fn new() -> Self {
        Self::default()
    }

    /// 所有诊断的快照
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    /// 指定种类的诊断
    pub fn of_kind(&self, kind: DiagnosticKind) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .iter()
            .filter(|diagnostic| diagnostic.kind == kind)
            .cloned()
            .collect()
    }

    /// 诊断数量
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// 清空并返回所有诊断
    pub fn drain(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock())
    }
}

impl DiagnosticsSink for DiagnosticsLog {
    fn record(&self, diagnostic: Diagnostic) {
        emit(&diagnostic);
        self.entries.lock().push(diagnostic);
    }
}

/// 只输出到 tracing 的诊断接收器
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnosticsSink;

impl DiagnosticsSink for TracingDiagnosticsSink {
    fn record(&self, diagnostic: Diagnostic) {
        emit(&diagnostic);
    }
}

fn emit(diagnostic: &Diagnostic) {
    if diagnostic.kind.is_warning() {
        warn!(kind = %diagnostic.kind, subject = %diagnostic.subject, "{}", diagnostic.message);
    } else {
        info!(kind = %diagnostic.kind, subject = %diagnostic.subject, "{}", diagnostic.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_records_and_filters() {
        let log = DiagnosticsLog::new();
        assert!(log.is_empty());

        log.record(Diagnostic::new(
            DiagnosticKind::InstantiationSkipped,
            "app.pkg.Broken",
            "没有可用的构造方式",
        ));
        log.record(Diagnostic::new(
            DiagnosticKind::CapabilityUnavailable,
            "security",
            "未检测到安全支持",
        ));

        assert_eq!(log.len(), 2);
        let skipped = log.of_kind(DiagnosticKind::InstantiationSkipped);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].subject, "app.pkg.Broken");

        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_warning_levels() {
        assert!(DiagnosticKind::InstantiationSkipped.is_warning());
        assert!(DiagnosticKind::MissingBean.is_warning());
        assert!(!DiagnosticKind::CapabilityUnavailable.is_warning());
        assert!(!DiagnosticKind::FeatureDisabled.is_warning());
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::new(DiagnosticKind::MissingBean, "EntityManager", "缺失");
        assert_eq!(diagnostic.to_string(), "[missing-bean] EntityManager: 缺失");
    }
}
