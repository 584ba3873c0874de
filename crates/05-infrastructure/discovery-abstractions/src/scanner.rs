//! 候选类型扫描器抽象接口
//!
//! 在扫描范围内发现满足能力谓词的具体类型

use autoconfig_common::{CapabilityPredicate, DiagnosticsSink, Scope, TypeDescriptor};
use std::sync::Arc;

/// 候选类型
///
/// 扫描产生、随即交给实例化器消费的临时对象。
#[derive(Debug, Clone)]
pub struct Candidate {
    /// 解析后的描述符
    pub descriptor: Arc<TypeDescriptor>,
}

impl Candidate {
    /// 创建候选类型
    pub fn new(descriptor: Arc<TypeDescriptor>) -> Self {
        Self { descriptor }
    }

    /// 限定名
    pub fn qualified_name(&self) -> &str {
        self.descriptor.qualified_name()
    }
}

/// 候选类型扫描器 trait
///
/// 扫描是纯发现操作：不产生实例，单个候选的元数据异常只记录诊断并排除该候选。
/// 返回结果按限定名去重，调用方不能依赖其顺序。
pub trait CandidateScanner: Send + Sync {
    /// 扫描范围内满足谓词的具体类型
    fn scan(
        &self,
        scope: &Scope,
        predicate: &CapabilityPredicate,
        diagnostics: &dyn DiagnosticsSink,
    ) -> Vec<Candidate>;

    /// 获取扫描器名称
    fn name(&self) -> &str;
}
