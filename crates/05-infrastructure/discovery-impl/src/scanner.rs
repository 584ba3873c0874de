//! 基于类型目录的候选类型扫描器

use autoconfig_common::{
    CapabilityPredicate, Diagnostic, DiagnosticKind, DiagnosticsSink, Scope, TypeCatalog,
};
use discovery_abstractions::{Candidate, CandidateScanner};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// 基于类型目录的候选类型扫描器
#[derive(Debug, Clone)]
pub struct CatalogCandidateScanner {
    catalog: Arc<TypeCatalog>,
}

impl CatalogCandidateScanner {
    /// 创建扫描器
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self { catalog }
    }
}

impl CandidateScanner for CatalogCandidateScanner {
    fn scan(
        &self,
        scope: &Scope,
        predicate: &CapabilityPredicate,
        diagnostics: &dyn DiagnosticsSink,
    ) -> Vec<Candidate> {
        debug!("扫描候选类型: 范围=[{}], 条件=[{}]", scope, predicate);

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for descriptor in self.catalog.descriptors() {
            if descriptor.is_abstract() || !scope.contains(descriptor.namespace()) {
                continue;
            }

            match predicate.matches(&descriptor, &self.catalog) {
                Ok(true) => {
                    if seen.insert(descriptor.qualified_name().to_string()) {
                        debug!("发现候选类型: {}", descriptor.qualified_name());
                        candidates.push(Candidate::new(descriptor));
                    }
                }
                Ok(false) => {}
                Err(e) => diagnostics.record(Diagnostic::new(
                    DiagnosticKind::CandidateRejected,
                    descriptor.qualified_name(),
                    format!("类型元数据无效，已排除: {e}"),
                )),
            }
        }

        debug!("扫描完成，共 {} 个候选类型", candidates.len());
        candidates
    }

    fn name(&self) -> &str {
        "CatalogCandidateScanner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoconfig_common::{Contract, DiagnosticsLog, Marker, TypeDescriptor};

    fn catalog() -> Arc<TypeCatalog> {
        Arc::new(
            TypeCatalog::from_descriptors([
                TypeDescriptor::new("lib.BaseConverter")
                    .abstract_type()
                    .implementing(Contract::bean_converter()),
                TypeDescriptor::new("app.pkg.MoneyConverter").implementing(Contract::bean_converter()),
                TypeDescriptor::new("app.pkg.web.DateConverter").extending("lib.BaseConverter"),
                TypeDescriptor::new("app.pkg.AbstractLocal")
                    .abstract_type()
                    .implementing(Contract::bean_converter()),
                TypeDescriptor::new("app.pkgx.Outside").implementing(Contract::bean_converter()),
                TypeDescriptor::new("app.pkg.ListHandler").implementing(Contract::collection_handler()),
                TypeDescriptor::new("app.pkg.Broken")
                    .implementing(Contract::bean_converter())
                    .extending("missing.Base"),
                TypeDescriptor::new("app.pkg.PersonForm").mapped_to("app.pkg.Person"),
            ])
            .expect("目录构建应该成功"),
        )
    }

    fn names(candidates: &[Candidate]) -> HashSet<String> {
        candidates
            .iter()
            .map(|candidate| candidate.qualified_name().to_string())
            .collect()
    }

    #[test]
    fn test_scan_returns_exactly_assignable_concrete_types() {
        let scanner = CatalogCandidateScanner::new(catalog());
        let log = DiagnosticsLog::new();

        let found = scanner.scan(
            &Scope::new("app.pkg"),
            &CapabilityPredicate::Implements(Contract::bean_converter()),
            &log,
        );

        // Broken 自身声明了契约，不需要沿继承链解析
        let expected: HashSet<String> = [
            "app.pkg.MoneyConverter",
            "app.pkg.web.DateConverter",
            "app.pkg.Broken",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(names(&found), expected);
        assert!(log.is_empty());
    }

    #[test]
    fn test_malformed_candidate_is_excluded_with_diagnostic() {
        let scanner = CatalogCandidateScanner::new(catalog());
        let log = DiagnosticsLog::new();

        let found = scanner.scan(
            &Scope::new("app.pkg"),
            &CapabilityPredicate::Implements(Contract::collection_handler()),
            &log,
        );

        assert_eq!(
            names(&found),
            HashSet::from(["app.pkg.ListHandler".to_string()])
        );
        let rejected = log.of_kind(DiagnosticKind::CandidateRejected);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].subject, "app.pkg.Broken");
    }

    #[test]
    fn test_scope_boundary_and_markers() {
        let scanner = CatalogCandidateScanner::new(catalog());
        let log = DiagnosticsLog::new();

        let web_only = scanner.scan(
            &Scope::new("app.pkg.web"),
            &CapabilityPredicate::Implements(Contract::bean_converter()),
            &log,
        );
        assert_eq!(
            names(&web_only),
            HashSet::from(["app.pkg.web.DateConverter".to_string()])
        );

        let pairs = scanner.scan(
            &Scope::new("app"),
            &CapabilityPredicate::Annotated(Marker::BEAN_MAP_TO),
            &log,
        );
        assert_eq!(names(&pairs), HashSet::from(["app.pkg.PersonForm".to_string()]));
    }

    #[test]
    fn test_empty_scope_yields_nothing_outside_catalog() {
        let scanner = CatalogCandidateScanner::new(Arc::new(TypeCatalog::new()));
        let log = DiagnosticsLog::new();
        let found = scanner.scan(
            &Scope::new("app"),
            &CapabilityPredicate::Extends("lib.BaseConverter".to_string()),
            &log,
        );
        assert!(found.is_empty());
    }
}
