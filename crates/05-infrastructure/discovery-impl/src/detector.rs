//! 可选能力检测器实现

use autoconfig_common::TypeCatalog;
use discovery_abstractions::CapabilityDetector;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// 基于类型目录的能力检测器
///
/// 标记类型及其声明的全部传递依赖都能在目录中解析时，能力才算可用。
/// `hiding` 可以屏蔽指定类型名，用来模拟受限的运行环境。
#[derive(Debug, Clone)]
pub struct CatalogCapabilityDetector {
    catalog: Arc<TypeCatalog>,
    hidden: HashSet<String>,
}

impl CatalogCapabilityDetector {
    /// 创建检测器
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self {
            catalog,
            hidden: HashSet::new(),
        }
    }

    /// 屏蔽指定类型名
    pub fn hiding<I, S>(mut self, type_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden.extend(type_names.into_iter().map(Into::into));
        self
    }

    fn resolves(&self, type_name: &str, visited: &mut HashSet<String>) -> bool {
        if !visited.insert(type_name.to_string()) {
            // 依赖成环时，环上的类型已在解析中
            return true;
        }
        if self.hidden.contains(type_name) {
            debug!("类型已被屏蔽: {}", type_name);
            return false;
        }

        match self.catalog.resolve(type_name) {
            Some(descriptor) => descriptor
                .requires()
                .iter()
                .all(|dependency| self.resolves(dependency, visited)),
            None => {
                debug!("无法解析类型: {}", type_name);
                false
            }
        }
    }
}

impl CapabilityDetector for CatalogCapabilityDetector {
    fn is_available(&self, marker_type_name: &str) -> bool {
        let available = self.resolves(marker_type_name, &mut HashSet::new());
        debug!("能力检测: {} -> {}", marker_type_name, available);
        available
    }
}

/// 固定结果的能力检测器，用于测试
#[derive(Debug, Clone, Default)]
pub struct StaticCapabilityDetector {
    available: HashSet<String>,
}

impl StaticCapabilityDetector {
    /// 所有能力都不可用
    pub fn none() -> Self {
        Self::default()
    }

    /// 指定可用的标记类型名
    pub fn with_available<I, S>(type_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available: type_names.into_iter().map(Into::into).collect(),
        }
    }
}

impl CapabilityDetector for StaticCapabilityDetector {
    fn is_available(&self, marker_type_name: &str) -> bool {
        self.available.contains(marker_type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoconfig_common::{
        OptionalFeature, TypeDescriptor, ORM_PROXY_MARKER, PERSISTENCE_MARKER, SECURITY_MARKER,
    };

    fn catalog() -> Arc<TypeCatalog> {
        Arc::new(
            TypeCatalog::from_descriptors([
                TypeDescriptor::new(PERSISTENCE_MARKER).abstract_type(),
                TypeDescriptor::new(ORM_PROXY_MARKER)
                    .abstract_type()
                    .requiring(PERSISTENCE_MARKER),
                TypeDescriptor::new(SECURITY_MARKER)
                    .abstract_type()
                    .requiring("security.crypto.PasswordEncoder"),
            ])
            .expect("目录构建应该成功"),
        )
    }

    #[test]
    fn test_resolvable_marker_is_available() {
        let detector = CatalogCapabilityDetector::new(catalog());
        assert!(detector.is_available(PERSISTENCE_MARKER));
        assert!(detector.is_available(ORM_PROXY_MARKER));
        assert!(detector.is_feature_available(OptionalFeature::FlushHooks));
    }

    #[test]
    fn test_missing_marker_or_dependency_is_unavailable() {
        let detector = CatalogCapabilityDetector::new(catalog());
        assert!(!detector.is_available("no.such.Type"));
        // 标记存在但传递依赖缺失
        assert!(!detector.is_available(SECURITY_MARKER));
        assert!(!detector.is_feature_available(OptionalFeature::RepositoryWeb));
    }

    #[test]
    fn test_hiding_simulates_constrained_environment() {
        let detector = CatalogCapabilityDetector::new(catalog()).hiding([PERSISTENCE_MARKER]);
        assert!(!detector.is_available(PERSISTENCE_MARKER));
        // ORM 代理依赖持久化，一并不可用
        assert!(!detector.is_available(ORM_PROXY_MARKER));
    }

    #[test]
    fn test_dependency_cycle_does_not_loop() {
        let catalog = Arc::new(
            TypeCatalog::from_descriptors([
                TypeDescriptor::new("a.A").requiring("b.B"),
                TypeDescriptor::new("b.B").requiring("a.A"),
            ])
            .expect("目录构建应该成功"),
        );
        let detector = CatalogCapabilityDetector::new(catalog);
        assert!(detector.is_available("a.A"));
    }

    #[test]
    fn test_static_detector() {
        let detector = StaticCapabilityDetector::with_available([SECURITY_MARKER]);
        assert!(detector.is_feature_available(OptionalFeature::Security));
        assert!(!detector.is_feature_available(OptionalFeature::Persistence));
        assert!(!StaticCapabilityDetector::none().is_available(SECURITY_MARKER));
    }
}
