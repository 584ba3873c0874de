//! 扫描范围解析器实现

use autoconfig_common::{Marker, Scope, ScopeResolutionError, TypeCatalog};
use discovery_abstractions::ScopeResolver;
use std::sync::Arc;
use tracing::{error, info};

/// 通过应用入口标记推断扫描范围
#[derive(Debug, Clone)]
pub struct EntryPointScopeResolver {
    catalog: Arc<TypeCatalog>,
}

impl EntryPointScopeResolver {
    /// 创建解析器
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self { catalog }
    }
}

impl ScopeResolver for EntryPointScopeResolver {
    fn resolve(&self, explicit_scope: Option<&str>) -> Result<Scope, ScopeResolutionError> {
        if let Some(explicit) = explicit_scope.filter(|scope| !scope.is_empty()) {
            info!("使用显式配置的扫描范围 [{}]", explicit);
            return Ok(Scope::verbatim(explicit));
        }

        info!("未配置 package_prefix，使用应用入口类型所在的命名空间");
        let entry_points: Vec<_> = self
            .catalog
            .descriptors()
            .into_iter()
            .filter(|descriptor| descriptor.has_marker(Marker::ENTRY_POINT))
            .collect();

        match entry_points.as_slice() {
            [] => {
                error!("未找到应用入口类型");
                Err(ScopeResolutionError::NoEntryPoint)
            }
            [entry_point] => {
                let scope = Scope::new(entry_point.namespace());
                info!("扫描范围 [{}]，来自入口类型 {}", scope, entry_point.qualified_name());
                Ok(scope)
            }
            many => {
                let candidates: Vec<String> = many
                    .iter()
                    .map(|descriptor| descriptor.qualified_name().to_string())
                    .collect();
                error!("发现多个应用入口类型: {:?}", candidates);
                Err(ScopeResolutionError::AmbiguousEntryPoint { candidates })
            }
        }
    }
}
