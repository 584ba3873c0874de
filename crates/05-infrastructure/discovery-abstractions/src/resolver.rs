//! 扫描范围解析器抽象接口

use autoconfig_common::{Scope, ScopeResolutionError};

/// 扫描范围解析器 trait
pub trait ScopeResolver: Send + Sync {
    /// 解析扫描范围
    ///
    /// 非空的显式范围原样返回，不校验是否存在；否则从应用入口类型推断。
    fn resolve(&self, explicit_scope: Option<&str>) -> Result<Scope, ScopeResolutionError>;
}
