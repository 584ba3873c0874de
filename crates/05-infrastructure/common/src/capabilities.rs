//! 可选能力
//!
//! 每个可选能力对应一个众所周知的标记类型名。宿主链接了相应适配层时，
//! 标记类型会出现在类型目录中；能力检测器只按名称解析，不直接引用实现。

use std::fmt;

/// 持久化支持（实体管理器）
pub const PERSISTENCE_MARKER: &str = "persistence.EntityManager";
/// ORM 代理支持
pub const ORM_PROXY_MARKER: &str = "orm.proxy.OrmProxy";
/// 安全支持
pub const SECURITY_MARKER: &str = "security.AuthenticationManager";
/// 仓储 Web 支持
pub const REPOSITORY_WEB_MARKER: &str = "repository.EntityInformation";

/// 可选能力
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalFeature {
    /// 持久化：ID 到实体的转换器
    Persistence,
    /// ORM 代理：感知 ORM 的去代理策略
    OrmProxy,
    /// 安全：逻辑安全检查与角色安全属性
    Security,
    /// 清理后刷新钩子
    FlushHooks,
    /// 仓储 Web：合并表单参数解析
    RepositoryWeb,
}

impl OptionalFeature {
    /// 所有可选能力，按检测顺序
    pub const ALL: [Self; 5] = [
        Self::Persistence,
        Self::OrmProxy,
        Self::Security,
        Self::FlushHooks,
        Self::RepositoryWeb,
    ];

    /// 能力对应的标记类型名
    pub fn marker(self) -> &'static str {
        match self {
            // 刷新钩子依赖实体管理器本身
            Self::Persistence | Self::FlushHooks => PERSISTENCE_MARKER,
            Self::OrmProxy => ORM_PROXY_MARKER,
            Self::Security => SECURITY_MARKER,
            Self::RepositoryWeb => REPOSITORY_WEB_MARKER,
        }
    }
}

impl fmt::Display for OptionalFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Persistence => "persistence",
            Self::OrmProxy => "orm-proxy",
            Self::Security => "security",
            Self::FlushHooks => "flush-hooks",
            Self::RepositoryWeb => "repository-web",
        };
        write!(f, "{label}")
    }
}
