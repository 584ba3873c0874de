//! 扫描范围

use serde::{Deserialize, Serialize};
use std::fmt;

/// 扫描范围：以点号分隔的命名空间前缀
///
/// 包含关系按段边界判断，`app.pkg` 包含 `app.pkg.web`，不包含 `app.pkgx`。
/// 空范围包含所有命名空间。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(String);

impl Scope {
    /// 创建扫描范围
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self(prefix.trim().trim_end_matches('.').to_string())
    }

    /// 原样保留给定字符串，不做规范化
    pub fn verbatim(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// 根范围
    pub fn root() -> Self {
        Self(String::new())
    }

    /// 从 Rust 模块路径创建，`my_app::converters` 转换为 `my_app.converters`
    pub fn from_module_path(module_path: &str) -> Self {
        Self::new(module_path.replace("::", "."))
    }

    /// 前缀字符串
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 是否为根范围
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// 命名空间是否落在此范围内（含子命名空间）
    pub fn contains(&self, namespace: &str) -> bool {
        if self.is_root() {
            return true;
        }
        namespace == self.0
            || (namespace.len() > self.0.len()
                && namespace.starts_with(self.0.as_str())
                && namespace.as_bytes()[self.0.len()] == b'.')
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Scope {
    fn from(prefix: &str) -> Self {
        Self::new(prefix)
    }
}
