//! 自动配置属性
//!
//! 属性可以编程构建，也可以通过 `config` crate 从配置文件和环境变量加载。
//! 环境变量使用 `MAPPER_` 前缀，`__` 表示嵌套，例如 `MAPPER_FEATURES__SECURED_CHECKS=false`。

use autoconfig_common::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error, info};

/// 诊断详细级别，交给映射引擎在映射时使用
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticsDetailLevel {
    /// 关闭
    #[default]
    Disabled,
    /// 只输出摘要
    Summary,
    /// 输出完整的映射过程
    Full,
}

impl DiagnosticsDetailLevel {
    /// 是否启用
    pub fn is_enabled(self) -> bool {
        self != Self::Disabled
    }
}

/// 功能开关
///
/// 与能力检测相互独立：开关关闭时该类别不会尝试，即使依赖可用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    /// 扫描值转换器
    pub converters: bool,
    /// 扫描集合处理器
    pub collection_handlers: bool,
    /// 注册严格映射声明
    pub bean_pairs: bool,
    /// 持久化相关：ID 到实体的转换器
    pub persistence: bool,
    /// 清理后刷新钩子
    pub flush_hooks: bool,
    /// 逻辑安全检查
    pub secured_checks: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            converters: true,
            collection_handlers: true,
            bean_pairs: true,
            persistence: true,
            flush_hooks: true,
            secured_checks: true,
        }
    }
}

/// 自动配置属性
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoconfigProperties {
    /// 扫描范围；为空时从应用入口类型推断
    pub package_prefix: Option<String>,
    /// 是否使用感知 ORM 的去代理策略
    pub use_orm_unproxy: bool,
    /// 是否应用严格映射命名约定
    pub apply_strict_mapping_convention: bool,
    /// 是否处理受保护属性
    pub apply_secured_properties: bool,
    /// 严格源的类型名后缀
    pub strict_source_suffix: String,
    /// 严格目标的类型名后缀
    pub strict_target_suffix: String,
    /// 诊断详细级别
    pub diagnostics_level: DiagnosticsDetailLevel,
    /// 功能开关
    pub features: FeatureToggles,
}

impl Default for AutoconfigProperties {
    fn default() -> Self {
        Self {
            package_prefix: None,
            use_orm_unproxy: true,
            apply_strict_mapping_convention: true,
            apply_secured_properties: true,
            strict_source_suffix: "Form".to_string(),
            strict_target_suffix: "Result".to_string(),
            diagnostics_level: DiagnosticsDetailLevel::Disabled,
            features: FeatureToggles::default(),
        }
    }
}

impl AutoconfigProperties {
    /// 默认环境变量前缀
    pub const ENV_PREFIX: &'static str = "MAPPER";

    /// 从可选的配置文件和 `MAPPER_` 环境变量加载
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with_prefix(path, Self::ENV_PREFIX)
    }

    /// 使用指定的环境变量前缀加载
    pub fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> ConfigResult<Self> {
        Self::load_from_sources(path, env_prefix, None)
    }

    /// 使用给定的变量表代替进程环境变量加载
    pub fn load_with_variables(
        path: Option<&Path>,
        env_prefix: &str,
        variables: config::Map<String, String>,
    ) -> ConfigResult<Self> {
        Self::load_from_sources(path, env_prefix, Some(variables))
    }

    fn load_from_sources(
        path: Option<&Path>,
        env_prefix: &str,
        variables: Option<config::Map<String, String>>,
    ) -> ConfigResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            info!("加载配置文件: {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }

        debug!("加载环境变量，前缀: {}", env_prefix);
        builder = builder.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(variables),
        );

        let settings = builder.build().map_err(|e| {
            error!("配置构建失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        let properties: Self = settings.try_deserialize().map_err(|e| {
            error!("配置绑定失败: {}", e);
            ConfigError::ParseError {
                source: Box::new(e),
            }
        })?;

        properties.validate()?;
        Ok(properties)
    }

    /// 校验属性
    pub fn validate(&self) -> ConfigResult<()> {
        if self.apply_strict_mapping_convention
            && (self.strict_source_suffix.trim().is_empty()
                || self.strict_target_suffix.trim().is_empty())
        {
            return Err(ConfigError::validation(
                "启用严格映射约定时 strict_source_suffix 与 strict_target_suffix 不能为空",
            ));
        }
        Ok(())
    }

    /// 设置扫描范围
    pub fn with_package_prefix(mut self, package_prefix: impl Into<String>) -> Self {
        self.package_prefix = Some(package_prefix.into());
        self
    }

    /// 设置是否使用 ORM 去代理
    pub fn with_orm_unproxy(mut self, enabled: bool) -> Self {
        self.use_orm_unproxy = enabled;
        self
    }

    /// 设置是否处理受保护属性
    pub fn with_secured_properties(mut self, enabled: bool) -> Self {
        self.apply_secured_properties = enabled;
        self
    }

    /// 设置诊断详细级别
    pub fn with_diagnostics_level(mut self, level: DiagnosticsDetailLevel) -> Self {
        self.diagnostics_level = level;
        self
    }

    /// 设置功能开关
    pub fn with_features(mut self, features: FeatureToggles) -> Self {
        self.features = features;
        self
    }
}
