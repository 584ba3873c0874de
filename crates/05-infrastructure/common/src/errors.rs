//! 错误类型定义

use std::fmt;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// 组件错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    #[error("组件扫描失败: {message}")]
    ScanError { message: String },

    #[error("组件注册失败: {type_name}, 原因: {message}")]
    RegistrationError { type_name: String, message: String },

    #[error("组件元数据无效: {type_name}, 原因: {message}")]
    InvalidMetadata { type_name: String, message: String },

    #[error("无法解析类型: {type_name}")]
    UnresolvedType { type_name: String },

    #[error("检测到循环继承: {cycle}")]
    CircularHierarchy { cycle: String },
}

impl ComponentError {
    /// 创建扫描错误
    pub fn scan_error(message: impl Into<String>) -> Self {
        Self::ScanError {
            message: message.into(),
        }
    }

    /// 创建注册错误
    pub fn registration_error(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RegistrationError {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

/// 扫描范围解析错误
///
/// 未显式配置扫描范围时，必须恰好存在一个应用入口类型。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeResolutionError {
    #[error("未找到应用入口类型，请显式配置 package_prefix")]
    NoEntryPoint,

    #[error("发现多个应用入口类型: {candidates:?}，请显式配置 package_prefix")]
    AmbiguousEntryPoint { candidates: Vec<String> },
}

/// 严格映射声明的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairDirectiveKind {
    /// 声明方为严格源，`map_to` 指向目标
    MapTo,
    /// 声明方为严格目标，`map_from` 指向源
    MapFrom,
}

impl fmt::Display for PairDirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MapTo => write!(f, "map_to"),
            Self::MapFrom => write!(f, "map_from"),
        }
    }
}

/// 严格配对失败的具体原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairingFailure {
    #[error("严格一方 {strict_side} 的属性在另一方缺失: {missing:?}")]
    MissingProperties {
        strict_side: String,
        missing: Vec<String>,
    },

    #[error("无法解析配对类型: {type_name}")]
    UnresolvedType { type_name: String },

    #[error("该类型对已经以相反的严格方向注册")]
    ConflictingStrictness,
}

/// 严格映射错误，总是致命的
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrictPairingError {
    #[error(
        "严格映射配置失败: {kind} 声明, 源类型: {source_type}, 目标类型: {target_type}, 原因: {cause}"
    )]
    InvalidPair {
        kind: PairDirectiveKind,
        source_type: String,
        target_type: String,
        #[source]
        cause: PairingFailure,
    },

    #[error("类型 {type_name} 同时声明了 map_to 与 map_from")]
    ConflictingRoles { type_name: String },
}

/// 构造错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("类型 {type_name} 不支持 {strategy} 构造方式")]
    Inapplicable { type_name: String, strategy: String },

    #[error("类型 {type_name} 通过 {strategy} 构造失败: {message}")]
    Failed {
        type_name: String,
        strategy: String,
        message: String,
    },
}

impl ConstructionError {
    /// 创建构造方式不适用错误
    pub fn inapplicable(type_name: impl Into<String>, strategy: impl Into<String>) -> Self {
        Self::Inapplicable {
            type_name: type_name.into(),
            strategy: strategy.into(),
        }
    }

    /// 创建构造失败错误
    pub fn failed(
        type_name: impl Into<String>,
        strategy: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Failed {
            type_name: type_name.into(),
            strategy: strategy.into(),
            message: message.into(),
        }
    }
}

/// 值转换错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("不支持的源值类型，期望: {expected}")]
    UnsupportedValue { expected: String },

    #[error("实体不存在: {entity}#{id}")]
    EntityNotFound { entity: String, id: String },

    #[error("上下文中没有可用的 bean: {bean}")]
    MissingBean { bean: String },
}

/// 自动配置错误类型
#[derive(Error, Debug)]
pub enum AutoconfigError {
    #[error("配置错误: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("组件错误: {source}")]
    Component {
        #[from]
        source: ComponentError,
    },

    #[error("扫描范围解析错误: {source}")]
    ScopeResolution {
        #[from]
        source: ScopeResolutionError,
    },

    #[error("严格映射错误: {source}")]
    StrictPairing {
        #[from]
        source: StrictPairingError,
    },

    #[error("构造错误: {source}")]
    Construction {
        #[from]
        source: ConstructionError,
    },

    #[error("启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ComponentResult<T> = Result<T, ComponentError>;
pub type ConstructionResult<T> = Result<T, ConstructionError>;
pub type AutoconfigResult<T> = Result<T, AutoconfigError>;
