//! # 映射自动配置组合层
//!
//! 这个 crate 把扫描范围解析、能力检测、候选扫描和实例化组合成一次完整的装配过程，
//! 产出交给映射引擎使用的不可变 [`MapperConfiguration`]。
//!
//! ## 主要功能
//!
//! - **装配器**: [`MapperAutoConfig`] 按固定顺序驱动各个类别的发现和注册
//! - **属性加载**: 通过 `config` crate 从配置文件和环境变量加载 [`AutoconfigProperties`]
//! - **严格映射**: 校验并登记 `map_to` / `map_from` 声明
//! - **可选集成**: 持久化、安全、ORM 去代理、合并表单参数解析
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use autoconfig_composition::{AutoconfigProperties, MapperAutoConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let properties = AutoconfigProperties::load(None)?;
//!     let configuration = MapperAutoConfig::from_global(properties)
//!         .build()
//!         .assemble()?;
//!
//!     println!("{}", configuration.summary().to_json()?);
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod customizer;
pub mod logging;
pub mod mapper;
pub mod pairs;
pub mod persistence;
pub mod properties;
pub mod state;
pub mod web;

// 重新导出主要类型
pub use assembler::{AssemblyError, MapperAutoConfig, MapperAutoConfigBuilder};
pub use customizer::MapperBuilderCustomizer;
pub use logging::{init_logging, LoggingConfig};
pub use mapper::{
    ConfigurationSummary, MapperBuilder, MapperConfiguration, Registered,
    SecuredPropertyHandler, StrictMappingConvention, StrictPair, StrictPairRegistry, StrictSide,
    UnproxyStrategy,
};
pub use pairs::{PropertyCompletenessValidator, StrictPairValidator};
pub use persistence::{
    AfterClearFlusher, EntityManager, IdToEntityConverter, PersistenceAfterClearFlusher,
};
pub use properties::{AutoconfigProperties, DiagnosticsDetailLevel, FeatureToggles};
pub use state::{AssemblyRecord, AssemblyState, CapabilityFlags};
pub use web::{
    register_merged_form_resolver, JsonMessageConverter, MergedFormResolverRegistration,
    MessageConverter, StructuredJsonMessageConverter,
};

// 重新导出错误类型
pub use autoconfig_common::AutoconfigError;

#[cfg(test)]
mod tests;
