//! # 组件发现具体实现
//!
//! 基于类型目录的扫描器、能力检测器、实例化器和扫描范围解析器

pub mod detector;
pub mod instantiator;
pub mod resolver;
pub mod scanner;

pub use detector::{CatalogCapabilityDetector, StaticCapabilityDetector};
pub use instantiator::{ContextArgStrategy, ContextBeanStrategy, NoArgStrategy, StrategyInstantiator};
pub use resolver::EntryPointScopeResolver;
pub use scanner::CatalogCandidateScanner;

#[cfg(test)]
mod tests;
