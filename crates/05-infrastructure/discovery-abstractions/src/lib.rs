//! # Discovery Abstractions
//!
//! 组件发现抽象层，定义装配过程中各阶段的核心接口。
//!
//! ## 核心接口
//!
//! - [`ScopeResolver`] - 扫描范围解析接口
//! - [`CandidateScanner`] - 候选类型扫描接口
//! - [`CapabilityDetector`] - 可选能力检测接口
//! - [`ConstructionStrategy`] - 构造策略接口
//! - [`Instantiator`] - 实例化接口

pub mod detector;
pub mod factory;
pub mod resolver;
pub mod scanner;

pub use detector::*;
pub use factory::*;
pub use resolver::*;
pub use scanner::*;
