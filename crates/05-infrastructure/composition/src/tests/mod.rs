//! 测试模块

pub mod fixtures;
