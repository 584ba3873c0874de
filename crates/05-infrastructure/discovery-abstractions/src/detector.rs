//! 可选能力检测器抽象接口

use autoconfig_common::OptionalFeature;

/// 可选能力检测器 trait
///
/// 按标记类型名判断可选依赖是否存在。任何解析失败都返回 `false`，从不 panic。
/// 检测结果只在单次装配过程内有效，调用方不得跨过程缓存。
pub trait CapabilityDetector: Send + Sync {
    /// 标记类型是否可解析
    fn is_available(&self, marker_type_name: &str) -> bool;

    /// 可选能力是否可用
    fn is_feature_available(&self, feature: OptionalFeature) -> bool {
        self.is_available(feature.marker())
    }
}
