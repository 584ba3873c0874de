//! 合并表单参数解析器的注册
//!
//! 参数解析器本身属于 Web 框架适配层，这里只决定是否注册，以及注册时交给它的协作者。

use crate::mapper::MapperConfiguration;
use crate::persistence::EntityManager;
use autoconfig_common::{
    ApplicationContext, Diagnostic, DiagnosticKind, DiagnosticsSink, OptionalFeature,
};
use discovery_abstractions::CapabilityDetector;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// 消息转换器
pub trait MessageConverter: Send + Sync {
    /// 转换器名称
    fn name(&self) -> &str;

    /// 是否支持指定的媒体类型
    fn supports(&self, media_type: &str) -> bool;
}

/// 宿主提供的 JSON 消息转换器
#[derive(Debug, Clone)]
pub struct JsonMessageConverter {
    media_types: Vec<String>,
}

impl JsonMessageConverter {
    /// 创建转换器
    pub fn new() -> Self {
        Self {
            media_types: vec!["application/json".to_string()],
        }
    }

    /// 额外支持的媒体类型
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_types.push(media_type.into());
        self
    }
}

impl Default for JsonMessageConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageConverter for JsonMessageConverter {
    fn name(&self) -> &str {
        "JsonMessageConverter"
    }

    fn supports(&self, media_type: &str) -> bool {
        self.media_types
            .iter()
            .any(|supported| supported.eq_ignore_ascii_case(media_type))
    }
}

/// 结构化 JSON 消息转换器，包装宿主的 JSON 转换器
#[derive(Debug, Clone)]
pub struct StructuredJsonMessageConverter {
    delegate: Arc<JsonMessageConverter>,
}

impl StructuredJsonMessageConverter {
    /// 创建转换器
    pub fn new(delegate: Arc<JsonMessageConverter>) -> Self {
        Self { delegate }
    }
}

impl MessageConverter for StructuredJsonMessageConverter {
    fn name(&self) -> &str {
        "StructuredJsonMessageConverter"
    }

    fn supports(&self, media_type: &str) -> bool {
        self.delegate.supports(media_type)
    }
}

/// 合并表单参数解析器的注册信息
pub struct MergedFormResolverRegistration {
    /// 映射配置
    pub configuration: Arc<MapperConfiguration>,
    /// 消息转换器列表
    pub message_converters: Vec<Arc<dyn MessageConverter>>,
    /// 实体管理器（可选）
    pub entity_manager: Option<Arc<dyn EntityManager>>,
}

impl fmt::Debug for MergedFormResolverRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converters: Vec<&str> = self
            .message_converters
            .iter()
            .map(|converter| converter.name())
            .collect();
        f.debug_struct("MergedFormResolverRegistration")
            .field("pass_id", &self.configuration.record().pass_id)
            .field("message_converters", &converters)
            .field("entity_manager", &self.entity_manager.is_some())
            .finish()
    }
}

/// 决定是否注册合并表单参数解析器
///
/// 仅在 Web 应用、仓储 Web 支持可用且上下文中存在 JSON 消息转换器时注册。
pub fn register_merged_form_resolver(
    configuration: Arc<MapperConfiguration>,
    context: &ApplicationContext,
    detector: &dyn CapabilityDetector,
    diagnostics: &dyn DiagnosticsSink,
) -> Option<MergedFormResolverRegistration> {
    if !context.is_web_application() {
        diagnostics.record(Diagnostic::new(
            DiagnosticKind::FeatureDisabled,
            "merged-form",
            "不是 Web 应用，不注册合并表单参数解析器",
        ));
        return None;
    }

    if !detector.is_feature_available(OptionalFeature::RepositoryWeb) {
        diagnostics.record(Diagnostic::new(
            DiagnosticKind::CapabilityUnavailable,
            OptionalFeature::RepositoryWeb.to_string(),
            "未检测到仓储 Web 支持，不注册合并表单参数解析器",
        ));
        return None;
    }

    let Some(json_converter) = context.get_bean::<JsonMessageConverter>() else {
        warn!("上下文中没有 JSON 消息转换器，合并表单参数解析器无法注册");
        diagnostics.record(Diagnostic::new(
            DiagnosticKind::MissingBean,
            "JsonMessageConverter",
            "上下文中没有 JSON 消息转换器，合并表单参数解析器无法注册",
        ));
        return None;
    };

    info!("注册合并表单参数解析器");
    Some(MergedFormResolverRegistration {
        configuration,
        message_converters: vec![Arc::new(StructuredJsonMessageConverter::new(json_converter))],
        entity_manager: context.get_bean::<dyn EntityManager>(),
    })
}
