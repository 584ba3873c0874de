//! # 示例应用程序
//!
//! 演示映射自动配置：演示类型通过 `#[discoverable]` 注册到全局类型目录，
//! 应用加载属性后执行一次装配，输出配置摘要和诊断。

mod components;

use anyhow::Context;
use autoconfig_common::{ApplicationContext, DiagnosticsLog, Scope};
use autoconfig_composition::{
    init_logging, AutoconfigProperties, EntityManager, JsonMessageConverter, LoggingConfig,
    MapperAutoConfig,
};
use clap::Parser;
use components::InMemoryEntityManager;
use discovery_impl::CatalogCapabilityDetector;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "映射自动配置示例应用")]
struct Args {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 扫描范围，覆盖配置文件
    #[arg(long)]
    package_prefix: Option<String>,

    /// 屏蔽的标记类型，用来模拟缺失的可选依赖
    #[arg(long = "hide")]
    hidden: Vec<String>,

    /// 作为 Web 应用运行
    #[arg(long)]
    web: bool,

    /// 不在上下文中放入实体管理器
    #[arg(long)]
    without_entity_manager: bool,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 使用 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志
    let logging = if args.json_logs {
        LoggingConfig::production()
    } else {
        LoggingConfig::default()
    };
    init_logging(&logging.with_level(parse_log_level(&args.log_level)))?;

    info!("启动映射自动配置示例应用");

    let mut properties =
        AutoconfigProperties::load(args.config.as_deref()).context("加载自动配置属性失败")?;
    if let Some(package_prefix) = &args.package_prefix {
        properties = properties.with_package_prefix(package_prefix.clone());
    }

    let context = build_context(&args);
    let diagnostics = Arc::new(DiagnosticsLog::new());

    let mut builder = MapperAutoConfig::from_global(properties)
        .with_shared_context(Arc::clone(&context))
        .with_diagnostics_sink(diagnostics.clone());
    if !args.hidden.is_empty() {
        builder = builder.with_detector(
            CatalogCapabilityDetector::new(autoconfig_common::global_type_catalog())
                .hiding(args.hidden.iter().cloned()),
        );
    }
    let assembler = builder.build();

    let configuration = Arc::new(assembler.assemble().context("映射配置装配失败")?);
    let summary = configuration.summary();
    println!("{}", summary.to_json()?);

    match assembler.register_merged_form_resolver(Arc::clone(&configuration)) {
        Some(registration) => info!("合并表单参数解析器已注册: {:?}", registration),
        None => info!("未注册合并表单参数解析器"),
    }

    print_diagnostics(&diagnostics);
    demonstrate_scope(configuration.package_prefixes());

    info!("示例应用结束");
    Ok(())
}

/// 构建应用上下文
fn build_context(args: &Args) -> Arc<ApplicationContext> {
    let mut context = ApplicationContext::new("example-app").web_application(args.web);

    if !args.without_entity_manager {
        let entity_manager: Arc<dyn EntityManager> =
            Arc::new(InMemoryEntityManager::default().with_product(1, "Lamp"));
        context = context.with_bean::<dyn EntityManager>(entity_manager);
    }
    if args.web {
        context = context.with_bean(Arc::new(JsonMessageConverter::new()));
    }

    Arc::new(context)
}

/// 输出诊断
fn print_diagnostics(diagnostics: &DiagnosticsLog) {
    let entries = diagnostics.entries();
    if entries.is_empty() {
        info!("没有诊断");
        return;
    }

    for diagnostic in entries {
        if diagnostic.kind.is_warning() {
            warn!("{}", diagnostic);
        } else {
            info!("{}", diagnostic);
        }
    }
}

/// 演示扫描范围匹配
fn demonstrate_scope(prefixes: &[Scope]) {
    for prefix in prefixes {
        for namespace in ["demo.shop.web", "demo.shopping"] {
            info!(
                "扫描范围 [{}] 是否包含 [{}]: {}",
                prefix,
                namespace,
                prefix.contains(namespace)
            );
        }
    }
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
