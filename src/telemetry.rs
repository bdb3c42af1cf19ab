use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// 全局遥测初始化，进程启动时调用一次
/// bunyan格式的JSON日志写入标准输出，级别由`RUST_LOG`控制，默认`info`
pub fn init_subscriber(name: &str) {
    // actix-web经由`log`输出的日志也纳入trace
    LogTracer::init().expect("failed to set logger.");

    let subscriber = Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name.into(), std::io::stdout));
    set_global_default(subscriber).expect("failed to set subscriber.");
}
