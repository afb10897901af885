//! 日志系统模块
//!
//! 提供结构化日志配置和管理功能。日志统一写入标准错误，标准输出只用于结果。

use log::LevelFilter;
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter, Layer};

/// 全局日志初始化标记
static GLOBAL_LOGGING_STATE: OnceLock<Mutex<bool>> = OnceLock::new();

/// 日志配置结构
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// 日志级别
    pub level: LevelFilter,
    /// 是否使用JSON格式
    pub json_format: bool,
    /// 是否启用ANSI颜色
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            json_format: false,
            ansi: true,
        }
    }
}

/// 日志系统
#[derive(Debug)]
pub struct LoggingSystem;

impl LoggingSystem {
    /// 初始化日志系统
    ///
    /// 重复调用是安全的：第一次调用之后不会重新安装 subscriber。
    ///
    /// # 参数
    /// * `config` - 日志配置
    ///
    /// # 返回
    /// * `Result<(), anyhow::Error>` - 初始化结果
    pub fn setup_logging(config: &LogConfig) -> anyhow::Result<()> {
        let state_mutex = GLOBAL_LOGGING_STATE.get_or_init(|| Mutex::new(false));
        let mut initialized = state_mutex
            .lock()
            .map_err(|e| anyhow::anyhow!("日志状态锁已损坏: {}", e))?;

        if !*initialized {
            Self::init_log_tracer()?;
            Self::init_tracing_subscriber(config)?;
            *initialized = true;
        }

        Ok(())
    }

    /// 初始化 LogTracer（log crate 到 tracing 的桥接）
    fn init_log_tracer() -> anyhow::Result<()> {
        use tracing_log::LogTracer;

        static LOG_TRACER_INIT: OnceLock<Result<(), String>> = OnceLock::new();

        let result = LOG_TRACER_INIT.get_or_init(|| LogTracer::init().map_err(|e| e.to_string()));

        result
            .as_ref()
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("LogTracer初始化失败: {}", e))
    }

    /// 初始化 tracing subscriber
    fn init_tracing_subscriber(config: &LogConfig) -> anyhow::Result<()> {
        // RUST_LOG 优先于配置的级别
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Self::level_to_string(config.level)));

        let fmt_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(false)
                .boxed()
        } else {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi)
                .with_target(false)
                .boxed()
        };

        match registry().with(env_filter).with(fmt_layer).try_init() {
            Ok(()) => {
                tracing::debug!("日志配置: {:?}", config);
                Ok(())
            }
            Err(e) => {
                let error_msg = e.to_string();
                // init_log_tracer 已经安装过 LogTracer，try_init 再次安装时会报第一种错误
                if error_msg.contains(
                    "attempted to set a logger after the logging system was already initialized",
                ) || error_msg.contains("a global default trace dispatcher has already been set")
                {
                    tracing::debug!("日志系统已经初始化过了");
                    Ok(())
                } else {
                    Err(anyhow::anyhow!(
                        "tracing subscriber初始化失败: {}",
                        error_msg
                    ))
                }
            }
        }
    }

    /// 将 log::LevelFilter 转换为字符串
    fn level_to_string(level: LevelFilter) -> &'static str {
        match level {
            LevelFilter::Off => "off",
            LevelFilter::Error => "error",
            LevelFilter::Warn => "warn",
            LevelFilter::Info => "info",
            LevelFilter::Debug => "debug",
            LevelFilter::Trace => "trace",
        }
    }
}
