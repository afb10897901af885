//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口。各配置项既可以通过参数传入，
//! 也可以通过同名环境变量提供。

use crate::config::loader::{vars, EnvSource};
use crate::config::types::{DeliveryPolicy, DEFAULT_OUTPUT_NAME, DEFAULT_RETRY_DELAY_SECS};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// CI Notify - CI流水线通知工具
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ci-notify",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 日志级别
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        help = "日志级别",
        env = "CI_NOTIFY_LOG_LEVEL",
        global = true
    )]
    pub log_level: LogLevel,

    /// 以JSON格式输出日志
    #[arg(long, help = "以JSON格式输出日志", global = true)]
    pub json_logs: bool,

    /// 子命令
    #[command(subcommand)]
    pub command: Commands,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

/// 子命令定义
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// 向 Matrix 房间发送消息
    Notify(NotifyArgs),

    /// 检查步骤结果并生成失败报告
    Report(ReportArgs),

    /// 显示版本信息
    Version {
        /// 输出格式
        #[arg(short, long, value_enum, default_value = "text", help = "输出格式")]
        format: OutputFormat,
    },
}

/// notify 子命令参数
#[derive(ClapArgs, Debug, Clone)]
pub struct NotifyArgs {
    /// Matrix 服务器主机名
    #[arg(long, value_name = "HOST", env = vars::MATRIX_SERVER, help = "Matrix 服务器主机名")]
    pub server: Option<String>,

    /// 目标房间ID
    #[arg(long, value_name = "ROOM_ID", env = vars::MATRIX_ROOM, help = "目标房间ID")]
    pub room: Option<String>,

    /// 访问令牌
    #[arg(
        long,
        value_name = "TOKEN",
        env = vars::ACCESS_TOKEN,
        hide_env_values = true,
        help = "访问令牌"
    )]
    pub token: Option<String>,

    /// 消息内容
    #[arg(long, value_name = "TEXT", env = vars::MESSAGE, help = "消息内容")]
    pub message: Option<String>,

    /// 请求超时（秒），不指定则不设超时
    #[arg(
        long,
        value_name = "SECONDS",
        env = "CI_NOTIFY_TIMEOUT",
        help = "请求超时（秒）"
    )]
    pub timeout: Option<u64>,

    /// 失败后的重试次数
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = 0,
        env = "CI_NOTIFY_RETRIES",
        help = "失败后的重试次数"
    )]
    pub retries: u32,

    /// 重试间隔（秒）
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_RETRY_DELAY_SECS,
        help = "重试间隔（秒）"
    )]
    pub retry_delay: u64,

    /// 非2xx响应视为错误
    #[arg(long, help = "非2xx响应视为错误")]
    pub fail_on_http_error: bool,

    /// 只输出消息体，不实际发送
    #[arg(long, help = "只输出消息体，不实际发送")]
    pub dry_run: bool,
}

impl NotifyArgs {
    /// 由参数构造投递策略
    pub fn delivery_policy(&self) -> DeliveryPolicy {
        DeliveryPolicy {
            timeout: self.timeout.map(Duration::from_secs),
            retry_attempts: self.retries,
            retry_delay: Duration::from_secs(self.retry_delay),
            fail_on_http_error: self.fail_on_http_error,
        }
    }
}

impl EnvSource for NotifyArgs {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            vars::MATRIX_SERVER => self.server.clone(),
            vars::MATRIX_ROOM => self.room.clone(),
            vars::ACCESS_TOKEN => self.token.clone(),
            vars::MESSAGE => self.message.clone(),
            _ => None,
        }
    }
}

/// report 子命令参数
#[derive(ClapArgs, Debug, Clone)]
pub struct ReportArgs {
    /// JSON编码的步骤结果
    #[arg(long, value_name = "JSON", env = vars::STEP_CONTEXT, help = "JSON编码的步骤结果")]
    pub step_context: Option<String>,

    /// 作业名称
    #[arg(long, value_name = "NAME", env = vars::JOB, help = "作业名称")]
    pub job: Option<String>,

    /// 仓库标识（owner/repo）
    #[arg(long, value_name = "OWNER/REPO", env = vars::GH_REPO, help = "仓库标识")]
    pub repo: Option<String>,

    /// 运行ID
    #[arg(long, value_name = "ID", env = vars::RUN_ID, help = "运行ID")]
    pub run_id: Option<String>,

    /// GitHub服务地址
    #[arg(
        long,
        value_name = "URL",
        env = vars::GITHUB_SERVER_URL,
        help = "GitHub服务地址"
    )]
    pub server_url: Option<String>,

    /// GitHub Actions 输出文件
    #[arg(
        long,
        value_name = "FILE",
        env = vars::GITHUB_OUTPUT,
        help = "将结果追加到该文件而不是标准输出"
    )]
    pub github_output: Option<PathBuf>,

    /// 输出变量名称
    #[arg(long, value_name = "NAME", default_value = DEFAULT_OUTPUT_NAME, help = "输出变量名称")]
    pub output_name: String,
}

impl EnvSource for ReportArgs {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            vars::STEP_CONTEXT => self.step_context.clone(),
            vars::JOB => self.job.clone(),
            vars::GH_REPO => self.repo.clone(),
            vars::RUN_ID => self.run_id.clone(),
            vars::GITHUB_SERVER_URL => self.server_url.clone(),
            vars::GITHUB_OUTPUT => self
                .github_output
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            vars::OUTPUT_NAME => Some(self.output_name.clone()),
            _ => None,
        }
    }
}

/// 输出格式枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    /// 文本格式
    Text,
    /// JSON格式
    Json,
}
