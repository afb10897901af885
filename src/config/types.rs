//! 配置类型定义
//!
//! 定义通知器和步骤报告器使用的配置结构，以及配置验证逻辑

use crate::error::ConfigError;
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

/// 默认的GitHub服务地址
pub const DEFAULT_GITHUB_SERVER_URL: &str = "https://github.com";

/// 默认的输出变量名称
pub const DEFAULT_OUTPUT_NAME: &str = "result";

/// 默认的重试间隔（秒）
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

/// 消息投递策略
///
/// 默认值与一次性发送保持一致：无超时、不重试、不检查状态码。
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPolicy {
    /// 请求超时时间，`None` 表示不设超时
    pub timeout: Option<Duration>,
    /// 失败后的重试次数
    pub retry_attempts: u32,
    /// 重试间隔
    pub retry_delay: Duration,
    /// 非2xx响应是否视为错误
    pub fail_on_http_error: bool,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            timeout: None,
            retry_attempts: 0,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            fail_on_http_error: false,
        }
    }
}

/// Matrix 通知配置
#[derive(Debug, Clone)]
pub struct MatrixConfig {
    /// 服务器主机名（不含协议）
    pub server: String,
    /// 目标房间ID
    pub room_id: String,
    /// 访问令牌
    pub access_token: String,
    /// 消息内容
    pub message: String,
    /// 投递策略
    pub delivery: DeliveryPolicy,
}

/// 步骤报告器配置
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// JSON编码的步骤结果
    pub step_context: String,
    /// 作业名称
    pub job: String,
    /// 仓库标识（owner/repo）
    pub repository: String,
    /// 运行ID
    pub run_id: String,
    /// GitHub服务地址
    pub server_url: String,
    /// 输出变量名称
    pub output_name: String,
    /// GitHub Actions 输出文件（可选）
    pub github_output: Option<PathBuf>,
}

impl ReportConfig {
    /// 仓库页面地址
    pub fn repo_url(&self) -> String {
        format!("{}/{}", self.server_url.trim_end_matches('/'), self.repository)
    }

    /// 本次运行的页面地址
    pub fn run_url(&self) -> String {
        format!("{}/actions/runs/{}", self.repo_url(), self.run_id)
    }
}

fn repository_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").expect("仓库标识正则表达式无效")
    })
}

fn invalid(var: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        var: var.to_string(),
        reason: reason.into(),
    }
}

/// 验证 Matrix 配置
pub fn validate_matrix_config(config: &MatrixConfig) -> Result<(), ConfigError> {
    let server = config.server.as_str();
    if server.contains("://") {
        return Err(invalid("matrix_server", "应为主机名，不应包含协议前缀"));
    }
    if server.contains('/') || server.contains('?') || server.contains('#') {
        return Err(invalid("matrix_server", "应为主机名，不应包含路径"));
    }
    if server.chars().any(char::is_whitespace) {
        return Err(invalid("matrix_server", "不能包含空白字符"));
    }
    Ok(())
}

/// 验证报告配置
pub fn validate_report_config(config: &ReportConfig) -> Result<(), ConfigError> {
    if !repository_regex().is_match(&config.repository) {
        return Err(invalid("gh_repo", "应为 owner/repo 格式"));
    }
    if !config.run_id.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("run_id", "应为数字"));
    }
    if !(config.server_url.starts_with("https://") || config.server_url.starts_with("http://")) {
        return Err(invalid("GITHUB_SERVER_URL", "应以 http:// 或 https:// 开头"));
    }
    if config.output_name.is_empty()
        || config.output_name.contains('=')
        || config.output_name.contains('\n')
    {
        return Err(invalid("output_name", "不能为空，且不能包含 '=' 或换行"));
    }
    Ok(())
}
