//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// CI Notify 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum CiNotifyError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 通知相关错误
    #[error("通知错误: {0}")]
    Notification(#[from] NotificationError),

    /// 报告相关错误
    #[error("报告错误: {0}")]
    Report(#[from] ReportError),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 必需的环境变量缺失或为空
    #[error("缺少必需的配置项: {var}")]
    MissingVar { var: String },

    /// 配置值格式不正确
    #[error("配置项 {var} 无效: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// 通知错误类型
#[derive(Error, Debug)]
pub enum NotificationError {
    /// HTTP请求错误
    #[error("HTTP请求失败: {0}")]
    Request(#[from] reqwest::Error),

    /// 服务器返回非成功状态码
    #[error("服务器返回错误状态码 {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// 无法构造请求URL
    #[error("无效的请求URL: {0}")]
    InvalidUrl(String),

    /// HTTP客户端创建失败
    #[error("创建HTTP客户端失败: {0}")]
    Client(String),
}

/// 报告错误类型
#[derive(Error, Debug)]
pub enum ReportError {
    /// 步骤上下文不是合法的JSON或结构不符合要求
    #[error("步骤上下文解析失败: {0}")]
    StepContext(#[source] serde_json::Error),

    /// 单个步骤的记录结构不符合要求
    #[error("步骤 {step} 的记录无效: {source}")]
    InvalidStep {
        step: String,
        #[source]
        source: serde_json::Error,
    },

    /// 模板渲染错误
    #[error("报告模板渲染失败: {0}")]
    Template(String),
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, CiNotifyError>;

impl CiNotifyError {
    /// 是否为配置错误
    pub fn is_config_error(&self) -> bool {
        matches!(self, CiNotifyError::Config(_))
    }
}
