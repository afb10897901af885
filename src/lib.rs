//! CI Notify - CI流水线通知工具
//!
//! 提供两个独立的命令：
//! - 向 Matrix 房间发送聊天消息
//! - 检查流水线步骤结果并生成 HTML 失败报告

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod notification;
pub mod report;

// 重新导出主要类型
pub use config::{DeliveryPolicy, MatrixConfig, ReportConfig};
pub use error::CiNotifyError;
pub use notification::{ChatMessage, ChatSender, MatrixSender};
pub use report::{FailureReport, ReportOutcome, StepReporter};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
