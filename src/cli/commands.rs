//! 命令处理逻辑
//!
//! 实现各种CLI命令的处理逻辑

use crate::cli::args::{NotifyArgs, OutputFormat, ReportArgs};
use crate::config::{load_matrix_config, load_report_config};
use crate::error::Result;
use crate::notification::{ChatMessage, ChatSender, DryRunSender, MatrixSender};
use crate::report::{OutputTarget, ReportOutcome, StepReporter};
use async_trait::async_trait;
use std::process::ExitCode;
use tracing::info;

/// 命令执行状态
///
/// 与错误分开：命令自身出错时通过 `Err` 返回。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// 正常完成
    Success,
    /// 流水线中存在失败步骤，已生成报告
    FailuresFound,
}

/// 工具自身出错时的退出码
pub const EXIT_ERROR: u8 = 2;

impl CommandStatus {
    /// 对应的进程退出码
    pub fn exit_code(self) -> u8 {
        match self {
            CommandStatus::Success => 0,
            CommandStatus::FailuresFound => 1,
        }
    }
}

impl From<CommandStatus> for ExitCode {
    fn from(status: CommandStatus) -> Self {
        ExitCode::from(status.exit_code())
    }
}

/// 命令处理器trait
#[async_trait]
pub trait Command: Send + Sync {
    /// 执行命令
    async fn execute(&self) -> Result<CommandStatus>;
}

/// 版本命令
pub struct VersionCommand {
    pub format: OutputFormat,
}

#[async_trait]
impl Command for VersionCommand {
    async fn execute(&self) -> Result<CommandStatus> {
        match self.format {
            OutputFormat::Json => {
                let version_info = serde_json::json!({
                    "name": crate::APP_NAME,
                    "version": crate::VERSION,
                    "description": crate::APP_DESCRIPTION
                });
                println!("{}", serde_json::to_string_pretty(&version_info)?);
            }
            OutputFormat::Text => {
                println!("{} v{}", crate::APP_NAME, crate::VERSION);
                println!("{}", crate::APP_DESCRIPTION);
            }
        }
        Ok(CommandStatus::Success)
    }
}

/// 通知命令
pub struct NotifyCommand {
    pub args: NotifyArgs,
}

impl NotifyCommand {
    /// 根据参数选择发送器
    fn sender(&self) -> Result<Box<dyn ChatSender>> {
        if self.args.dry_run {
            Ok(Box::new(DryRunSender))
        } else {
            Ok(Box::new(MatrixSender::new(self.args.delivery_policy())?))
        }
    }
}

#[async_trait]
impl Command for NotifyCommand {
    async fn execute(&self) -> Result<CommandStatus> {
        let config = load_matrix_config(&self.args, self.args.delivery_policy())?;
        let message = ChatMessage::from_config(&config);

        info!("发送消息到 Matrix 房间 {}", message.room_id);
        let receipt = self.sender()?.send_message(&message).await?;

        // 原样输出服务器响应
        println!("{}", receipt.body);
        Ok(CommandStatus::Success)
    }
}

/// 报告命令
pub struct ReportCommand {
    pub args: ReportArgs,
}

#[async_trait]
impl Command for ReportCommand {
    async fn execute(&self) -> Result<CommandStatus> {
        let config = load_report_config(&self.args)?;

        let target = OutputTarget::from_config(&config);
        let reporter = StepReporter::new(config)?;
        let mut writer = target.open()?;

        match reporter.run(&mut writer)? {
            ReportOutcome::Clean => Ok(CommandStatus::Success),
            ReportOutcome::FailuresFound(_) => Ok(CommandStatus::FailuresFound),
        }
    }
}
