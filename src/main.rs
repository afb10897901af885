//! CI Notify 主程序入口
//!
//! CI流水线通知工具

use anyhow::{Context, Result};
use ci_notify::cli::args::{Args, Commands};
use ci_notify::cli::commands::{
    Command, CommandStatus, NotifyCommand, ReportCommand, VersionCommand, EXIT_ERROR,
};
use ci_notify::logging::{LogConfig, LoggingSystem};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> ExitCode {
    // 解析命令行参数
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("{e:#}");
        return ExitCode::from(EXIT_ERROR);
    }

    debug!("CI Notify v{} 启动", ci_notify::VERSION);

    // 执行命令
    match execute_command(&args).await {
        Ok(status) => status.into(),
        Err(e) => {
            error!("命令执行失败: {:#}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// 初始化日志系统
fn init_logging(args: &Args) -> Result<()> {
    let log_config = LogConfig {
        level: args.log_level.clone().into(),
        json_format: args.json_logs,
        ansi: std::io::stderr().is_terminal(),
    };

    LoggingSystem::setup_logging(&log_config).context("初始化日志系统失败")?;
    Ok(())
}

/// 执行CLI命令
async fn execute_command(args: &Args) -> Result<CommandStatus> {
    let command: Box<dyn Command> = match &args.command {
        Commands::Notify(notify) => Box::new(NotifyCommand {
            args: notify.clone(),
        }),
        Commands::Report(report) => Box::new(ReportCommand {
            args: report.clone(),
        }),
        Commands::Version { format } => Box::new(VersionCommand {
            format: format.clone(),
        }),
    };

    command.execute().await.map_err(anyhow::Error::from)
}
