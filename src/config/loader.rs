//! 配置加载器实现
//!
//! 从环境变量（或任何按名称查找的来源）构建配置，并进行显式的存在性检查

use crate::config::types::{
    validate_matrix_config, validate_report_config, DeliveryPolicy, MatrixConfig, ReportConfig,
    DEFAULT_GITHUB_SERVER_URL, DEFAULT_OUTPUT_NAME,
};
use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// 环境变量名称
pub mod vars {
    pub const MATRIX_SERVER: &str = "matrix_server";
    pub const MESSAGE: &str = "message";
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const MATRIX_ROOM: &str = "matrix_room";

    pub const STEP_CONTEXT: &str = "step_context";
    pub const JOB: &str = "job";
    pub const GH_REPO: &str = "gh_repo";
    pub const RUN_ID: &str = "run_id";
    pub const GITHUB_SERVER_URL: &str = "GITHUB_SERVER_URL";
    pub const GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";
    pub const OUTPUT_NAME: &str = "output_name";
}

/// 配置值来源
///
/// 按变量名查找配置值。进程环境、测试用的映射表以及命令行参数都实现了该trait。
pub trait EnvSource {
    /// 查找变量，不存在时返回 `None`
    fn get(&self, key: &str) -> Option<String>;
}

/// 进程环境变量
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl<S: EnvSource + ?Sized> EnvSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// 读取必需且非空的值
fn require(source: &impl EnvSource, key: &str) -> std::result::Result<String, ConfigError> {
    match source.get(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::MissingVar {
            var: key.to_string(),
        }),
    }
}

/// 读取必需且非空的值，保留原始空白
fn require_verbatim(
    source: &impl EnvSource,
    key: &str,
) -> std::result::Result<String, ConfigError> {
    match source.get(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar {
            var: key.to_string(),
        }),
    }
}

/// 读取必需的值，允许为空字符串
fn require_present(source: &impl EnvSource, key: &str) -> std::result::Result<String, ConfigError> {
    source.get(key).ok_or_else(|| ConfigError::MissingVar {
        var: key.to_string(),
    })
}

/// 读取可选值，空字符串视为未设置
fn optional(source: &impl EnvSource, key: &str) -> Option<String> {
    source
        .get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 加载 Matrix 通知配置
///
/// # 参数
/// * `source` - 配置值来源
/// * `delivery` - 投递策略
///
/// # 返回
/// * `Result<MatrixConfig>` - 验证后的配置或错误
pub fn load_matrix_config(
    source: &impl EnvSource,
    delivery: DeliveryPolicy,
) -> Result<MatrixConfig> {
    let config = MatrixConfig {
        server: require(source, vars::MATRIX_SERVER)?,
        room_id: require(source, vars::MATRIX_ROOM)?,
        access_token: require(source, vars::ACCESS_TOKEN)?,
        // 消息内容原样保留
        message: require_present(source, vars::MESSAGE)?,
        delivery,
    };

    validate_matrix_config(&config)?;
    log::debug!(
        "Matrix 配置加载完成: server={}, room={}",
        config.server,
        config.room_id
    );
    Ok(config)
}

/// 加载步骤报告器配置
///
/// # 参数
/// * `source` - 配置值来源
///
/// # 返回
/// * `Result<ReportConfig>` - 验证后的配置或错误
pub fn load_report_config(source: &impl EnvSource) -> Result<ReportConfig> {
    let config = ReportConfig {
        step_context: require_present(source, vars::STEP_CONTEXT)?,
        // 作业名原样写入报告
        job: require_verbatim(source, vars::JOB)?,
        repository: require(source, vars::GH_REPO)?,
        run_id: require(source, vars::RUN_ID)?,
        server_url: optional(source, vars::GITHUB_SERVER_URL)
            .unwrap_or_else(|| DEFAULT_GITHUB_SERVER_URL.to_string()),
        output_name: optional(source, vars::OUTPUT_NAME)
            .unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string()),
        github_output: optional(source, vars::GITHUB_OUTPUT).map(PathBuf::from),
    };

    validate_report_config(&config)?;
    log::debug!(
        "报告配置加载完成: job={}, repo={}, run_id={}",
        config.job,
        config.repository,
        config.run_id
    );
    Ok(config)
}
