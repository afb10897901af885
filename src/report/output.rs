//! 结构化输出模块
//!
//! 以 `name=value` 单行格式输出结果，供CI编排读取为命名输出变量

use crate::config::types::ReportConfig;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// 输出目标
#[derive(Debug, Clone, PartialEq)]
pub enum OutputTarget {
    /// 标准输出
    Stdout,
    /// 追加到 GitHub Actions 的输出文件
    GithubOutput(PathBuf),
}

impl OutputTarget {
    /// 根据报告配置选择输出目标
    pub fn from_config(config: &ReportConfig) -> Self {
        match &config.github_output {
            Some(path) => OutputTarget::GithubOutput(path.clone()),
            None => OutputTarget::Stdout,
        }
    }

    /// 打开输出目标
    pub fn open(&self) -> io::Result<Box<dyn Write>> {
        match self {
            OutputTarget::Stdout => Ok(Box::new(io::stdout())),
            OutputTarget::GithubOutput(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Ok(Box::new(file))
            }
        }
    }
}

/// 写入一行 `name=value`
///
/// 值中的换行会被替换为空格。
pub fn write_output_line<W: Write + ?Sized>(writer: &mut W, name: &str, value: &str) -> io::Result<()> {
    let value = crate::report::template::collapse_line_breaks(value);
    writeln!(writer, "{name}={value}")?;
    writer.flush()
}
