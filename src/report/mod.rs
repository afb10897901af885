//! 步骤报告模块
//!
//! 检查流水线步骤结果，在存在失败时生成 HTML 报告

pub mod failure;
pub mod output;
pub mod step;
pub mod template;

// 重新导出主要类型
pub use failure::{FailureReport, FailureRow, ReportOutcome};
pub use output::{write_output_line, OutputTarget};
pub use step::{StepContext, StepOutcome, StepRecord};
pub use template::ReportTemplate;

use crate::config::types::ReportConfig;
use crate::error::Result;
use std::io::Write;
use tracing::{debug, info};

/// 步骤报告器
pub struct StepReporter {
    config: ReportConfig,
    template: ReportTemplate,
}

impl StepReporter {
    /// 使用默认模板创建报告器
    pub fn new(config: ReportConfig) -> Result<Self> {
        Ok(Self {
            config,
            template: ReportTemplate::new()?,
        })
    }

    /// 解析步骤上下文并判断结果，不产生输出
    pub fn evaluate(&self) -> Result<ReportOutcome> {
        let steps = StepContext::parse(&self.config.step_context)?;
        debug!("解析到 {} 个步骤", steps.len());

        for step in steps.failed_steps() {
            debug!("步骤失败: {} (conclusion: {:?})", step.name, step.conclusion);
        }

        let report = FailureReport::from_steps(&self.config, &steps);
        Ok(ReportOutcome::from_report(report))
    }

    /// 执行报告流程
    ///
    /// 存在失败步骤时向 `writer` 写入一行 `result=<html>`；否则不写入任何内容。
    ///
    /// # 参数
    /// * `writer` - 输出目标
    ///
    /// # 返回
    /// * `Result<ReportOutcome>` - 报告结果
    pub fn run<W: Write + ?Sized>(&self, writer: &mut W) -> Result<ReportOutcome> {
        let outcome = self.evaluate()?;

        match &outcome {
            ReportOutcome::Clean => {
                info!("作业 {} 的所有步骤均未失败", self.config.job);
            }
            ReportOutcome::FailuresFound(report) => {
                info!(
                    "作业 {} 存在 {} 个失败步骤",
                    self.config.job,
                    report.len()
                );
                let html = self.template.render(report)?;
                write_output_line(writer, &self.config.output_name, &html)?;
            }
        }

        Ok(outcome)
    }
}
