//! 失败报告数据结构
//!
//! 从步骤上下文中筛选失败步骤，生成有序的报告行

use crate::config::types::ReportConfig;
use crate::report::step::StepContext;
use serde::Serialize;

/// 报告中的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRow {
    /// 作业名称
    pub job: String,
    /// 步骤名称
    pub step: String,
    /// 运行页面地址
    pub run_url: String,
}

/// 失败报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureReport {
    /// 仓库标识（owner/repo）
    pub repository: String,
    /// 仓库页面地址
    pub repo_url: String,
    /// 失败行，保持步骤上下文中的顺序
    pub rows: Vec<FailureRow>,
}

impl FailureReport {
    /// 根据配置和步骤上下文构建报告
    ///
    /// # 参数
    /// * `config` - 报告配置
    /// * `steps` - 已解析的步骤上下文
    ///
    /// # 返回
    /// * `Self` - 报告，没有失败步骤时 `rows` 为空
    pub fn from_steps(config: &ReportConfig, steps: &StepContext) -> Self {
        let run_url = config.run_url();
        let rows = steps
            .failed_steps()
            .map(|step| FailureRow {
                job: config.job.clone(),
                step: step.name.clone(),
                run_url: run_url.clone(),
            })
            .collect();

        Self {
            repository: config.repository.clone(),
            repo_url: config.repo_url(),
            rows,
        }
    }

    /// 是否没有失败步骤
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 失败步骤数量
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// 报告结果
///
/// 区分"流水线存在失败"与报告器自身出错：后者通过 `Err` 返回。
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// 没有失败步骤
    Clean,
    /// 存在失败步骤
    FailuresFound(FailureReport),
}

impl ReportOutcome {
    /// 由报告构造结果
    pub fn from_report(report: FailureReport) -> Self {
        if report.is_empty() {
            ReportOutcome::Clean
        } else {
            ReportOutcome::FailuresFound(report)
        }
    }

    /// 是否存在失败步骤
    pub fn has_failures(&self) -> bool {
        matches!(self, ReportOutcome::FailuresFound(_))
    }
}
