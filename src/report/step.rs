//! 步骤结果数据结构
//!
//! 解析CI平台提供的步骤上下文（步骤名称 → 结果记录），并保留输入顺序

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 步骤结果枚举
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StepOutcome {
    /// 成功
    Success,
    /// 失败
    Failure,
    /// 已取消
    Cancelled,
    /// 已跳过
    Skipped,
    /// 其他未识别的结果
    Other(String),
}

impl From<String> for StepOutcome {
    fn from(value: String) -> Self {
        match value.as_str() {
            "success" => StepOutcome::Success,
            "failure" => StepOutcome::Failure,
            "cancelled" => StepOutcome::Cancelled,
            "skipped" => StepOutcome::Skipped,
            _ => StepOutcome::Other(value),
        }
    }
}

impl From<StepOutcome> for String {
    fn from(outcome: StepOutcome) -> Self {
        outcome.to_string()
    }
}

impl std::fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepOutcome::Success => write!(f, "success"),
            StepOutcome::Failure => write!(f, "failure"),
            StepOutcome::Cancelled => write!(f, "cancelled"),
            StepOutcome::Skipped => write!(f, "skipped"),
            StepOutcome::Other(value) => write!(f, "{value}"),
        }
    }
}

impl StepOutcome {
    /// 判断是否为失败
    pub fn is_failure(&self) -> bool {
        matches!(self, StepOutcome::Failure)
    }
}

/// 单个步骤的原始记录，忽略 `outputs` 等额外字段
#[derive(Debug, Clone, Deserialize)]
struct StepResult {
    outcome: StepOutcome,
    #[serde(default)]
    conclusion: Option<StepOutcome>,
}

/// 带名称的步骤记录
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    /// 步骤名称
    pub name: String,
    /// 执行结果（`continue-on-error` 生效之前）
    pub outcome: StepOutcome,
    /// 最终结论
    pub conclusion: Option<StepOutcome>,
}

/// 步骤上下文
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepContext {
    steps: Vec<StepRecord>,
}

impl StepContext {
    /// 解析JSON编码的步骤上下文
    ///
    /// # 参数
    /// * `raw` - JSON对象，键为步骤名称，值至少包含 `outcome` 字段
    ///
    /// # 返回
    /// * `Result<Self>` - 按输入顺序排列的步骤记录
    pub fn parse(raw: &str) -> Result<Self> {
        let map: Map<String, Value> =
            serde_json::from_str(raw).map_err(ReportError::StepContext)?;

        let mut steps = Vec::with_capacity(map.len());
        for (name, value) in map {
            let result: StepResult =
                serde_json::from_value(value).map_err(|source| ReportError::InvalidStep {
                    step: name.clone(),
                    source,
                })?;
            steps.push(StepRecord {
                name,
                outcome: result.outcome,
                conclusion: result.conclusion,
            });
        }

        Ok(Self { steps })
    }

    /// 全部步骤
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// 结果为失败的步骤，保持输入顺序
    pub fn failed_steps(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|step| step.outcome.is_failure())
    }

    /// 步骤数量
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
