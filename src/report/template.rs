//! 报告模板模块
//!
//! 使用 Handlebars 将失败报告渲染为单行 HTML

use crate::error::{ReportError, Result};
use crate::report::failure::FailureReport;
use handlebars::Handlebars;

const REPORT_TEMPLATE_NAME: &str = "failure_report";

/// 默认的失败报告模板
///
/// 表头只出现一次，每个失败步骤一行。
pub const DEFAULT_REPORT_TEMPLATE: &str = concat!(
    "<p><b>There are failures in the Github Actions pipeline for repo ",
    "<a href=\"{{repo_url}}\">{{repository}}</a></b></p>",
    "<table><tr><th>Job</th><th>Step</th><th>Status</th></tr>",
    "{{#each rows}}",
    "<tr><td><a href=\"{{run_url}}\">{{job}}</a></td><td>{{step}}</td><td>FAILED</td></tr>",
    "{{/each}}",
    "</table>",
);

/// 报告模板
pub struct ReportTemplate {
    registry: Handlebars<'static>,
}

impl ReportTemplate {
    /// 使用默认模板创建
    pub fn new() -> Result<Self> {
        Self::with_template(DEFAULT_REPORT_TEMPLATE)
    }

    /// 使用自定义模板创建
    ///
    /// # 参数
    /// * `template` - Handlebars 模板字符串
    ///
    /// # 返回
    /// * `Result<Self>` - 模板实例，模板语法错误时返回错误
    pub fn with_template(template: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry
            .register_template_string(REPORT_TEMPLATE_NAME, template)
            .map_err(|e| ReportError::Template(e.to_string()))?;

        Ok(Self { registry })
    }

    /// 渲染报告
    ///
    /// 插入的内容会被HTML转义，结果中的换行替换为空格，保证输出只有一行。
    pub fn render(&self, report: &FailureReport) -> Result<String> {
        let html = self
            .registry
            .render(REPORT_TEMPLATE_NAME, report)
            .map_err(|e| ReportError::Template(e.to_string()))?;

        Ok(collapse_line_breaks(&html))
    }
}

/// 将换行替换为空格
pub fn collapse_line_breaks(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\r', '\n'], " ")
}
