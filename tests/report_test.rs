//! 步骤报告测试
//!
//! 测试失败步骤的筛选、报告格式和结果区分

use ci_notify::config::{load_report_config, vars};
use ci_notify::report::{ReportOutcome, StepReporter};
use std::collections::HashMap;

fn reporter(step_context: &str) -> StepReporter {
    let env: HashMap<String, String> = [
        (vars::STEP_CONTEXT, step_context),
        (vars::JOB, "ci"),
        (vars::GH_REPO, "acme/widget"),
        (vars::RUN_ID, "42"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let config = load_report_config(&env).unwrap();
    StepReporter::new(config).unwrap()
}

fn run(step_context: &str) -> (ReportOutcome, String) {
    let mut buf = Vec::new();
    let outcome = reporter(step_context).run(&mut buf).unwrap();
    (outcome, String::from_utf8(buf).unwrap())
}

#[test]
fn test_scenario_one_failing_step() {
    let (outcome, output) =
        run(r#"{"build": {"outcome": "success"}, "test": {"outcome": "failure"}}"#);

    assert!(outcome.has_failures());
    assert_eq!(output.lines().count(), 1);
    assert!(output.starts_with("result="));
    assert!(output.contains(
        "<tr><td><a href=\"https://github.com/acme/widget/actions/runs/42\">ci</a></td>\
         <td>test</td><td>FAILED</td></tr>"
    ));
    assert!(!output.contains("<td>build</td>"));
}

#[test]
fn test_scenario_all_steps_succeeded() {
    let (outcome, output) = run(r#"{"build": {"outcome": "success"}}"#);

    assert_eq!(outcome, ReportOutcome::Clean);
    assert!(output.is_empty());
}

#[test]
fn test_empty_context_is_clean() {
    let (outcome, output) = run("{}");
    assert_eq!(outcome, ReportOutcome::Clean);
    assert!(output.is_empty());
}

#[test]
fn test_non_failure_outcomes_are_ignored() {
    let (outcome, output) = run(
        r#"{"a": {"outcome": "cancelled"}, "b": {"outcome": "skipped"}, "c": {"outcome": "neutral"}}"#,
    );
    assert_eq!(outcome, ReportOutcome::Clean);
    assert!(output.is_empty());
}

#[test]
fn test_rows_follow_input_order() {
    let (outcome, output) = run(
        r#"{"zeta": {"outcome": "failure"}, "build": {"outcome": "success"}, "alpha": {"outcome": "failure"}, "mid": {"outcome": "failure"}}"#,
    );

    let ReportOutcome::FailuresFound(report) = outcome else {
        panic!("expected failures");
    };
    let steps: Vec<&str> = report.rows.iter().map(|r| r.step.as_str()).collect();
    assert_eq!(steps, vec!["zeta", "alpha", "mid"]);

    let zeta = output.find("<td>zeta</td>").unwrap();
    let alpha = output.find("<td>alpha</td>").unwrap();
    let mid = output.find("<td>mid</td>").unwrap();
    assert!(zeta < alpha && alpha < mid);
    assert_eq!(output.matches("FAILED").count(), 3);
}

#[test]
fn test_header_structure_independent_of_row_count() {
    let (_, one) = run(r#"{"a": {"outcome": "failure"}}"#);
    let (_, many) = run(
        r#"{"a": {"outcome": "failure"}, "b": {"outcome": "failure"}, "c": {"outcome": "failure"}}"#,
    );

    let header_end = "</tr>";
    let one_header = &one[..one.find(header_end).unwrap()];
    let many_header = &many[..many.find(header_end).unwrap()];
    assert_eq!(one_header, many_header);

    assert_eq!(many.matches("<th>Job</th>").count(), 1);
    assert_eq!(many.matches("There are failures").count(), 1);
    assert!(many.contains("<a href=\"https://github.com/acme/widget\">acme/widget</a>"));
}

#[test]
fn test_output_is_idempotent() {
    let context = r#"{"build": {"outcome": "failure"}, "test": {"outcome": "failure"}}"#;
    let (first_outcome, first) = run(context);
    let (second_outcome, second) = run(context);

    assert_eq!(first, second);
    assert_eq!(first_outcome, second_outcome);
}

#[test]
fn test_malformed_context_is_an_error() {
    let mut buf = Vec::new();
    let result = reporter(r#"{"build": "#).run(&mut buf);
    assert!(result.is_err());
    assert!(buf.is_empty());
}

#[test]
fn test_entry_without_outcome_is_an_error() {
    let mut buf = Vec::new();
    let result = reporter(r#"{"build": {"status": "failure"}}"#).run(&mut buf);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("build"));
}
