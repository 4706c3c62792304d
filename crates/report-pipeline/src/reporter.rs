use std::fmt::Write;

use report_core::ReportRun;

/// Render the performance summary: total duration and cost followed by one
/// block per step, in step order. Durations are rounded to 2 decimal places
/// and costs to 5; the underlying run keeps full precision.
pub fn summarize(run: &ReportRun) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total time for generating the report: {:.2} seconds",
        run.total_duration_secs
    );
    let _ = writeln!(out, "Estimated total cost: ${:.5}", run.total_cost_usd);
    out.push('\n');

    for step in &run.steps {
        let _ = writeln!(out, "Step {}:", step.index);
        let _ = writeln!(out, "  Time: {:.2} seconds", step.duration_secs);
        let _ = writeln!(out, "  Tokens used: {}", step.tokens_used);
        let _ = writeln!(out, "  Estimated cost: ${:.5}", step.cost_usd);
        out.push('\n');
    }

    out
}
