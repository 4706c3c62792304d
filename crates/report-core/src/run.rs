use serde::{Deserialize, Serialize};

/// Outcome of expanding one attack step. Appended to the run in step order
/// and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepRecord {
    /// 1-based step index as declared by the segmentation response.
    pub index: u32,
    pub duration_secs: f64,
    pub tokens_used: u64,
    pub cost_usd: f64,
    pub content: String,
}

/// Aggregate result of one report generation run.
///
/// On success `steps` holds exactly one record per declared step, indices
/// 1..=step_count in order, with no gaps or duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRun {
    pub initial_response: String,
    pub step_count: u32,
    pub steps: Vec<StepRecord>,
    pub total_duration_secs: f64,
    pub total_cost_usd: f64,
}
