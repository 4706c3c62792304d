pub mod artifacts;
pub mod pipeline;
pub mod prompts;
pub mod reporter;
pub mod steps;

pub use artifacts::ArtifactStore;
pub use pipeline::{
    PipelineError, ReportPipeline, DEFAULT_MAX_OUTPUT_TOKENS, INITIAL_REPORT_FILE,
    PERFORMANCE_REPORT_FILE,
};
pub use prompts::{expansion_request, segmentation_instructions, Locale};
pub use reporter::summarize;
pub use steps::{extract_step_count, StepMarkerError, MAX_STEP_COUNT};
