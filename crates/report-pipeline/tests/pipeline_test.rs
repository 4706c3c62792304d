//! End-to-end pipeline tests against a scripted completion provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use report_core::{ChatMessage, PricingConfig, Role, TokenUsage};
use report_llm::{Completion, CompletionError, CompletionProvider};
use report_pipeline::{
    segmentation_instructions, ArtifactStore, Locale, PipelineError, ReportPipeline,
    INITIAL_REPORT_FILE, PERFORMANCE_REPORT_FILE,
};

/// Provider that answers the segmentation call with a fixed initial report
/// and each expansion call with deterministic per-step text, optionally
/// failing at one configured step.
struct ScriptedProvider {
    initial_response: String,
    fail_at_step: Option<u32>,
    call_count: AtomicUsize,
}

impl ScriptedProvider {
    fn new(initial_response: impl Into<String>) -> Self {
        Self {
            initial_response: initial_response.into(),
            fail_at_step: None,
            call_count: AtomicUsize::new(0),
        }
    }

    fn failing_at_step(initial_response: impl Into<String>, step: u32) -> Self {
        Self {
            fail_at_step: Some(step),
            ..Self::new(initial_response)
        }
    }

    fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn requested_step(messages: &[ChatMessage]) -> Option<u32> {
        let request = messages.iter().find(|m| m.role == Role::User)?;
        let digits: String = request
            .content
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _max_output_tokens: u32,
    ) -> Result<Completion, CompletionError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let is_expansion = messages.first().map(|m| m.role) == Some(Role::Assistant);
        if !is_expansion {
            return Ok(Completion {
                text: self.initial_response.clone(),
                usage: TokenUsage {
                    prompt_tokens: 1000,
                    completion_tokens: 500,
                    total_tokens: 1500,
                },
            });
        }

        let step = Self::requested_step(messages).expect("expansion request names a step");
        if self.fail_at_step == Some(step) {
            return Err(CompletionError::Api {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }

        Ok(Completion {
            text: format!("\\section{{Step {step}}} details"),
            usage: TokenUsage {
                prompt_tokens: 200 * u64::from(step),
                completion_tokens: 100 * u64::from(step),
                total_tokens: 300 * u64::from(step),
            },
        })
    }
}

fn pipeline_with(
    provider: Arc<ScriptedProvider>,
    dir: &tempfile::TempDir,
) -> ReportPipeline {
    let artifacts = ArtifactStore::create(dir.path()).unwrap();
    ReportPipeline::new(provider, artifacts, PricingConfig::default())
}

const THREE_STEP_REPORT: &str =
    "\\begin{document} analysis [n_steps:3] [port_scan, sql_injection, privilege_escalation]";

#[tokio::test]
async fn run_expands_every_declared_step_in_order() {
    let provider = Arc::new(ScriptedProvider::new(THREE_STEP_REPORT));
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with(provider.clone(), &dir);

    let run = pipeline
        .run(segmentation_instructions(Locale::English), "log lines")
        .await
        .unwrap();

    assert_eq!(run.step_count, 3);
    assert_eq!(
        run.steps.iter().map(|s| s.index).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(run.initial_response, THREE_STEP_REPORT);
    // 1 segmentation + 3 expansions
    assert_eq!(provider.call_count(), 4);

    let summed: f64 = run.steps.iter().map(|s| s.cost_usd).sum();
    assert!((run.total_cost_usd - summed).abs() < 1e-12);
}

#[tokio::test]
async fn run_persists_all_artifacts() {
    let provider = Arc::new(ScriptedProvider::new(THREE_STEP_REPORT));
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with(provider, &dir);

    pipeline
        .run(segmentation_instructions(Locale::English), "log lines")
        .await
        .unwrap();

    let initial = std::fs::read_to_string(dir.path().join(INITIAL_REPORT_FILE)).unwrap();
    assert_eq!(initial, THREE_STEP_REPORT);
    for step in 1..=3 {
        let content =
            std::fs::read_to_string(dir.path().join(format!("expansion_step_{step}.txt")))
                .unwrap();
        assert!(content.contains(&format!("Step {step}")));
    }
    let summary = std::fs::read_to_string(dir.path().join(PERFORMANCE_REPORT_FILE)).unwrap();
    assert!(summary.contains("Total time for generating the report:"));
    assert!(summary.contains("Step 3:"));
}

#[tokio::test]
async fn run_computes_step_costs_from_usage() {
    let provider = Arc::new(ScriptedProvider::new(THREE_STEP_REPORT));
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with(provider, &dir);

    let run = pipeline
        .run(segmentation_instructions(Locale::English), "log lines")
        .await
        .unwrap();

    // Step i uses 200i prompt / 100i completion tokens at $10/$30 per million.
    for step in &run.steps {
        let i = f64::from(step.index);
        let expected = 200.0 * i / 1e6 * 10.0 + 100.0 * i / 1e6 * 30.0;
        assert!((step.cost_usd - expected).abs() < 1e-12);
        assert_eq!(step.tokens_used, 300 * u64::from(step.index));
    }
}

#[tokio::test]
async fn failure_mid_expansion_aborts_without_further_calls() {
    let provider = Arc::new(ScriptedProvider::failing_at_step(THREE_STEP_REPORT, 2));
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with(provider.clone(), &dir);

    let err = pipeline
        .run(segmentation_instructions(Locale::English), "log lines")
        .await
        .unwrap_err();

    match err {
        PipelineError::Expansion { step, .. } => assert_eq!(step, 2),
        other => panic!("expected Expansion error, got {other:?}"),
    }
    // segmentation + step 1 + failed step 2; step 3 never attempted
    assert_eq!(provider.call_count(), 3);
    // step 1's artifact survives, step 2's was never written
    assert!(dir.path().join("expansion_step_1.txt").exists());
    assert!(!dir.path().join("expansion_step_2.txt").exists());
    assert!(!dir.path().join(PERFORMANCE_REPORT_FILE).exists());
}

#[tokio::test]
async fn segmentation_failure_aborts_after_one_call() {
    struct AlwaysFailing;

    #[async_trait]
    impl CompletionProvider for AlwaysFailing {
        async fn complete(
            &self,
            _messages: &[ChatMessage],
            _max_output_tokens: u32,
        ) -> Result<Completion, CompletionError> {
            Err(CompletionError::Api {
                status: 503,
                message: "down".to_string(),
            })
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let artifacts = ArtifactStore::create(dir.path()).unwrap();
    let pipeline = ReportPipeline::new(Arc::new(AlwaysFailing), artifacts, PricingConfig::default());

    let err = pipeline.run("instructions", "logs").await.unwrap_err();
    assert!(matches!(err, PipelineError::Segmentation(_)));
    assert!(!dir.path().join(INITIAL_REPORT_FILE).exists());
}

#[tokio::test]
async fn missing_marker_fails_after_persisting_initial_report() {
    let provider = Arc::new(ScriptedProvider::new("a report with no marker"));
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline_with(provider.clone(), &dir);

    let err = pipeline
        .run(segmentation_instructions(Locale::English), "log lines")
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Marker(_)));
    // the initial response is still written as ground truth
    assert!(dir.path().join(INITIAL_REPORT_FILE).exists());
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn identical_inputs_produce_identical_records() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let run_a = pipeline_with(Arc::new(ScriptedProvider::new(THREE_STEP_REPORT)), &dir_a)
        .run(segmentation_instructions(Locale::English), "log lines")
        .await
        .unwrap();
    let run_b = pipeline_with(Arc::new(ScriptedProvider::new(THREE_STEP_REPORT)), &dir_b)
        .run(segmentation_instructions(Locale::English), "log lines")
        .await
        .unwrap();

    assert_eq!(run_a.step_count, run_b.step_count);
    for (a, b) in run_a.steps.iter().zip(&run_b.steps) {
        // durations may differ between runs; everything else is deterministic
        assert_eq!(a.index, b.index);
        assert_eq!(a.content, b.content);
        assert_eq!(a.tokens_used, b.tokens_used);
        assert_eq!(a.cost_usd, b.cost_usd);
    }
}

#[tokio::test]
async fn portuguese_locale_changes_the_expansion_request() {
    struct CapturingProvider {
        call_count: AtomicUsize,
    }

    #[async_trait]
    impl CompletionProvider for CapturingProvider {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            _max_output_tokens: u32,
        ) -> Result<Completion, CompletionError> {
            let call = self.call_count.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                return Ok(Completion {
                    text: "[n_steps:1]".to_string(),
                    usage: TokenUsage::default(),
                });
            }
            let request = &messages[1].content;
            assert!(request.contains("Etapa 1"), "got request {request:?}");
            Ok(Completion {
                text: "expandido".to_string(),
                usage: TokenUsage::default(),
            })
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let artifacts = ArtifactStore::create(dir.path()).unwrap();
    let pipeline = ReportPipeline::new(
        Arc::new(CapturingProvider {
            call_count: AtomicUsize::new(0),
        }),
        artifacts,
        PricingConfig::default(),
    )
    .with_locale(Locale::Portuguese);

    let run = pipeline
        .run(segmentation_instructions(Locale::Portuguese), "logs")
        .await
        .unwrap();
    assert_eq!(run.steps[0].content, "expandido");
}
