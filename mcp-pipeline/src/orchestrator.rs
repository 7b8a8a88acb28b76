//! Request orchestrator: collect, retrieve, build, complete.

use std::sync::Arc;
use std::time::Instant;

use ai_llm_service::config::default_config::config_completion;
use ai_llm_service::telemetry::AUDIT_TARGET;
use ai_llm_service::{CompletionModel, ModelAdapter};
use rag_store::{DocumentStore, StoreConfig, build_store};
use tracing::{debug, info, instrument, warn};

use crate::api_types::{McpAnswer, UserInput};
use crate::cfg::PipelineConfig;
use crate::collector::collect;
use crate::error::PipelineError;
use crate::progress::{NoopProgress, Progress, TracingProgress};
use crate::prompt::build_prompt;
use crate::retrieve::Retriever;

const STAGES: u64 = 4;

/// Runs one request through the pipeline.
///
/// Stateless between calls; share it behind `Arc` across tasks.
pub struct McpOrchestrator {
    retriever: Retriever,
    model: Arc<dyn CompletionModel>,
    cfg: PipelineConfig,
    progress: Arc<dyn Progress>,
}

impl McpOrchestrator {
    /// Wires a store and a model with the given settings.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        model: Arc<dyn CompletionModel>,
        cfg: PipelineConfig,
    ) -> Self {
        let retriever = Retriever::new(store)
            .with_top_k(cfg.top_k)
            .with_dedup(cfg.dedup);
        Self {
            retriever,
            model,
            cfg,
            progress: Arc::new(NoopProgress),
        }
    }

    /// Builds store, model and settings from environment variables.
    ///
    /// Stage progress is reported through [`TracingProgress`].
    ///
    /// # Errors
    /// Propagates store, model and pipeline configuration errors.
    pub fn from_env() -> Result<Self, PipelineError> {
        // 1) Pipeline knobs
        let cfg = PipelineConfig::from_env()?;

        // 2) Store
        let store_cfg = StoreConfig::from_env()?;
        let store = build_store(&store_cfg)?;

        // 3) Model
        let model = Arc::new(ModelAdapter::new(config_completion()?)?);

        info!(
            store = store.name(),
            model = model.model_id(),
            top_k = cfg.top_k,
            dedup = cfg.dedup,
            max_prompt_bytes = cfg.max_prompt_chars,
            "orchestrator ready"
        );
        Ok(Self::new(store, model, cfg).with_progress(Arc::new(TracingProgress)))
    }

    /// Attaches a progress reporter notified at each stage.
    pub fn with_progress(mut self, progress: Arc<dyn Progress>) -> Self {
        self.progress = progress;
        self
    }

    /// Returns the model's answer for `input`.
    ///
    /// # Errors
    /// See [`McpOrchestrator::run_detailed`].
    pub async fn run(&self, input: &UserInput) -> Result<String, PipelineError> {
        Ok(self.run_detailed(input).await?.answer)
    }

    /// Returns the answer together with the documents used for it.
    ///
    /// # Errors
    /// - [`PipelineError::Store`] when retrieval fails
    /// - [`PipelineError::MissingContextKey`] when the context is incomplete
    /// - [`PipelineError::Model`] when the completion call fails
    /// - [`PipelineError::EmptyCompletion`] when the model returns no text or
    ///   only whitespace
    #[instrument(skip_all, fields(store = self.retriever.store_name(), model = self.model.model_id()))]
    pub async fn run_detailed(&self, input: &UserInput) -> Result<McpAnswer, PipelineError> {
        let started = Instant::now();
        let prog = self.progress.as_ref();
        prog.set_total(STAGES);

        // 1) Collect
        prog.step("collecting context");
        let ctx = collect(input);

        // 2) Retrieve by topic
        prog.step("retrieving documents");
        let documents = self.retriever.retrieve(&input.topic).await?;

        // 3) Build prompt
        prog.step("building prompt");
        let prompt = build_prompt(&documents, &ctx, self.cfg.max_prompt_chars)?;
        debug!(docs = documents.len(), prompt_bytes = prompt.len(), "prompt built");

        // 4) Complete
        prog.step("calling model");
        let answer = match self.model.complete(&prompt).await? {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                warn!("model returned no completion");
                prog.finish("no completion");
                return Err(PipelineError::EmptyCompletion);
            }
        };
        prog.finish("done");

        info!(
            target: AUDIT_TARGET,
            user = %input.user_name,
            topic = %input.topic,
            docs = documents.len(),
            prompt_bytes = prompt.len(),
            answer_bytes = answer.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "request answered"
        );

        Ok(McpAnswer {
            answer,
            prompt_chars: prompt.len(),
            documents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use ai_llm_service::{AiLlmError, CompletionFuture};
    use ai_llm_service::error_handler::ConfigError;
    use rag_store::{InMemoryStore, RagError, SearchFuture};

    /// Progress reporter recording every stage message.
    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl Progress for RecordingProgress {
        fn set_total(&self, n: u64) {
            self.events.lock().unwrap().push(format!("total {n}"));
        }
        fn step(&self, msg: &str) {
            self.events.lock().unwrap().push(format!("step {msg}"));
        }
        fn finish(&self, msg: &str) {
            self.events.lock().unwrap().push(format!("finish {msg}"));
        }
    }

    /// Store returning a fixed list and recording queries.
    struct FixedStore {
        docs: Vec<String>,
        queries: Mutex<Vec<String>>,
    }

    impl FixedStore {
        fn new(docs: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                docs: docs.iter().map(|s| s.to_string()).collect(),
                queries: Mutex::new(Vec::new()),
            })
        }
    }

    impl DocumentStore for FixedStore {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn search<'a>(&'a self, query: &'a str) -> SearchFuture<'a> {
            self.queries.lock().unwrap().push(query.to_string());
            let docs = self.docs.clone();
            Box::pin(async move { Ok(docs) })
        }
    }

    struct BrokenStore;

    impl DocumentStore for BrokenStore {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn search<'a>(&'a self, _query: &'a str) -> SearchFuture<'a> {
            Box::pin(async { Err(RagError::Config("offline".into())) })
        }
    }

    /// Model returning a canned reply and recording prompts.
    struct CannedModel {
        reply: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedModel {
        fn new(reply: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    impl CompletionModel for CannedModel {
        fn model_id(&self) -> &str {
            "canned"
        }

        fn complete<'a>(&'a self, prompt: &'a str) -> CompletionFuture<'a> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let reply = self.reply.clone();
            Box::pin(async move { Ok(reply) })
        }
    }

    struct FailingModel;

    impl CompletionModel for FailingModel {
        fn model_id(&self) -> &str {
            "failing"
        }

        fn complete<'a>(&'a self, _prompt: &'a str) -> CompletionFuture<'a> {
            Box::pin(async { Err(AiLlmError::from(ConfigError::MissingVar("LLM_ENDPOINT"))) })
        }
    }

    #[tokio::test]
    async fn end_to_end_returns_model_text() {
        let store = FixedStore::new(&["ValveDoc"]);
        let model = CannedModel::new(Some("Check the valve seal."));
        let orch = McpOrchestrator::new(store.clone(), model.clone(), PipelineConfig::default());

        let answer = orch.run(&UserInput::new("Bob", "Valves")).await.unwrap();
        assert_eq!(answer, "Check the valve seal.");

        assert_eq!(*store.queries.lock().unwrap(), vec!["Valves".to_string()]);
        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(
            prompts[0],
            "User: Bob\nTopic: Valves\n\nDocuments:\nValveDoc\n\nAnswer:"
        );
    }

    #[tokio::test]
    async fn detailed_run_reports_documents() {
        let store = FixedStore::new(&["DocA", "DocB", "DocA"]);
        let model = CannedModel::new(Some("ok"));
        let cfg = PipelineConfig {
            dedup: true,
            ..Default::default()
        };
        let orch = McpOrchestrator::new(store, model, cfg).with_progress(Arc::new(TracingProgress));

        let out = orch.run_detailed(&UserInput::new("Ann", "Docs")).await.unwrap();
        assert_eq!(out.documents, vec!["DocA", "DocB"]);
        assert_eq!(out.prompt_chars, "User: Ann\nTopic: Docs\n\nDocuments:\nDocA\n\nDocB\n\nAnswer:".len());
    }

    #[tokio::test]
    async fn empty_completion_is_an_error_not_a_panic() {
        let orch = McpOrchestrator::new(
            FixedStore::new(&[]),
            CannedModel::new(None),
            PipelineConfig::default(),
        );
        let err = orch.run(&UserInput::new("Bob", "Valves")).await.unwrap_err();
        assert!(matches!(err, PipelineError::EmptyCompletion));
    }

    #[tokio::test]
    async fn store_failure_skips_model_call() {
        let model = CannedModel::new(Some("never"));
        let orch = McpOrchestrator::new(Arc::new(BrokenStore), model.clone(), PipelineConfig::default());
        let err = orch.run(&UserInput::new("Bob", "Valves")).await.unwrap_err();
        assert!(matches!(err, PipelineError::Store(_)));
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn model_failure_is_propagated() {
        let orch = McpOrchestrator::new(
            FixedStore::new(&["ValveDoc"]),
            Arc::new(FailingModel),
            PipelineConfig::default(),
        );
        let err = orch.run(&UserInput::new("Bob", "Valves")).await.unwrap_err();
        assert!(matches!(err, PipelineError::Model(_)));
    }

    #[tokio::test]
    async fn in_memory_store_feeds_matching_documents() {
        let store = Arc::new(InMemoryStore::from_texts([
            "Pumps need priming before start.",
            "Valves leak when the seal wears.",
        ]));
        let model = CannedModel::new(Some("Prime the pump."));
        let orch = McpOrchestrator::new(store, model.clone(), PipelineConfig::default());

        let out = orch.run_detailed(&UserInput::new("Alice", "pumps")).await.unwrap();
        assert_eq!(out.answer, "Prime the pump.");
        assert_eq!(out.documents, vec!["Pumps need priming before start."]);
        assert!(model.prompts.lock().unwrap()[0].contains("Pumps need priming"));
    }

    #[tokio::test]
    async fn prompt_budget_is_applied() {
        let model = CannedModel::new(Some("ok"));
        let cfg = PipelineConfig {
            max_prompt_chars: 10,
            ..Default::default()
        };
        let orch = McpOrchestrator::new(FixedStore::new(&["a long document"]), model.clone(), cfg);
        orch.run(&UserInput::new("Bob", "Valves")).await.unwrap();
        assert_eq!(
            model.prompts.lock().unwrap()[0],
            "User: Bob\nTopic: Valves\n\nDocuments:\n\n\nAnswer:"
        );
    }

    #[tokio::test]
    async fn blank_completion_is_treated_as_empty() {
        let orch = McpOrchestrator::new(
            FixedStore::new(&["ValveDoc"]),
            CannedModel::new(Some("  \n ")),
            PipelineConfig::default(),
        );
        let err = orch.run(&UserInput::new("Bob", "Valves")).await.unwrap_err();
        assert!(matches!(err, PipelineError::EmptyCompletion));

        let orch = McpOrchestrator::new(
            FixedStore::new(&["ValveDoc"]),
            CannedModel::new(Some("")),
            PipelineConfig::default(),
        );
        assert!(matches!(
            orch.run(&UserInput::new("Bob", "Valves")).await,
            Err(PipelineError::EmptyCompletion)
        ));
    }

    #[tokio::test]
    async fn progress_sees_every_stage() {
        let progress = Arc::new(RecordingProgress::default());
        let orch = McpOrchestrator::new(
            FixedStore::new(&["ValveDoc"]),
            CannedModel::new(Some("ok")),
            PipelineConfig::default(),
        )
        .with_progress(progress.clone());

        orch.run(&UserInput::new("Bob", "Valves")).await.unwrap();
        assert_eq!(
            *progress.events.lock().unwrap(),
            vec![
                "total 4",
                "step collecting context",
                "step retrieving documents",
                "step building prompt",
                "step calling model",
                "finish done",
            ]
        );
    }

    #[tokio::test]
    async fn prompt_size_is_reported_in_bytes() {
        let orch = McpOrchestrator::new(
            FixedStore::new(&["Ventil für Pumpen"]),
            CannedModel::new(Some("ok")),
            PipelineConfig::default(),
        );
        let out = orch.run_detailed(&UserInput::new("Jörg", "Ventil")).await.unwrap();
        let prompt = "User: Jörg\nTopic: Ventil\n\nDocuments:\nVentil für Pumpen\n\nAnswer:";
        assert_eq!(out.prompt_chars, prompt.len());
        assert!(out.prompt_chars > prompt.chars().count());
    }
}
