//! Flow orchestration: workspace → inputs → engine → output → cleanup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fcserve_core::config::AppConfig;
use tracing::{debug, info, instrument, warn};

use crate::assets::AssetStore;
use crate::catalog::Catalog;
use crate::error::EngineError;
use crate::extractor::OutputExtractor;
use crate::invoker::{EngineInvocation, EngineInvoker};
use crate::materializer::InputMaterializer;
use crate::metrics::{EngineMetrics, MetricsSnapshot};
use crate::models::{Flow, OutputArtifact};
use crate::workspace::Workspace;

/// The engine-backed request pipeline.
///
/// Cheap to clone; holds no per-request state. Each call to [`Pipeline::info`]
/// or [`Pipeline::build`] gets its own workspace and engine process.
#[derive(Debug, Clone)]
pub struct Pipeline {
    catalog: Catalog,
    assets: Arc<AssetStore>,
    invoker: EngineInvoker,
    executable: String,
    temp_root: PathBuf,
    metrics: Arc<EngineMetrics>,
}

impl Pipeline {
    /// Create a pipeline from configuration and a loaded asset store.
    ///
    /// Creates the workspace root if it does not exist yet.
    pub fn new(config: &AppConfig, assets: Arc<AssetStore>) -> Result<Self, EngineError> {
        let temp_root = config.engine.effective_temp_root();
        std::fs::create_dir_all(&temp_root).map_err(EngineError::WorkspaceCreate)?;

        Ok(Self {
            catalog: Catalog::from_config(&config.catalog),
            assets,
            invoker: EngineInvoker::from_config(&config.engine),
            executable: config.engine.executable.clone(),
            temp_root,
            metrics: Arc::new(EngineMetrics::new()),
        })
    }

    /// Model files currently in the models directory.
    pub async fn list(&self) -> Result<Vec<String>, EngineError> {
        self.catalog.list_models().await
    }

    /// Run the info flow for `filename`.
    pub async fn info(&self, filename: &str) -> Result<OutputArtifact, EngineError> {
        self.run(Flow::Info, filename, None).await
    }

    /// Run the build flow for `filename` with a caller-supplied configuration.
    pub async fn build(
        &self,
        filename: &str,
        config_payload: &[u8],
    ) -> Result<OutputArtifact, EngineError> {
        self.run(Flow::Build, filename, Some(config_payload)).await
    }

    #[instrument(skip(self, flow, config_payload), fields(flow = %flow))]
    async fn run(
        &self,
        flow: Flow,
        filename: &str,
        config_payload: Option<&[u8]>,
    ) -> Result<OutputArtifact, EngineError> {
        Catalog::validate_name(filename)?;
        self.check_reserved(flow, filename)?;

        let mut workspace = Workspace::acquire(&self.temp_root, flow).await?;
        let result = self
            .run_in_workspace(flow, filename, config_payload, &workspace)
            .await;
        workspace.release().await;

        match &result {
            Err(e) if e.is_client_error() => debug!(file = %filename, error = %e, "Flow rejected"),
            Err(e) => warn!(file = %filename, error = %e, "Flow failed"),
            Ok(_) => {}
        }
        result
    }

    async fn run_in_workspace(
        &self,
        flow: Flow,
        filename: &str,
        config_payload: Option<&[u8]>,
        workspace: &Workspace,
    ) -> Result<OutputArtifact, EngineError> {
        let source = self.catalog.resolve(filename).await?;
        let input =
            InputMaterializer::copy_source(&source, workspace, flow.input_name(filename)).await?;

        let mut args = vec![input];
        if flow.takes_config() {
            let payload = config_payload.unwrap_or_default();
            args.push(InputMaterializer::write_config(workspace, payload).await?);
        }

        let script = InputMaterializer::write_script(workspace, self.assets.for_flow(flow)).await?;
        let output = workspace.join(flow.output_name());
        args.push(output.clone());

        let invocation =
            EngineInvocation::new(&self.executable, script, args).in_dir(workspace.path());

        self.metrics.record_started();
        let outcome = match self.invoker.invoke(&invocation).await {
            Ok(outcome) => outcome,
            Err(e) => {
                match e {
                    EngineError::Timeout { .. } => self.metrics.record_timeout(),
                    _ => self.metrics.record_failure(),
                }
                return Err(e);
            }
        };

        let artifact = match self.extract(flow, &output).await {
            Ok(artifact) => artifact,
            Err(e) => {
                match e {
                    EngineError::OutputMissing { .. } => self.metrics.record_output_missing(),
                    _ => self.metrics.record_failure(),
                }
                return Err(e);
            }
        };

        self.metrics
            .record_success(outcome.elapsed, artifact.len() as u64);
        info!(
            file = %filename,
            bytes = artifact.len(),
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "Flow completed"
        );

        Ok(artifact)
    }

    async fn extract(&self, flow: Flow, output: &Path) -> Result<OutputArtifact, EngineError> {
        OutputExtractor::extract(output, flow.content_type(), flow.suggested_filename()).await
    }

    /// The staged source must not share a name with another file this
    /// flow writes into the workspace.
    fn check_reserved(&self, flow: Flow, filename: &str) -> Result<(), EngineError> {
        let staged = flow.input_name(filename);
        let collides = staged == flow.output_name()
            || staged == self.assets.for_flow(flow).name()
            || (flow.takes_config() && staged == Flow::CONFIG_NAME);

        if collides {
            return Err(EngineError::ReservedFileName {
                name: filename.to_string(),
            });
        }
        Ok(())
    }

    /// Workspace root.
    pub fn temp_root(&self) -> &Path {
        &self.temp_root
    }

    /// Models catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Invocation metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
