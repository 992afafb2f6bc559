//! # fcserve-engine
//!
//! Drives FreeCAD (`FreeCADCmd`) as an out-of-process engine for one HTTP
//! request at a time.
//!
//! Every request that needs the engine goes through the same stages:
//!
//! 1. a private [`Workspace`] is created under the temp root,
//! 2. the source model, the build configuration and the automation script
//!    are materialized into it ([`InputMaterializer`]),
//! 3. the engine is run as `<engine> -c <script> --pass <args...>`
//!    ([`EngineInvoker`]),
//! 4. the declared output file is read back ([`OutputExtractor`]),
//! 5. the workspace is removed, whatever happened before.
//!
//! [`Pipeline`] composes those stages into the `info` and `build` flows and
//! also serves the `list` flow through the [`Catalog`].

pub mod assets;
pub mod catalog;
pub mod error;
pub mod extractor;
pub mod invoker;
pub mod materializer;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod workspace;

pub use assets::{Asset, AssetStore};
pub use catalog::Catalog;
pub use error::EngineError;
pub use extractor::OutputExtractor;
pub use invoker::{EngineInvocation, EngineInvoker, ExitOutcome};
pub use materializer::InputMaterializer;
pub use metrics::{EngineMetrics, MetricsSnapshot};
pub use models::{Flow, OutputArtifact};
pub use pipeline::Pipeline;
pub use workspace::Workspace;
