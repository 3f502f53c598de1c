//! Batch export pipeline for Boletera.
//!
//! Iterates the catalog sequentially, rendering one ticket at a time through
//! the host-supplied exporter, and assembles single or multi-ticket
//! artifacts. Per-ticket render failures degrade the artifact instead of
//! aborting the export.

pub mod errors;
pub mod exporter;
pub mod pipeline;
pub mod sheet;

pub use errors::{ExportError, RenderError};
pub use exporter::{RasterImage, RenderExporter};
pub use pipeline::{Artifact, BatchExportPipeline, ExportFormat, ExportOutcome};
pub use sheet::sheet_rows;
