use tracing::{info, warn};

use boletera_core::Ticket;

use crate::errors::ExportError;
use crate::exporter::{RasterImage, RenderExporter};
use crate::sheet::sheet_rows;

/// Output representation of a single-ticket export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Raster,
    Document,
}

/// One exported file, handed to the caller for delivery.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Result of a batch export, including how degraded the artifact is.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub artifact: Artifact,
    pub rendered: usize,
    pub skipped: usize,
}

/// Sequential export pipeline over the catalog.
///
/// Rendering proceeds in catalog order, one ticket at a time; per-ticket
/// render failures are skipped and counted, so an artifact may carry fewer
/// entries than tickets. An export with zero successful renders still
/// produces a minimal artifact.
pub struct BatchExportPipeline {
    exporter: Box<dyn RenderExporter>,
}

impl BatchExportPipeline {
    pub fn new(exporter: Box<dyn RenderExporter>) -> Self {
        Self { exporter }
    }

    /// Render exactly one ticket. A missing visual representation is a
    /// precondition failure reported to the caller.
    pub async fn export_single(
        &self,
        ticket: &Ticket,
        format: ExportFormat,
    ) -> Result<Artifact, ExportError> {
        let raster = self.exporter.render_to_raster(ticket).await?;
        match format {
            ExportFormat::Raster => Ok(Artifact {
                file_name: format!("{}.png", ticket.code),
                bytes: raster.png,
            }),
            ExportFormat::Document => {
                let bytes = self
                    .exporter
                    .assemble_document(std::slice::from_ref(&raster))
                    .await?;
                Ok(Artifact {
                    file_name: format!("{}.pdf", ticket.code),
                    bytes,
                })
            }
        }
    }

    /// Archive of one PNG entry per renderable ticket, in catalog order.
    pub async fn export_archive(
        &self,
        tickets: &[Ticket],
        series_name: &str,
    ) -> Result<ExportOutcome, ExportError> {
        let mut entries: Vec<(String, RasterImage)> = Vec::new();
        let mut skipped = 0;

        for ticket in tickets {
            match self.exporter.render_to_raster(ticket).await {
                Ok(raster) => entries.push((format!("{}.png", ticket.code), raster)),
                Err(err) => {
                    skipped += 1;
                    warn!(event = "ticket_render_skipped", code = %ticket.code, error = %err);
                }
            }
        }

        let bytes = self.exporter.assemble_archive(&entries).await?;
        let outcome = ExportOutcome {
            artifact: Artifact {
                file_name: format!("{}.zip", artifact_base(series_name)),
                bytes,
            },
            rendered: entries.len(),
            skipped,
        };
        log_outcome("archive_exported", &outcome);
        Ok(outcome)
    }

    /// Multi-page document, one page per renderable ticket, in catalog order.
    pub async fn export_document(
        &self,
        tickets: &[Ticket],
        series_name: &str,
    ) -> Result<ExportOutcome, ExportError> {
        let mut pages: Vec<RasterImage> = Vec::new();
        let mut skipped = 0;

        for ticket in tickets {
            match self.exporter.render_to_raster(ticket).await {
                Ok(raster) => pages.push(raster),
                Err(err) => {
                    skipped += 1;
                    warn!(event = "ticket_render_skipped", code = %ticket.code, error = %err);
                }
            }
        }

        let bytes = self.exporter.assemble_document(&pages).await?;
        let outcome = ExportOutcome {
            artifact: Artifact {
                file_name: format!("{}.pdf", artifact_base(series_name)),
                bytes,
            },
            rendered: pages.len(),
            skipped,
        };
        log_outcome("document_exported", &outcome);
        Ok(outcome)
    }

    /// Spreadsheet of the whole catalog; no rendering dependency, so every
    /// ticket appears regardless of payload image state.
    pub async fn export_spreadsheet(
        &self,
        tickets: &[Ticket],
        series_name: &str,
    ) -> Result<ExportOutcome, ExportError> {
        let rows = sheet_rows(tickets);
        let bytes = self.exporter.assemble_spreadsheet(&rows).await?;
        let outcome = ExportOutcome {
            artifact: Artifact {
                file_name: format!(
                    "{}.{}",
                    artifact_base(series_name),
                    self.exporter.spreadsheet_extension()
                ),
                bytes,
            },
            rendered: rows.len(),
            skipped: 0,
        };
        log_outcome("spreadsheet_exported", &outcome);
        Ok(outcome)
    }
}

fn artifact_base(series_name: &str) -> &str {
    if series_name.is_empty() {
        "tickets"
    } else {
        series_name
    }
}

fn log_outcome(event: &'static str, outcome: &ExportOutcome) {
    info!(
        event,
        file_name = %outcome.artifact.file_name,
        rendered = outcome.rendered,
        skipped = outcome.skipped,
        bytes = outcome.artifact.bytes.len(),
    );
}
