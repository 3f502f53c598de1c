use async_trait::async_trait;

use boletera_core::{SheetRow, Ticket};

use crate::errors::{ExportError, RenderError};

/// Raster bytes for one rendered ticket, PNG-encoded, with pixel dimensions
/// kept alongside so assemblers can scale without decoding.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Host-supplied rendering and container-assembly capability.
///
/// All methods are synchronous from the pipeline's point of view but
/// suspend the caller; the pipeline awaits them one ticket at a time.
#[async_trait]
pub trait RenderExporter: Send + Sync {
    /// Materialize the ticket's visual representation as raster bytes.
    async fn render_to_raster(&self, ticket: &Ticket) -> Result<RasterImage, RenderError>;

    /// Assemble one document page per raster, scaled to page width.
    async fn assemble_document(&self, pages: &[RasterImage]) -> Result<Vec<u8>, ExportError>;

    /// Assemble a compressed archive of named raster entries.
    async fn assemble_archive(
        &self,
        entries: &[(String, RasterImage)],
    ) -> Result<Vec<u8>, ExportError>;

    /// Assemble a spreadsheet from a header plus the given rows.
    async fn assemble_spreadsheet(&self, rows: &[SheetRow]) -> Result<Vec<u8>, ExportError>;

    /// File extension of the spreadsheet container this exporter emits.
    fn spreadsheet_extension(&self) -> &'static str {
        "csv"
    }
}
