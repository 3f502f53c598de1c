use async_trait::async_trait;

use boletera_core::{SheetRow, Ticket};
use boletera_export::{ExportError, RasterImage, RenderError, RenderExporter};

use crate::{archive, pdf, raster, sheet};

/// Default exporter: card rasters from stored payload images, A4 PDF
/// documents, deflate ZIP archives, CSV spreadsheets.
#[derive(Debug, Default)]
pub struct TicketRenderer;

#[async_trait]
impl RenderExporter for TicketRenderer {
    async fn render_to_raster(&self, ticket: &Ticket) -> Result<RasterImage, RenderError> {
        raster::compose_card(ticket)
    }

    async fn assemble_document(&self, pages: &[RasterImage]) -> Result<Vec<u8>, ExportError> {
        pdf::assemble(pages)
    }

    async fn assemble_archive(
        &self,
        entries: &[(String, RasterImage)],
    ) -> Result<Vec<u8>, ExportError> {
        archive::assemble(entries)
    }

    async fn assemble_spreadsheet(&self, rows: &[SheetRow]) -> Result<Vec<u8>, ExportError> {
        sheet::assemble(rows)
    }
}
