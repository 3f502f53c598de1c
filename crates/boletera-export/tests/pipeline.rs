use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use boletera_core::{SheetRow, Ticket};
use boletera_export::{
    BatchExportPipeline, ExportError, ExportFormat, RasterImage, RenderError, RenderExporter,
};

/// Exporter whose assembled artifacts are newline-joined entry listings, so
/// tests can observe exactly what the pipeline fed it.
struct ListingExporter;

#[async_trait]
impl RenderExporter for ListingExporter {
    async fn render_to_raster(&self, ticket: &Ticket) -> Result<RasterImage, RenderError> {
        if !ticket.has_payload_image() {
            return Err(RenderError::Unavailable(ticket.code.clone()));
        }
        Ok(RasterImage {
            width: 10,
            height: 10,
            png: ticket.code.clone().into_bytes(),
        })
    }

    async fn assemble_document(&self, pages: &[RasterImage]) -> Result<Vec<u8>, ExportError> {
        let listing: Vec<String> = pages
            .iter()
            .map(|page| String::from_utf8_lossy(&page.png).into_owned())
            .collect();
        Ok(format!("pdf:{}", listing.join("\n")).into_bytes())
    }

    async fn assemble_archive(
        &self,
        entries: &[(String, RasterImage)],
    ) -> Result<Vec<u8>, ExportError> {
        let listing: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
        Ok(format!("zip:{}", listing.join("\n")).into_bytes())
    }

    async fn assemble_spreadsheet(&self, rows: &[SheetRow]) -> Result<Vec<u8>, ExportError> {
        let listing: Vec<String> = rows
            .iter()
            .map(|row| format!("{},{}", row.code, row.sold))
            .collect();
        Ok(format!("sheet:{}", listing.join("\n")).into_bytes())
    }
}

fn ticket(folio: u32, with_image: bool) -> Ticket {
    let code = format!("SERIE-A-A{folio:04}");
    Ticket {
        id: Uuid::new_v4(),
        series: "SERIE-A".to_string(),
        prefix: "A".to_string(),
        folio,
        code: code.clone(),
        price: 100.0,
        sold: false,
        payload_image: if with_image { code.into_bytes() } else { Vec::new() },
        created_at: Utc::now(),
    }
}

fn pipeline() -> BatchExportPipeline {
    BatchExportPipeline::new(Box::new(ListingExporter))
}

#[tokio::test]
async fn archive_skips_unrenderable_tickets() {
    let tickets = vec![
        ticket(1, true),
        ticket(2, true),
        ticket(3, false),
        ticket(4, true),
        ticket(5, true),
    ];

    let outcome = pipeline()
        .export_archive(&tickets, "SERIE-A")
        .await
        .expect("export archive");

    assert_eq!(outcome.rendered, 4);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.artifact.file_name, "SERIE-A.zip");
    assert_eq!(
        String::from_utf8(outcome.artifact.bytes).expect("utf8"),
        "zip:SERIE-A-A0001.png\nSERIE-A-A0002.png\nSERIE-A-A0004.png\nSERIE-A-A0005.png"
    );
}

#[tokio::test]
async fn archive_with_zero_renders_still_produces_an_artifact() {
    let tickets = vec![ticket(1, false), ticket(2, false)];

    let outcome = pipeline()
        .export_archive(&tickets, "")
        .await
        .expect("export archive");

    assert_eq!(outcome.rendered, 0);
    assert_eq!(outcome.skipped, 2);
    assert_eq!(outcome.artifact.file_name, "tickets.zip");
    assert_eq!(outcome.artifact.bytes, b"zip:");
}

#[tokio::test]
async fn document_pages_follow_catalog_order() {
    let tickets = vec![ticket(2, true), ticket(1, true)];

    let outcome = pipeline()
        .export_document(&tickets, "SERIE-A")
        .await
        .expect("export document");

    assert_eq!(outcome.artifact.file_name, "SERIE-A.pdf");
    assert_eq!(
        String::from_utf8(outcome.artifact.bytes).expect("utf8"),
        "pdf:SERIE-A-A0002\nSERIE-A-A0001",
        "page order matches input order, not folio order"
    );
}

#[tokio::test]
async fn spreadsheet_rows_match_catalog_order_without_rendering() {
    let mut sold = ticket(1, false);
    sold.sold = true;
    let tickets = vec![sold, ticket(2, false)];

    let outcome = pipeline()
        .export_spreadsheet(&tickets, "SERIE-A")
        .await
        .expect("export spreadsheet");

    assert_eq!(outcome.rendered, 2, "image-less tickets still get rows");
    assert_eq!(outcome.skipped, 0);
    assert_eq!(outcome.artifact.file_name, "SERIE-A.csv");
    assert_eq!(
        String::from_utf8(outcome.artifact.bytes).expect("utf8"),
        "sheet:SERIE-A-A0001,Yes\nSERIE-A-A0002,No"
    );
}

#[tokio::test]
async fn single_export_reports_missing_visual_as_error() {
    let result = pipeline()
        .export_single(&ticket(1, false), ExportFormat::Raster)
        .await;

    assert!(matches!(
        result,
        Err(ExportError::Render(RenderError::Unavailable(_)))
    ));
}

#[tokio::test]
async fn single_export_names_artifacts_after_the_code() {
    let pipeline = pipeline();
    let ticket = ticket(7, true);

    let png = pipeline
        .export_single(&ticket, ExportFormat::Raster)
        .await
        .expect("raster export");
    assert_eq!(png.file_name, "SERIE-A-A0007.png");

    let pdf = pipeline
        .export_single(&ticket, ExportFormat::Document)
        .await
        .expect("document export");
    assert_eq!(pdf.file_name, "SERIE-A-A0007.pdf");
    assert_eq!(pdf.bytes, b"pdf:SERIE-A-A0007");
}
