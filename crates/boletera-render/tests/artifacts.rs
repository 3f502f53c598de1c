use std::io::Cursor;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use boletera_catalog::{GenerateRequest, MemoryStore, PayloadEncoder, TicketCatalog};
use boletera_core::{SheetRow, Ticket, TicketPayload};
use boletera_export::{BatchExportPipeline, ExportFormat, RenderExporter};
use boletera_render::{QrPayloadEncoder, TicketRenderer};

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

fn payload() -> TicketPayload {
    TicketPayload {
        code: "SERIE-A-A0001".to_string(),
        price: 100.0,
        created_at: Utc::now(),
    }
}

async fn encoded_ticket(folio: u32) -> Ticket {
    let image = QrPayloadEncoder
        .encode(&payload())
        .await
        .expect("encode payload");
    Ticket {
        id: Uuid::new_v4(),
        series: "SERIE-A".to_string(),
        prefix: "A".to_string(),
        folio,
        code: format!("SERIE-A-A{folio:04}"),
        price: 100.0,
        sold: false,
        payload_image: image,
        created_at: Utc::now(),
    }
}

fn imageless_ticket(folio: u32) -> Ticket {
    Ticket {
        id: Uuid::new_v4(),
        series: "SERIE-A".to_string(),
        prefix: "A".to_string(),
        folio,
        code: format!("SERIE-A-A{folio:04}"),
        price: 100.0,
        sold: false,
        payload_image: Vec::new(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn qr_encoder_emits_decodable_png() {
    let bytes = QrPayloadEncoder
        .encode(&payload())
        .await
        .expect("encode payload");

    assert_eq!(&bytes[..4], PNG_SIGNATURE);
    let decoded = image::load_from_memory(&bytes).expect("decode png").to_luma8();
    assert!(decoded.width() >= 300, "symbol honors the nominal edge");
}

#[tokio::test]
async fn raster_frames_the_payload_image() {
    let ticket = encoded_ticket(1).await;
    let raster = TicketRenderer
        .render_to_raster(&ticket)
        .await
        .expect("render raster");

    let symbol = image::load_from_memory(&ticket.payload_image)
        .expect("decode symbol")
        .to_rgba8();
    assert!(raster.width > symbol.width(), "card adds a margin");
    assert_eq!(&raster.png[..4], PNG_SIGNATURE);

    let card = image::load_from_memory(&raster.png)
        .expect("decode card")
        .to_rgba8();
    assert_eq!((card.width(), card.height()), (raster.width, raster.height));
}

#[tokio::test]
async fn imageless_tickets_are_unrenderable() {
    let result = TicketRenderer.render_to_raster(&imageless_ticket(1)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn archive_contains_one_entry_per_rendered_ticket() {
    let pipeline = BatchExportPipeline::new(Box::new(TicketRenderer));
    let tickets = vec![
        encoded_ticket(1).await,
        encoded_ticket(2).await,
        imageless_ticket(3),
        encoded_ticket(4).await,
        encoded_ticket(5).await,
    ];

    let outcome = pipeline
        .export_archive(&tickets, "SERIE-A")
        .await
        .expect("export archive");

    assert_eq!(outcome.rendered, 4);
    assert_eq!(outcome.skipped, 1);

    let mut archive =
        zip::ZipArchive::new(Cursor::new(outcome.artifact.bytes)).expect("open archive");
    assert_eq!(archive.len(), 4);
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).expect("entry").name().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "SERIE-A-A0001.png",
            "SERIE-A-A0002.png",
            "SERIE-A-A0004.png",
            "SERIE-A-A0005.png"
        ]
    );
}

#[tokio::test]
async fn document_has_one_page_per_rendered_ticket() {
    let pipeline = BatchExportPipeline::new(Box::new(TicketRenderer));
    let tickets = vec![encoded_ticket(1).await, encoded_ticket(2).await];

    let outcome = pipeline
        .export_document(&tickets, "SERIE-A")
        .await
        .expect("export document");

    let doc = lopdf::Document::load_mem(&outcome.artifact.bytes).expect("parse pdf");
    assert_eq!(doc.get_pages().len(), 2);
}

#[tokio::test]
async fn empty_document_export_keeps_one_blank_page() {
    let pipeline = BatchExportPipeline::new(Box::new(TicketRenderer));

    let outcome = pipeline
        .export_document(&[], "")
        .await
        .expect("export document");

    assert_eq!(outcome.artifact.file_name, "tickets.pdf");
    let doc = lopdf::Document::load_mem(&outcome.artifact.bytes).expect("parse pdf");
    assert_eq!(doc.get_pages().len(), 1);
}

#[tokio::test]
async fn spreadsheet_has_header_plus_one_row_per_ticket() {
    let pipeline = BatchExportPipeline::new(Box::new(TicketRenderer));
    let mut sold = imageless_ticket(1);
    sold.sold = true;
    let tickets = vec![sold, imageless_ticket(2)];

    let outcome = pipeline
        .export_spreadsheet(&tickets, "SERIE-A")
        .await
        .expect("export spreadsheet");

    let text = String::from_utf8(outcome.artifact.bytes).expect("utf8 csv");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), tickets.len() + 1);
    assert_eq!(lines[0], SheetRow::HEADER.join(","));
    assert_eq!(lines[1], "SERIE-A-A0001,SERIE-A,A,1,100,Yes");
    assert_eq!(lines[2], "SERIE-A-A0002,SERIE-A,A,2,100,No");
}

#[tokio::test]
async fn single_export_produces_a_one_page_document() {
    let pipeline = BatchExportPipeline::new(Box::new(TicketRenderer));
    let ticket = encoded_ticket(9).await;

    let artifact = pipeline
        .export_single(&ticket, ExportFormat::Document)
        .await
        .expect("export single");

    assert_eq!(artifact.file_name, "SERIE-A-A0009.pdf");
    let doc = lopdf::Document::load_mem(&artifact.bytes).expect("parse pdf");
    assert_eq!(doc.get_pages().len(), 1);
}

#[tokio::test]
async fn generated_catalog_exports_end_to_end() {
    let store = Arc::new(MemoryStore::new());
    let mut catalog = TicketCatalog::load(store, Box::new(QrPayloadEncoder));

    catalog
        .generate(&GenerateRequest {
            series: "SERIE-A".to_string(),
            prefix: "A".to_string(),
            start_folio: 1,
            count: 3,
            price: 100.0,
        })
        .await;

    let pipeline = BatchExportPipeline::new(Box::new(TicketRenderer));
    let outcome = pipeline
        .export_archive(catalog.tickets(), "SERIE-A")
        .await
        .expect("export archive");

    assert_eq!(outcome.rendered, 3);
    assert_eq!(outcome.skipped, 0);
}
