use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use boletera_export::{ExportError, RasterImage};

// A4 portrait in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const PAGE_MARGIN: i64 = 24;

/// Assemble a multi-page document: one raster per page, scaled to the page
/// width inside the margins, aspect ratio preserved. Zero pages yield a
/// single blank page so the artifact stays well-formed.
pub(crate) fn assemble(pages: &[RasterImage]) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::new();

    if pages.is_empty() {
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box(),
            "Contents" => content_id,
            "Resources" => dictionary! {},
        });
        kids.push(page_id.into());
    }

    for page in pages {
        let rgb = decode_rgb(page)?;
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => page.width as i64,
                "Height" => page.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            rgb,
        ));

        let avail = PAGE_WIDTH - PAGE_MARGIN * 2;
        let draw_width = avail;
        let draw_height =
            (page.height as f64 * avail as f64 / page.width as f64).round() as i64;
        let x = PAGE_MARGIN;
        let y = PAGE_HEIGHT - PAGE_MARGIN - draw_height;

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        draw_width.into(),
                        0.into(),
                        0.into(),
                        draw_height.into(),
                        x.into(),
                        y.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content
                .encode()
                .map_err(|err| ExportError::Assemble(err.to_string()))?,
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box(),
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|err| ExportError::Assemble(err.to_string()))?;
    Ok(bytes)
}

fn media_box() -> Vec<Object> {
    vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()]
}

/// PDF image streams carry raw samples; unpack the PNG to 8-bit RGB.
fn decode_rgb(page: &RasterImage) -> Result<Vec<u8>, ExportError> {
    let decoded = image::load_from_memory(&page.png)
        .map_err(|err| ExportError::Assemble(err.to_string()))?;
    Ok(decoded.to_rgb8().into_raw())
}
