use std::io::Cursor;

use image::{Rgba, RgbaImage};

use boletera_core::Ticket;
use boletera_export::{RasterImage, RenderError};

/// Materialize the ticket's visual representation: the stored payload image
/// framed on a white card canvas.
///
/// A ticket whose payload encoding failed has no live visual representation
/// and cannot be rendered.
pub(crate) fn compose_card(ticket: &Ticket) -> Result<RasterImage, RenderError> {
    if !ticket.has_payload_image() {
        return Err(RenderError::Unavailable(format!(
            "ticket {} has no payload image",
            ticket.code
        )));
    }

    let symbol = image::load_from_memory(&ticket.payload_image)
        .map_err(|err| RenderError::Failed(err.to_string()))?
        .to_rgba8();

    let margin = (symbol.width() / 10).max(8);
    let width = symbol.width() + margin * 2;
    let height = symbol.height() + margin * 2;

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    image::imageops::overlay(&mut canvas, &symbol, i64::from(margin), i64::from(margin));

    let mut png = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(canvas)
        .write_to(&mut png, image::ImageFormat::Png)
        .map_err(|err| RenderError::Failed(err.to_string()))?;

    Ok(RasterImage {
        width,
        height,
        png: png.into_inner(),
    })
}
