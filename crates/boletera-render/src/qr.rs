use std::io::Cursor;

use async_trait::async_trait;
use image::Luma;
use qrcode::QrCode;

use boletera_catalog::{EncodeError, PayloadEncoder};
use boletera_core::TicketPayload;

/// Nominal edge length of the rendered symbol in pixels.
const SYMBOL_EDGE: u32 = 300;

/// Encodes the payload record as a QR symbol in PNG form.
#[derive(Debug, Default)]
pub struct QrPayloadEncoder;

#[async_trait]
impl PayloadEncoder for QrPayloadEncoder {
    async fn encode(&self, payload: &TicketPayload) -> Result<Vec<u8>, EncodeError> {
        let json = serde_json::to_string(payload)?;
        let code =
            QrCode::new(json.as_bytes()).map_err(|err| EncodeError::Image(err.to_string()))?;

        let symbol = code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .min_dimensions(SYMBOL_EDGE, SYMBOL_EDGE)
            .build();

        let mut png = Cursor::new(Vec::new());
        image::DynamicImage::ImageLuma8(symbol)
            .write_to(&mut png, image::ImageFormat::Png)
            .map_err(|err| EncodeError::Image(err.to_string()))?;
        Ok(png.into_inner())
    }
}
