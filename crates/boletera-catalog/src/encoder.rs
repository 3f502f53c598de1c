use async_trait::async_trait;

use boletera_core::TicketPayload;

use crate::errors::EncodeError;

/// Turns a structured payload into scannable-image bytes.
///
/// Encoding is attempted once per ticket during generation; a failure marks
/// that ticket as image-less and never aborts the batch.
#[async_trait]
pub trait PayloadEncoder: Send + Sync {
    async fn encode(&self, payload: &TicketPayload) -> Result<Vec<u8>, EncodeError>;
}
