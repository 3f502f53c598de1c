use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable ticket record.
///
/// Field names on the wire match the persisted store exactly; `payload_image`
/// and `created_at` serialize in camelCase for compatibility with existing
/// state files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Process-unique identifier, assigned at creation, never reused.
    pub id: Uuid,
    /// Name of the series active at generation time.
    pub series: String,
    /// Short string used in the human-readable code.
    pub prefix: String,
    /// Sequence number within the generation batch.
    pub folio: u32,
    /// Derived human-readable code; may collide across batches with
    /// overlapping folio ranges.
    pub code: String,
    /// Sale price, fixed at creation.
    pub price: f64,
    pub sold: bool,
    /// PNG bytes of the scannable payload image; empty when encoding failed.
    #[serde(default, with = "payload_image_bytes")]
    pub payload_image: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// Whether the ticket carries a scannable payload image.
    pub fn has_payload_image(&self) -> bool {
        !self.payload_image.is_empty()
    }
}

/// Base64 representation for the payload image so the persisted JSON stays
/// printable.
mod payload_image_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(D::Error::custom)
    }
}

/// A saved generation template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Series {
    /// Unique key of the template.
    pub name: String,
    pub prefix: String,
}

/// Structured record encoded into the scannable payload image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketPayload {
    pub code: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl TicketPayload {
    pub fn for_ticket(ticket: &Ticket) -> Self {
        Self {
            code: ticket.code.clone(),
            price: ticket.price,
            created_at: ticket.created_at,
        }
    }
}

/// One spreadsheet row; `sold` serializes as a two-valued string for
/// readability in the exported sheet.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SheetRow {
    pub code: String,
    pub series: String,
    pub prefix: String,
    pub folio: u32,
    pub price: f64,
    pub sold: String,
}

impl SheetRow {
    pub const HEADER: [&'static str; 6] = ["Code", "Series", "Prefix", "Folio", "Price", "Sold"];

    pub fn for_ticket(ticket: &Ticket) -> Self {
        Self {
            code: ticket.code.clone(),
            series: ticket.series.clone(),
            prefix: ticket.prefix.clone(),
            folio: ticket.folio,
            price: ticket.price,
            sold: if ticket.sold { "Yes" } else { "No" }.to_string(),
        }
    }
}
