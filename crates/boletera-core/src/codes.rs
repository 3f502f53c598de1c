//! Ticket code formatting and folio arithmetic.

/// Build the human-readable code for a ticket.
///
/// Folios are zero-padded to four digits; wider folios print in full, so
/// `folio 12345` yields `...12345` rather than truncating.
pub fn ticket_code(series: &str, prefix: &str, folio: u32) -> String {
    format!("{series}-{prefix}{folio:04}")
}

/// The folio values covered by a generation batch, in increasing order.
pub fn folio_span(start_folio: u32, count: u32) -> impl Iterator<Item = u32> {
    (0..count).map(move |i| start_folio.saturating_add(i))
}
