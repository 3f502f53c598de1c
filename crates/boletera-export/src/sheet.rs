use boletera_core::{SheetRow, Ticket};

/// Build spreadsheet rows in catalog order. Pure data transform, no
/// rendering dependency.
pub fn sheet_rows(tickets: &[Ticket]) -> Vec<SheetRow> {
    tickets.iter().map(SheetRow::for_ticket).collect()
}
