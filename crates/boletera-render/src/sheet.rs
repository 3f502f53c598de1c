use boletera_core::SheetRow;
use boletera_export::ExportError;

/// Emit the spreadsheet as CSV bytes: the fixed header followed by one
/// record per row, in the order given.
pub(crate) fn assemble(rows: &[SheetRow]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(SheetRow::HEADER)
        .map_err(|err| ExportError::Assemble(err.to_string()))?;

    for row in rows {
        let record = [
            row.code.clone(),
            row.series.clone(),
            row.prefix.clone(),
            row.folio.to_string(),
            row.price.to_string(),
            row.sold.clone(),
        ];
        writer
            .write_record(&record)
            .map_err(|err| ExportError::Assemble(err.to_string()))?;
    }

    writer
        .flush()
        .map_err(|err| ExportError::Assemble(err.to_string()))?;
    writer
        .into_inner()
        .map_err(|err| ExportError::Assemble(err.to_string()))
}
