use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use boletera_export::{ExportError, RasterImage};

/// Assemble a deflate-compressed archive of PNG entries, preserving the
/// given order. An empty entry list yields a valid empty archive.
pub(crate) fn assemble(entries: &[(String, RasterImage)]) -> Result<Vec<u8>, ExportError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, raster) in entries {
        writer
            .start_file(name.as_str(), options)
            .map_err(|err| ExportError::Assemble(err.to_string()))?;
        writer.write_all(&raster.png)?;
    }

    let cursor = writer
        .finish()
        .map_err(|err| ExportError::Assemble(err.to_string()))?;
    Ok(cursor.into_inner())
}
