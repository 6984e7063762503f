//! Bulk export: the merged (or filtered) dataset as CSV, and the photos it
//! references as one zip archive.

use std::{
    fs,
    io::{
        Cursor,
        Write,
    },
    path::Path,
};

use zip::{
    write::SimpleFileOptions,
    ZipWriter,
};

use crate::core::{
    models::COLUMNS,
    Observation,
    ScoutError,
};

pub fn write_csv<W: Write>(observations: &[Observation], writer: W) -> Result<(), ScoutError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(COLUMNS)?;
    for obs in observations {
        csv_writer.write_record(obs.to_row())?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn csv_string(observations: &[Observation]) -> Result<String, ScoutError> {
    let mut buffer = Vec::new();
    write_csv(observations, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ScoutError::Custom(format!("CSV not UTF-8: {e}")))
}

/// Zip up the photos referenced by the given records. Remote links and
/// filenames missing from the uploads directory are skipped; the archive
/// only ever contains what is actually on disk.
pub fn photo_archive(
    observations: &[Observation],
    uploads_dir: &Path,
) -> Result<Vec<u8>, ScoutError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    let mut bundled = 0usize;

    for obs in observations {
        let name = obs.photo_filename.as_str();
        if name.is_empty() || name.contains("://") {
            continue;
        }

        let path = uploads_dir.join(name);
        if !path.exists() {
            eprintln!("Photo {} referenced but not found, skipping", name);
            continue;
        }

        let bytes = fs::read(&path)?;
        zip.start_file(name, options)
            .map_err(|e| ScoutError::Custom(format!("Zip entry {} failed: {e}", name)))?;
        zip.write_all(&bytes)?;
        bundled += 1;
    }

    println!("Bundled {} photos", bundled);

    let cursor =
        zip.finish().map_err(|e| ScoutError::Custom(format!("Zip finish failed: {e}")))?;
    Ok(cursor.into_inner())
}
