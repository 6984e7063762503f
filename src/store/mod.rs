//! Append writer: durably persist a new observation across the configured
//! sinks, favoring availability over all-sink consistency.

pub mod photos;

pub use photos::{
    ObjectStore,
    PhotoStore,
    PhotoUpload,
};

use std::{
    fs,
    path::PathBuf,
};

use crate::{
    core::{
        models::COLUMNS,
        Observation,
        ScoutError,
    },
    export,
    schema::next_sample_id,
    sheets::SheetsClient,
};

/// A durable destination for the record collection.
pub trait RecordSink {
    fn label(&self) -> &str;

    /// Persist one appended record; `all` already contains it as the last
    /// element so rewrite-style sinks can write the whole table.
    fn persist_append(&self, all: &[Observation], new: &Observation) -> Result<(), ScoutError>;

    /// Replace the sink's contents with the given collection.
    fn persist_all(&self, all: &[Observation]) -> Result<(), ScoutError>;
}

/// Local CSV sink. Appending rewrites the whole file so the on-disk table
/// always matches the merged view, header included.
pub struct LocalCsvSink {
    path: PathBuf,
}

impl LocalCsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalCsvSink { path: path.into() }
    }
}

impl RecordSink for LocalCsvSink {
    fn label(&self) -> &str {
        "local"
    }

    fn persist_append(&self, all: &[Observation], _new: &Observation) -> Result<(), ScoutError> {
        self.persist_all(all)
    }

    fn persist_all(&self, all: &[Observation]) -> Result<(), ScoutError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = fs::File::create(&self.path)?;
        export::write_csv(all, file)
    }
}

/// Spreadsheet sink: a true single-row append, with the header row written
/// lazily the first time the sheet is touched.
pub struct SheetSink<'a> {
    client: &'a dyn SheetsClient,
}

impl<'a> SheetSink<'a> {
    pub fn new(client: &'a dyn SheetsClient) -> Self {
        SheetSink { client }
    }
}

impl RecordSink for SheetSink<'_> {
    fn label(&self) -> &str {
        "sheet"
    }

    fn persist_append(&self, _all: &[Observation], new: &Observation) -> Result<(), ScoutError> {
        if self.client.read_all()?.is_empty() {
            let headers: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
            self.client.append_row(&headers)?;
        }
        self.client.append_row(&new.to_row())
    }

    fn persist_all(&self, all: &[Observation]) -> Result<(), ScoutError> {
        let mut rows: Vec<Vec<String>> =
            vec![COLUMNS.iter().map(|c| c.to_string()).collect()];
        rows.extend(all.iter().map(Observation::to_row));
        self.client.overwrite_all(&rows)
    }
}

#[derive(Debug, Clone)]
pub struct SinkWarning {
    pub sink: String,
    pub reason: String,
}

#[derive(Debug)]
pub struct AppendOutcome {
    /// The augmented collection, new record last. Callers adopt this as the
    /// session dataset (or re-run reconciliation) only on success.
    pub observations: Vec<Observation>,
    /// One entry per failed sink when the append still met the durability
    /// bar elsewhere.
    pub warnings: Vec<SinkWarning>,
}

#[derive(Debug, Clone)]
pub struct AppendOptions {
    pub id_prefix: String,
    pub id_start: u64,
    pub id_width: usize,
    /// When true, any sink failure fails the append. The default favors
    /// availability: one sink is enough.
    pub require_all_sinks: bool,
}

impl Default for AppendOptions {
    fn default() -> Self {
        AppendOptions {
            id_prefix: crate::schema::sample_id::DEFAULT_PREFIX.to_string(),
            id_start: crate::schema::sample_id::DEFAULT_START,
            id_width: crate::schema::sample_id::DEFAULT_WIDTH,
            require_all_sinks: false,
        }
    }
}

/// The append writer: identifier assignment, validation, photo persistence
/// and the fan-out to every configured sink.
pub struct AppendWriter<'a> {
    sinks: Vec<&'a dyn RecordSink>,
    photos: Option<&'a PhotoStore>,
    objects: Option<&'a dyn ObjectStore>,
    options: AppendOptions,
}

impl<'a> AppendWriter<'a> {
    pub fn new(sinks: Vec<&'a dyn RecordSink>, options: AppendOptions) -> Self {
        AppendWriter { sinks, photos: None, objects: None, options }
    }

    pub fn with_photo_store(mut self, photos: &'a PhotoStore) -> Self {
        self.photos = Some(photos);
        self
    }

    pub fn with_object_store(mut self, objects: &'a dyn ObjectStore) -> Self {
        self.objects = Some(objects);
        self
    }

    /// Append one new observation.
    ///
    /// A missing required field is a validation error and nothing is
    /// written, photo included. The photo is persisted before any sink sees
    /// the record, so a stored record never points at a photo that does not
    /// exist.
    pub fn append(
        &self,
        existing: &[Observation],
        mut record: Observation,
        photo: Option<&PhotoUpload>,
    ) -> Result<AppendOutcome, ScoutError> {
        if record.sample_id.is_empty() {
            let ids: Vec<String> = existing.iter().map(|o| o.sample_id.clone()).collect();
            record.sample_id = next_sample_id(
                &ids,
                &self.options.id_prefix,
                self.options.id_start,
                self.options.id_width,
            );
        }

        validate(&record)?;

        if let Some(upload) = photo {
            record.photo_filename = self.persist_photo(upload)?;
        }

        let mut updated = existing.to_vec();
        updated.push(record.clone());

        let warnings = self.fan_out(|sink| sink.persist_append(&updated, &record))?;
        Ok(AppendOutcome { observations: updated, warnings })
    }

    /// Rewrite every sink with the given collection. This is the primitive
    /// behind whole-table edits and deletions, which live outside this core.
    pub fn save_all(&self, all: &[Observation]) -> Result<Vec<SinkWarning>, ScoutError> {
        self.fan_out(|sink| sink.persist_all(all))
    }

    fn persist_photo(&self, upload: &PhotoUpload) -> Result<String, ScoutError> {
        // Remote object storage takes precedence: the record then carries
        // the viewable link rather than a local filename.
        if let Some(objects) = self.objects {
            return objects.put(&upload.original_name, &upload.bytes);
        }
        if let Some(photos) = self.photos {
            return photos.save(upload);
        }
        Err(ScoutError::Custom("No photo storage configured".to_string()))
    }

    fn fan_out<F>(&self, write: F) -> Result<Vec<SinkWarning>, ScoutError>
    where
        F: Fn(&dyn RecordSink) -> Result<(), ScoutError>,
    {
        if self.sinks.is_empty() {
            return Err(ScoutError::Persistence("no sinks configured".to_string()));
        }

        let mut warnings = Vec::new();
        let mut succeeded = 0usize;

        for sink in &self.sinks {
            match write(*sink) {
                Ok(()) => succeeded += 1,
                Err(e) => {
                    eprintln!("Sink '{}' failed: {}", sink.label(), e);
                    warnings.push(SinkWarning {
                        sink: sink.label().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if succeeded == 0 {
            let failed: Vec<&str> = warnings.iter().map(|w| w.sink.as_str()).collect();
            return Err(ScoutError::Persistence(format!(
                "all sinks failed: {}",
                failed.join(", ")
            )));
        }
        if self.options.require_all_sinks && !warnings.is_empty() {
            let failed: Vec<&str> = warnings.iter().map(|w| w.sink.as_str()).collect();
            return Err(ScoutError::Persistence(format!(
                "sinks failed with require_all_sinks set: {}",
                failed.join(", ")
            )));
        }

        Ok(warnings)
    }
}

fn validate(record: &Observation) -> Result<(), ScoutError> {
    if record.crop.trim().is_empty() {
        return Err(ScoutError::MissingField("crop"));
    }
    if record.disease1.trim().is_empty() {
        return Err(ScoutError::MissingField("disease1"));
    }
    if record.survey_location.trim().is_empty() {
        return Err(ScoutError::MissingField("survey_location"));
    }
    Ok(())
}
