#[cfg(test)]
mod tests {
    use std::fs;

    use crate::{
        core::{
            GeoPoint,
            Observation,
            RawTable,
            ScoutError,
        },
        dataset::SurveyDataset,
        export,
        filter::SurveyFilter,
        source::{
            LocalCsvSource,
            TableSource,
        },
        store::{
            AppendOptions,
            AppendWriter,
            LocalCsvSink,
        },
    };

    /// A remote source that never answers, standing in for the reference
    /// dataset being offline.
    struct OfflineRemote;

    impl TableSource for OfflineRemote {
        fn label(&self) -> &str {
            "remote"
        }

        fn fetch(&self) -> Result<RawTable, ScoutError> {
            Err(ScoutError::Custom("connect timeout".to_string()))
        }
    }

    fn seed_local_file(path: &std::path::Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            path,
            "sample_id,date,crop,disease1,severity1_percent,survey_location\n\
             SARDI25001,07/08/2025,Wheat,Rust,40,Clare\n",
        )
        .unwrap();
    }

    #[test]
    fn survey_submission_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("data").join("local_disease_data.csv");
        seed_local_file(&data_path);

        let local_source = LocalCsvSource::new(&data_path);
        let mut dataset = SurveyDataset::new(GeoPoint::default());

        // Load with the remote down: the one local row comes through
        // unchanged, plus a warning for the dead source.
        dataset.load(&[&OfflineRemote, &local_source]);
        assert_eq!(dataset.observations().len(), 1);
        assert_eq!(dataset.warnings().len(), 1);

        let first = &dataset.observations()[0];
        assert_eq!(first.sample_id, "SARDI25001");
        assert_eq!(first.crop, "Wheat");
        assert_eq!(first.disease1, "Rust");
        assert_eq!(first.severity1_percent, 40);

        // Submit a new observation without an id; the generator continues
        // the sequence from the last stored id.
        let local_sink = LocalCsvSink::new(&data_path);
        let writer = AppendWriter::new(vec![&local_sink], AppendOptions::default());

        let new_record = Observation {
            crop: "Barley".to_string(),
            disease1: "Scald".to_string(),
            severity1_percent: 25,
            survey_location: "Minlaton".to_string(),
            ..Observation::default()
        };
        let outcome = writer.append(dataset.observations(), new_record, None).unwrap();
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.observations.last().unwrap().sample_id, "SARDI25002");

        // Adopt the persisted collection without refetching; the cached
        // view now carries both rows and no stale warnings.
        dataset.adopt(outcome.observations);
        assert_eq!(dataset.observations().len(), 2);
        assert!(dataset.warnings().is_empty());

        // A reload from the sources agrees with the adopted view: both
        // rows, order preserved, no duplicates.
        let adopted = dataset.observations().to_vec();
        dataset.reload(&[&OfflineRemote, &local_source]);
        assert_eq!(dataset.observations(), &adopted[..]);
        let ids: Vec<&str> =
            dataset.observations().iter().map(|o| o.sample_id.as_str()).collect();
        assert_eq!(ids, vec!["SARDI25001", "SARDI25002"]);
    }

    #[test]
    fn filtered_export_matches_the_filter() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("data.csv");
        fs::write(
            &data_path,
            "sample_id,crop,disease1\n\
             SARDI25001,Wheat,Rust\n\
             SARDI25002,Lentil,Ascochyta Blight\n",
        )
        .unwrap();

        let local_source = LocalCsvSource::new(&data_path);
        let mut dataset = SurveyDataset::new(GeoPoint::default());
        dataset.load(&[&local_source]);

        let filter = SurveyFilter { crop: Some("Lentil".to_string()), ..Default::default() };
        let filtered = filter.apply(dataset.observations());
        assert_eq!(filtered.len(), 1);

        let text = export::csv_string(&filtered).unwrap();
        assert!(text.contains("SARDI25002"));
        assert!(!text.contains("SARDI25001"));
    }
}
