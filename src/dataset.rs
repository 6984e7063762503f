//! The session-scoped reconciled dataset. The original application kept
//! this as ambient mutable session state; here it is an explicit cache
//! value the hosting layer owns, with a load/invalidate contract.

use crate::{
    core::{
        GeoPoint,
        Observation,
    },
    reconcile::reconcile,
    source::{
        fetch_or_empty,
        SourceWarning,
        TableSource,
    },
    store::RecordSink,
};

pub struct SurveyDataset {
    observations: Vec<Observation>,
    warnings: Vec<SourceWarning>,
    fallback: GeoPoint,
}

impl SurveyDataset {
    pub fn new(fallback: GeoPoint) -> Self {
        SurveyDataset { observations: Vec::new(), warnings: Vec::new(), fallback }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Warnings from the most recent load, one per unavailable source.
    pub fn warnings(&self) -> &[SourceWarning] {
        &self.warnings
    }

    /// Fetch every source in priority order (most local last) and rebuild
    /// the merged collection. Unavailable sources degrade to empty tables.
    pub fn load(&mut self, sources: &[&dyn TableSource]) {
        let mut tables = Vec::with_capacity(sources.len());
        let mut warnings = Vec::new();

        for source in sources {
            let (table, warning) = fetch_or_empty(*source);
            if let Some(w) = warning {
                warnings.push(w);
            }
            tables.push(table);
        }

        self.observations = reconcile(&tables, self.fallback);
        self.warnings = warnings;
        println!("Reconciled {} observations from {} sources", self.observations.len(), sources.len());
    }

    /// Full invalidation plus load; run after a successful append or a
    /// manual refresh. There is no partial invalidation.
    pub fn reload(&mut self, sources: &[&dyn TableSource]) {
        self.invalidate();
        self.load(sources);
    }

    pub fn invalidate(&mut self) {
        self.observations.clear();
        self.warnings.clear();
    }

    /// Adopt an already-persisted collection, e.g. the outcome of a
    /// successful append, without refetching the sources.
    pub fn adopt(&mut self, observations: Vec<Observation>) {
        self.observations = observations;
        self.warnings.clear();
    }

    /// Back the merged view up to a sink, the way the original mirrored
    /// cloud data into the local file on every load.
    pub fn backup_to(&self, sink: &dyn RecordSink) {
        if self.observations.is_empty() {
            return;
        }
        if let Err(e) = sink.persist_all(&self.observations) {
            eprintln!("Backup to '{}' failed: {}", sink.label(), e);
        }
    }
}
