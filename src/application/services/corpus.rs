//! Corpus loading service
//!
//! Fetches a dataset through a `DatasetSource` and turns it into a `ReviewCorpus`.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::{parse_tsv, LoadError, LoadReport, ReviewCorpus};
use crate::infrastructure::traits::DatasetSource;

/// A freshly built corpus and the row accounting that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedCorpus {
    pub location: String,
    pub corpus: ReviewCorpus,
    pub report: LoadReport,
}

/// Service for loading review datasets.
pub struct CorpusService {
    source: Arc<dyn DatasetSource>,
}

impl CorpusService {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self { source }
    }

    /// Fetch and parse the dataset at `location`.
    #[instrument(skip(self))]
    pub fn load(&self, location: &str) -> Result<LoadedCorpus, LoadError> {
        let text = self.source.fetch(location).map_err(|e| {
            warn!("fetch failed: {}", e);
            LoadError::NotFound {
                location: location.to_string(),
                reason: e.to_string(),
            }
        })?;

        let (corpus, report) = parse_tsv(&text).map_err(|e| {
            warn!("parse failed: {}", e);
            e
        })?;
        info!(
            "loaded {} reviews from {} rows ({} blank, {} malformed)",
            report.kept, report.rows, report.blank, report.malformed
        );

        Ok(LoadedCorpus {
            location: location.to_string(),
            corpus,
            report,
        })
    }
}
