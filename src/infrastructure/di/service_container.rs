//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{ClassifierService, CorpusService, ReviewSession};
use crate::config::Settings;
use crate::infrastructure::http::{self, HttpClassifier, LocationDatasetSource};
use crate::infrastructure::traits::{ClassifierTransport, DatasetSource};

/// Container holding the I/O boundaries and the settings they were built from.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Dataset source abstraction
    pub dataset_source: Arc<dyn DatasetSource>,

    /// Classifier transport abstraction
    pub transport: Arc<dyn ClassifierTransport>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let agent = http::agent(settings.timeout());
        let dataset_source = Arc::new(LocationDatasetSource::new(
            agent.clone(),
            settings.max_dataset_bytes,
        ));
        let transport = Arc::new(HttpClassifier::new(
            agent,
            settings.endpoint.clone(),
            settings.max_response_bytes,
        ));
        Self::with_deps(settings, dataset_source, transport)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        dataset_source: Arc<dyn DatasetSource>,
        transport: Arc<dyn ClassifierTransport>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            dataset_source,
            transport,
        }
    }

    pub fn corpus_service(&self) -> CorpusService {
        CorpusService::new(Arc::clone(&self.dataset_source))
    }

    pub fn classifier_service(&self) -> ClassifierService {
        ClassifierService::new(Arc::clone(&self.transport))
    }

    /// Fresh session using the configured token.
    pub fn session(&self) -> ReviewSession {
        ReviewSession::new(
            self.corpus_service(),
            self.classifier_service(),
            self.settings.token.clone(),
        )
    }
}
