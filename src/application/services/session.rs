//! Review session controller
//!
//! Owns the current corpus, the review on display, and the latest result.
//! Every operation takes `&mut self`, so at most one request is in flight.

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::application::services::{ClassifierService, CorpusService};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    next_state, ClassificationResult, LoadReport, Presentation, ReviewCorpus, UiEvent, UiState,
};

pub struct ReviewSession {
    loader: CorpusService,
    classifier: ClassifierService,
    token: Option<String>,
    corpus: ReviewCorpus,
    location: Option<String>,
    current_review: Option<String>,
    last_result: Option<ClassificationResult>,
    last_error: Option<String>,
    state: UiState,
    observer: Option<Box<dyn FnMut(UiState)>>,
}

impl ReviewSession {
    pub fn new(loader: CorpusService, classifier: ClassifierService, token: Option<String>) -> Self {
        Self {
            loader,
            classifier,
            token,
            corpus: ReviewCorpus::default(),
            location: None,
            current_review: None,
            last_result: None,
            last_error: None,
            state: UiState::Idle,
            observer: None,
        }
    }

    /// Call `observer` on every state change, before any blocking call that
    /// follows it.
    pub fn set_observer(&mut self, observer: impl FnMut(UiState) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    fn apply(&mut self, event: UiEvent) {
        let next = next_state(event);
        debug!("state {} -> {} on {:?}", self.state, next, event);
        self.state = next;
        if let Some(observer) = self.observer.as_mut() {
            observer(next);
        }
    }

    /// Load a dataset, replacing the corpus only once the new one is complete.
    ///
    /// On failure the previous corpus stays in place and any earlier result
    /// is dropped.
    #[instrument(skip(self))]
    pub fn load(&mut self, location: &str) -> ApplicationResult<LoadReport> {
        self.apply(UiEvent::LoadStarted);
        match self.loader.load(location) {
            Ok(loaded) => {
                self.corpus = loaded.corpus;
                self.location = Some(loaded.location);
                self.current_review = None;
                self.last_result = None;
                self.last_error = None;
                self.apply(UiEvent::LoadSucceeded);
                Ok(loaded.report)
            }
            Err(e) => {
                warn!("load failed: {}", e);
                self.last_result = None;
                self.last_error = Some(e.to_string());
                self.apply(UiEvent::LoadFailed);
                Err(e.into())
            }
        }
    }

    /// Select a random review and make it current.
    pub fn pick(&mut self) -> Option<&str> {
        self.pick_with(&mut rand::rng())
    }

    pub fn pick_with<R: Rng>(&mut self, rng: &mut R) -> Option<&str> {
        let review = self.corpus.pick_random_with(rng)?.to_owned();
        self.current_review = Some(review);
        self.last_result = None;
        self.last_error = None;
        self.apply(UiEvent::ReviewPicked);
        self.current_review.as_deref()
    }

    /// Classify the review currently on display.
    ///
    /// On failure the review is kept and the state becomes `Error`.
    #[instrument(skip(self))]
    pub fn analyze_current(&mut self) -> ApplicationResult<ClassificationResult> {
        let review = self
            .current_review
            .clone()
            .ok_or(ApplicationError::NoCurrentReview)?;

        self.apply(UiEvent::AnalysisStarted);
        match self.classifier.analyze(&review, self.token.as_deref()) {
            Ok(result) => {
                self.apply(UiEvent::AnalysisSucceeded(result.bucket));
                self.last_result = Some(result.clone());
                self.last_error = None;
                Ok(result)
            }
            Err(e) => {
                self.last_result = None;
                self.last_error = Some(e.to_string());
                self.apply(UiEvent::AnalysisFailed);
                Err(e.into())
            }
        }
    }

    /// Pick a random review and classify it.
    pub fn pick_and_analyze(&mut self) -> ApplicationResult<ClassificationResult> {
        self.pick_and_analyze_with(&mut rand::rng())
    }

    pub fn pick_and_analyze_with<R: Rng>(
        &mut self,
        rng: &mut R,
    ) -> ApplicationResult<ClassificationResult> {
        if self.pick_with(rng).is_none() {
            return Err(ApplicationError::NoReviewLoaded);
        }
        let chars = self
            .current_review
            .as_deref()
            .map_or(0, |r| r.chars().count());
        info!("picked review ({} chars)", chars);
        self.analyze_current()
    }

    /// Classify the current review again.
    pub fn reanalyze(&mut self) -> ApplicationResult<ClassificationResult> {
        self.analyze_current()
    }

    /// Display an arbitrary text as the current review.
    pub fn set_current_review(&mut self, review: impl Into<String>) {
        self.current_review = Some(review.into());
        self.last_result = None;
        self.last_error = None;
        self.apply(UiEvent::ReviewPicked);
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn presentation(&self) -> Presentation {
        self.state.presentation()
    }

    pub fn corpus(&self) -> &ReviewCorpus {
        &self.corpus
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn current_review(&self) -> Option<&str> {
        self.current_review.as_deref()
    }

    pub fn last_result(&self) -> Option<&ClassificationResult> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
