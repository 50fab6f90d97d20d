//! Display state decisions, kept free of any rendering concern.

use std::fmt;

use serde::Serialize;

use crate::domain::entities::SentimentBucket;

/// What the front end currently shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Positive,
    Negative,
    Neutral,
    Error,
}

/// Lifecycle events raised by the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    LoadStarted,
    LoadSucceeded,
    LoadFailed,
    ReviewPicked,
    AnalysisStarted,
    AnalysisSucceeded(SentimentBucket),
    AnalysisFailed,
}

/// Decide the state to display after `event`.
pub fn next_state(event: UiEvent) -> UiState {
    match event {
        UiEvent::LoadStarted | UiEvent::AnalysisStarted => UiState::Loading,
        UiEvent::LoadSucceeded | UiEvent::ReviewPicked => UiState::Idle,
        UiEvent::AnalysisSucceeded(SentimentBucket::Positive) => UiState::Positive,
        UiEvent::AnalysisSucceeded(SentimentBucket::Negative) => UiState::Negative,
        UiEvent::AnalysisSucceeded(SentimentBucket::Neutral) => UiState::Neutral,
        UiEvent::LoadFailed | UiEvent::AnalysisFailed => UiState::Error,
    }
}

/// Coarse color class for a rendered state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Busy,
    Good,
    Bad,
    Muted,
    Failed,
}

/// Icon and status line for a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub icon: &'static str,
    pub status: &'static str,
    pub tone: Tone,
}

pub const ICON_IDLE: &str = "💬";
pub const ICON_LOADING: &str = "⏳";
pub const ICON_POSITIVE: &str = "👍";
pub const ICON_NEGATIVE: &str = "👎";
pub const ICON_NEUTRAL: &str = "😐";

impl UiState {
    /// Map a state to what the user sees. Errors reuse the neutral icon.
    pub fn presentation(self) -> Presentation {
        match self {
            UiState::Idle => Presentation {
                icon: ICON_IDLE,
                status: "ready",
                tone: Tone::Plain,
            },
            UiState::Loading => Presentation {
                icon: ICON_LOADING,
                status: "loading",
                tone: Tone::Busy,
            },
            UiState::Positive => Presentation {
                icon: ICON_POSITIVE,
                status: "positive",
                tone: Tone::Good,
            },
            UiState::Negative => Presentation {
                icon: ICON_NEGATIVE,
                status: "negative",
                tone: Tone::Bad,
            },
            UiState::Neutral => Presentation {
                icon: ICON_NEUTRAL,
                status: "neutral",
                tone: Tone::Muted,
            },
            UiState::Error => Presentation {
                icon: ICON_NEUTRAL,
                status: "failed",
                tone: Tone::Failed,
            },
        }
    }
}

impl fmt::Display for UiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::Positive => "positive",
            UiState::Negative => "negative",
            UiState::Neutral => "neutral",
            UiState::Error => "error",
        };
        f.write_str(s)
    }
}
