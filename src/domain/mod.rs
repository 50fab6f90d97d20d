//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod corpus;
pub mod entities;
pub mod error;
pub mod response;
pub mod ui_state;

pub use corpus::parse_tsv;
pub use entities::*;
pub use error::{AnalysisError, LoadError};
pub use response::{error_detail, parse_prediction};
pub use ui_state::{next_state, Presentation, Tone, UiEvent, UiState};
