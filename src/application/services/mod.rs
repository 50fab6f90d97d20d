//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (DatasetSource, ClassifierTransport)
//! but are themselves concrete structs, not traits.

mod classifier;
mod corpus;
mod session;

pub use classifier::{effective_token, interpret_reply, ClassifierService};
pub use corpus::{CorpusService, LoadedCorpus};
pub use session::ReviewSession;
