//! revsent: pick a review from a TSV corpus and classify its sentiment
//!
//! Layers, innermost first:
//! - `domain`: corpus parsing, response normalization, display state
//! - `application`: services and the review session over I/O traits
//! - `infrastructure`: HTTP and file implementations, service container
//! - `cli`: arguments, command dispatch, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
