//! gbana
//!
//! Terminal dashboard for searching Google Cloud Logging. A search builds a
//! filter expression from a term and an optional time range, runs the
//! `gcloud logging read` command on a worker thread and shows the payload of
//! each returned record.
//!
//! Pure core (`model`, `query`, `integration`, `state`) with an impure shell
//! (`source`, `view`, `logging`).

pub mod config;
pub mod logging;
pub mod model;
pub mod query;
pub mod source;
pub mod state;
pub mod view;

// Re-export main loop integration
pub mod integration;

#[cfg(test)]
mod tests;
