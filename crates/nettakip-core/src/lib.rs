//! nettakip-core — Core data model, scoring, and timer logic.
//!
//! This crate defines the fundamental types, the net-score arithmetic, the
//! stat aggregation, the Pomodoro state machine, and the traits that the
//! record-store and coach crates build on.

pub mod config;
pub mod error;
pub mod model;
pub mod pomodoro;
pub mod scoring;
pub mod state;
pub mod stats;
pub mod traits;
