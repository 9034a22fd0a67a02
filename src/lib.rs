//! Low-voltage feeder sizing.
//!
//! The [`sizing`] module holds the engine: circuit classification, current
//! computation, conductor and breaker selection, system aggregation and
//! conformance checks. Everything else wires the engine into a small JSON
//! service backed by an append-only record store.

pub mod api;
pub mod config;
pub mod controller;
pub mod domain;
pub mod repo;
pub mod sizing;
pub mod telemetry;

pub use domain::{CircuitInput, CircuitRecord, Finding, SystemAnalysis};
pub use sizing::{
    analyze_system, check_conformance, compute_sizing, SizingEngine, SizingError,
};
