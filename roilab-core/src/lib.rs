//! RoiLab Core — domain types, strategy presets, projection engine.
//!
//! This crate contains the pure computation:
//! - Domain types (context, strategy configuration, yearly projections, results)
//! - Preset catalog with five named parameter bundles
//! - Year-by-year projection engine (cash flows, ROI, payback, IRR approximation)
//! - Input fingerprinting for reproducible reports
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod domain;
pub mod engine;
pub mod fingerprint;
pub mod presets;

pub use domain::{GlobalContext, StrategyConfig, StrategyId, StrategyResult, YearlyProjection};
pub use engine::{project, ProjectionError};
pub use fingerprint::InputFingerprint;
pub use presets::{lookup, CatalogError, StrategyPreset};
