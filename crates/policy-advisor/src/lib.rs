//! Insurance policy recommendations over a CSV catalog: risk scoring, filtering
//! and ranking, premium quotes, and optional generated rationales.

pub mod advisor;
pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod telemetry;
