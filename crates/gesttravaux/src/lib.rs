//! Core library for the GestTravaux construction-site tracking service.
//!
//! The [`sites`] module carries the domain model, the repository contract,
//! and the inspector-scoped access service; [`storage`] persists uploaded
//! photos and documents on disk. Everything identity-related is explicit:
//! operations take the caller's resolved inspector id as an argument and
//! never consult ambient state.

pub mod config;
pub mod error;
pub mod sites;
pub mod storage;
pub mod telemetry;
