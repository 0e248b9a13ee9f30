//! Data model, access rules and assignment reconciliation for studycrew.
//!
//! This crate defines the records exchanged with the studycrew backend, the
//! `StudyCrewApi` trait the client implements, and the pure logic behind the
//! dashboards: course filtering, role gating and assignment diffs.

pub mod access;
pub mod catalog;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod storage;
pub mod traits;
pub mod validation;

pub use error::ApiError;
pub use traits::{ApiResult, StudyCrewApi};
