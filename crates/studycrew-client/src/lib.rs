//! REST client and session store for studycrew.
//!
//! Implements the `StudyCrewApi` trait over HTTP, keeps the signed-in session
//! in local storage, and wires the dashboard flows together.

pub mod config;
pub mod dashboard;
pub mod http;
pub mod mock;
pub mod session;

pub use config::{load_config, load_config_from, StudyCrewConfig};
pub use http::HttpApi;
pub use session::SessionStore;
