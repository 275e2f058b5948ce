//! HTTP backend for the accountability tracker.
//!
//! A thin axum layer over [`breathbox_core`]: the completion API plus
//! static hosting for the web frontend. All ledger behavior lives in the
//! core crate; handlers only translate HTTP to it.

pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
