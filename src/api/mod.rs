//! HTTP surface
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | `GET` | `/health` | `200 {"status":"ok"}` |
//! | `POST` | `/sync?updated_since=<ISO 8601>` | `200` with the [`SyncResult`](crate::core::sync::SyncResult) JSON |
//!
//! Errors are returned as `{"error": "<message>"}`: `400` for an
//! unparseable `updated_since`, `502` when the appointment source cannot be
//! read, `500` otherwise.

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use server::{app, serve};
pub use state::AppState;
