//! HTTP API server for tracker issue tracking.
//!
//! This crate exposes the tracker store and list pipeline over a small JSON
//! API built on axum.
//!
//! # Architecture
//!
//! A single [`SharedStorage`](tracker::storage::SharedStorage) is created at
//! startup and injected into the router state. Handlers take its read lock
//! for lookups and list queries, and its write lock for mutations.
//!
//! # Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /issues` - Search, filter, sort and paginate issues
//! - `GET /issues/{id}` - Show one issue
//! - `POST /issues` - Create an issue
//! - `PUT /issues/{id}` - Update issue fields
//! - `DELETE /issues/{id}` - Delete an issue

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;

pub use error::{ApiError, StartupError};
pub use server::TrackerServer;
