//! Tracker - an in-memory issue store with a query pipeline.
//!
//! This crate provides the issue domain types, a storage trait with an
//! in-memory backend, and the search/filter/sort/paginate pipeline used to
//! answer list requests.

#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod query;
pub mod seed;
pub mod storage;
