//! Listing search, price masks and the property editing flow for a
//! real-estate site, on top of its REST backend.

pub mod admin;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod wizard;

pub use error::{DeskError, Result};
