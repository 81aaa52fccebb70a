//! Tripdesk API server
//!
//! Axum REST backend for trip records and trip-cover image uploads. Trip
//! mutation is gated by bearer-token verification; reads and the upload
//! endpoint are public. See `setup::routes` for the route table.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod store;
