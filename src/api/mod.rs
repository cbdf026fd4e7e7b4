//! Backend API
//!
//! Data-access layer for the event-booking backend.

pub mod client;

pub use client::*;
