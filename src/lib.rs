//! Offer decision engine for gig drivers.
//!
//! [`decision`] holds the pure metrics calculator and classifier. [`orders`] wraps it with
//! request validation, the order log, aggregate stats, and the HTTP router consumed by the
//! API service.

pub mod config;
pub mod decision;
pub mod error;
pub mod orders;
pub mod telemetry;
