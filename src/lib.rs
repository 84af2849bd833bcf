//! # aerobooking
//!
//! Booking core for the AeroColombiana front-end: flight search with a
//! simulated fallback, passenger/seat/service selection, simulated payment,
//! ticket generation, check-in, and admin data operations, all driven by the
//! airline's Spanish-schema REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` is the only module that touches the network. Every other module is
//! a plain transformation of form input into payloads, prices, or documents,
//! so the `cli` crate (and any future view layer) stays a thin driver.

pub mod admin;
pub mod api;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod checkin;
pub mod config;
pub mod error;
pub mod model;
pub mod payment;
pub mod pricing;
pub mod search;
pub mod seats;
pub mod ticket;
pub mod util;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, Resource};
pub use config::ClientConfig;
pub use error::{ApiError, ValidationError};
