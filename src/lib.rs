//! Cap Table Engine
//!
//! This crate models a startup's capitalization table through an ordered
//! sequence of financing events (priced rounds, SAFEs, ESOP pool top-ups,
//! founder secondary sales) and projects every stakeholder's ownership and
//! dollar outcome at the current valuation and at a hypothetical exit.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
