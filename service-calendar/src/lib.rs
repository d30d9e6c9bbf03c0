//! Weekly service calendars for public transit.
//!
//! A service's operating days are stored as a few records of the form
//! "these weekdays, between these dates". This crate answers whether a
//! service runs on a given day and edits single dates in or out while
//! keeping the record count small.

pub mod algebra;
pub mod cli;
pub mod config;
pub mod domain;
pub mod service;
