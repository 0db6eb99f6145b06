//! # Domain Models
//!
//! Pure domain types with minimal dependencies (`serde`, `strum`).
//! Keep it lean: no I/O, networking, or inference logic, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod crop;
pub mod registry;
pub mod sample;
