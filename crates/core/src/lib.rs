//! # Slotbook Core
//!
//! Domain models and the pure half of the availability & booking engine:
//! canonical time conversion, slot generation, interval overlap and
//! validation rules. Everything here is side-effect free; persistence and
//! orchestration live in the `slotbook-db` and `slotbook-api` crates.

pub mod booking;
pub mod errors;
pub mod models;
pub mod services;
pub mod slots;
pub mod time;
