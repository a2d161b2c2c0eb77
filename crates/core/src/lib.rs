//! # CorteYa Core
//!
//! Pure domain logic for the CorteYa barbershop booking service. Nothing in
//! this crate performs I/O: callers load the reservation history and the
//! barbershop record, and the functions here derive loyalty progress and
//! bookable slots from them.

pub mod booking;
pub mod calendar;
pub mod errors;
pub mod hours;
pub mod loyalty;
pub mod models;
pub mod slots;
