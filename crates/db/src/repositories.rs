pub mod reservation;
pub mod session;
