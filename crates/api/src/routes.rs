pub mod barbershop;
pub mod health;
pub mod reservation;
pub mod session;
