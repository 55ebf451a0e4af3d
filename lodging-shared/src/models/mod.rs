pub mod booking;
pub mod hotel;
pub mod session;
pub mod ticket;
