//! External service clients

pub mod weather;
