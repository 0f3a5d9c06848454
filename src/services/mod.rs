//! Business logic services.

pub mod access;
pub mod auth;
pub mod dashboard;
pub mod derived;
pub mod upstream;
