//! Domain layer - user records and their display model.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod detail;
pub mod error;
pub mod user;

pub use constants::*;
pub use detail::UserDetail;
pub use error::{DomainError, DomainResult};
pub use user::{Address, Company, Geo, User};
