//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod leave;
pub mod patients;
pub mod roster;
pub mod schemas;
pub mod staff;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
