//! Utility modules for the Coursebay API.
//!
//! - [`errors`]: Application error types and HTTP mapping
//! - [`jwt`]: Access and refresh token creation and verification
//! - [`password`]: Password hashing and verification
//! - [`response`]: The uniform success envelope

pub mod errors;
pub mod jwt;
pub mod password;
pub mod response;
