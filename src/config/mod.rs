//! Configuration modules for the Coursebay API.
//!
//! Each submodule handles a specific aspect of configuration, typically
//! loaded from environment variables.
//!
//! # Modules
//!
//! - [`auth`]: Token secrets, token expiries, and the bcrypt cost
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Bind address for the HTTP listener
//! - [`storage`]: Upload directory and public URL for course images
//!
//! # Environment Variables
//!
//! Most configuration is loaded from environment variables. See each
//! submodule for specific variable names and their defaults.

pub mod auth;
pub mod cors;
pub mod server;
pub mod storage;
