//! Authentication module for Portfolio Core.
//!
//! Admin users are listed in configuration and log in for a JWT. Public routes need
//! no authentication.

mod jwt;
mod middleware;

pub use jwt::*;
pub use middleware::*;
