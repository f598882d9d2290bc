//! Collection of general utility functions shared by the auth core.
//!
//! Holds the password hasher and the token issuer/verifier.

pub mod jwt;
pub mod password;
