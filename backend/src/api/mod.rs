//! HTTP-facing helpers shared across routers.

pub mod common;
