//! Authentication primitives: JWT bearer tokens and password hashing.

pub mod jwt;
pub mod password;
