//! Console demo of the checkout workflows against an in-memory backend.
pub mod platform;
