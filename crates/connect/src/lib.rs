//! Clean Heat Connect - REST access to the rebate backend.
//!
//! This crate implements the repository and auth gateway traits from
//! `cleanheat-core` on top of `reqwest`.

pub mod client;

pub use client::{RebateApiClient, DEFAULT_LOGIN_PATH, DEFAULT_TIMEOUT_SECS};
