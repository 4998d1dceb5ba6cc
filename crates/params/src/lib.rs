//! Constant values for the eccrypt library
//!
//! This crate has no dependencies. Everything here is plain data consumed by
//! `eccrypt-algorithms` and `eccrypt-sign`.

#![no_std]

pub mod curves;
pub mod ecdsa;
pub mod encoding;
