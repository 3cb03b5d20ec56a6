#![forbid(unsafe_code)]

//! Core types shared by the sigload crates: the error taxonomy and the
//! PEM label / algorithm name constants.

pub mod algorithm;
pub mod error;

pub use error::{DecodeError, Error, Result};
