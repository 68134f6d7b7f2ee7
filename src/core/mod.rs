//! Core types shared by formatters and conversions

pub mod error;
pub mod error_code;
pub mod temporal;

pub use error::*;
pub use error_code::*;
pub use temporal::*;
