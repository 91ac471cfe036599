//! Utility modules

pub mod hashing;
pub mod tracks;
