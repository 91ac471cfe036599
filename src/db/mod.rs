//! Database module
//!
//! SQLite through SQLx. The database is only read at startup and on reload;
//! requests are served from the in-memory stores.

mod engine;
pub mod tables;

pub use engine::DbEngine;
pub use tables::*;
