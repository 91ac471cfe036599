//! Core library functions: ingestion, the artist page cache and its queries

pub mod albums;
pub mod albumtype;
pub mod artist_cache;
pub mod artistlib;
pub mod classifier;
pub mod populate;
pub mod trackslib;

pub use albumtype::TagHeuristics;
pub use artist_cache::ArtistsCache;
pub use artistlib::ArtistLib;
