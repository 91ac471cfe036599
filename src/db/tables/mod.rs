//! Database table operations

mod favorite_table;
mod track_table;

pub use favorite_table::FavoriteTable;
pub use track_table::TrackTable;
