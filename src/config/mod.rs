//! Configuration: filesystem paths and the user settings file

mod paths;
mod user_config;

pub use paths::Paths;
pub use user_config::UserConfig;
