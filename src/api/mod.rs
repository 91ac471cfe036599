//! REST API routes

pub mod artist;

use actix_web::web;

pub use artist::AppState;

/// Configure all API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/artist").configure(artist::configure));
}
