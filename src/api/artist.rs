//! Artist API routes

use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;
use std::sync::Arc;

use crate::config::UserConfig;
use crate::core::{ArtistLib, ArtistsCache};
use crate::error::LibraryError;
use crate::serializers::{
    serialize_tracks, ArtistAlbumsResponse, ArtistSummaryResponse, ArtistTracksResponse,
};

/// Shared state for the artist routes
pub struct AppState {
    pub cache: Arc<ArtistsCache>,
    pub config: UserConfig,
}

/// query parameters for get_artist endpoint
#[derive(Debug, Deserialize)]
pub struct GetArtistQuery {
    /// the number of tracks to return
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ArtistAlbumsQuery {
    /// the number of albums to return per group
    pub limit: Option<usize>,
    /// return every album, ignoring limit
    pub all: Option<String>,
}

impl ArtistAlbumsQuery {
    fn return_all(&self) -> bool {
        match self.all.as_deref() {
            None => false,
            Some(value) => !matches!(value.trim().to_lowercase().as_str(), "0" | "false"),
        }
    }
}

fn error_response(err: LibraryError) -> HttpResponse {
    match err {
        LibraryError::ArtistNotFound(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Artist not found"
        })),
        err => {
            tracing::error!("Artist request failed: {}", err);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": err.to_string()
            }))
        }
    }
}

/// Get artist by hash
#[get("/{artisthash}")]
pub async fn get_artist(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<GetArtistQuery>,
) -> impl Responder {
    let artisthash = path.into_inner();
    let limit = query.limit.unwrap_or(state.config.artist_track_limit);

    match ArtistLib::get_artist_summary(&state.cache, &artisthash, limit) {
        Ok(summary) => HttpResponse::Ok().json(ArtistSummaryResponse::from(summary)),
        Err(e) => error_response(e),
    }
}

/// Get artist albums
#[get("/{artisthash}/albums")]
pub async fn get_artist_albums(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ArtistAlbumsQuery>,
) -> impl Responder {
    let artisthash = path.into_inner();
    let limit = query.limit.unwrap_or(state.config.artist_album_limit);

    match ArtistLib::get_artist_albums(&state.cache, &artisthash, limit, query.return_all()) {
        Ok(page) => HttpResponse::Ok().json(ArtistAlbumsResponse::from(page)),
        Err(e) => error_response(e),
    }
}

/// Get artist tracks (all)
#[get("/{artisthash}/tracks")]
pub async fn get_artist_tracks(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let artisthash = path.into_inner();

    match ArtistLib::get_all_tracks(&state.cache, &artisthash) {
        Ok(tracks) => HttpResponse::Ok().json(ArtistTracksResponse {
            tracks: serialize_tracks(tracks),
        }),
        Err(e) => error_response(e),
    }
}

/// Configure artist routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_artist)
        .service(get_artist_tracks)
        .service(get_artist_albums);
}
