//! Track utilities

use std::collections::HashMap;

use crate::models::Track;

/// Remove duplicate tracks, keeping the highest bitrate copy of each.
///
/// Duplicates share a trackhash (the same recording tagged on several discs
/// or ripped twice). First-seen order is kept unless `sort` asks for disc and
/// track order.
pub fn remove_duplicates(tracks: Vec<Track>, sort: bool) -> Vec<Track> {
    let mut best: HashMap<String, usize> = HashMap::new();
    let mut result: Vec<Track> = Vec::with_capacity(tracks.len());

    for track in tracks {
        match best.get(&track.trackhash) {
            Some(&idx) => {
                if track.bitrate > result[idx].bitrate {
                    result[idx] = track;
                }
            }
            None => {
                best.insert(track.trackhash.clone(), result.len());
                result.push(track);
            }
        }
    }

    if sort {
        sort_by_disc_and_track(&mut result);
    }

    result
}

/// Sort tracks by disc and track number
pub fn sort_by_disc_and_track(tracks: &mut [Track]) {
    tracks.sort_by_key(|t| t.sort_position());
}
