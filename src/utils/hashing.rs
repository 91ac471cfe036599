//! Identity hashing
//!
//! Every album and artist in the library is named by a hash derived from its
//! display strings. The same inputs always produce the same identity, across
//! calls and across restarts, so identities can be compared, sorted and
//! persisted freely.

use xxhash_rust::xxh3::xxh3_64;

/// Length of every identity string
pub const HASH_LEN: usize = 11;

/// Create a case-insensitive, alphanumeric-normalized hash
///
/// # Arguments
/// * `args` - Strings to hash together
/// * `decode` - Whether to decode unicode to ASCII
///
/// # Returns
/// An 11-character hex string hash
pub fn create_hash(args: &[&str], decode: bool) -> String {
    let mut combined = String::new();

    for arg in args {
        combined.push_str(&remove_non_alnum(arg));
    }

    if decode {
        combined = deunicode::deunicode(&combined);
    }

    let hash = xxh3_64(combined.as_bytes());
    format!("{:016x}", hash)[..HASH_LEN].to_string()
}

/// Lowercase, strip spaces and drop punctuation. Strings made only of
/// punctuation are kept as-is so "..." and "!!!" still hash apart.
fn remove_non_alnum(token: &str) -> String {
    let lower = token.to_lowercase();
    let trimmed = lower.trim().replace(' ', "");

    let filtered: String = trimmed.chars().filter(|c| c.is_alphanumeric()).collect();

    if filtered.is_empty() {
        trimmed
    } else {
        filtered
    }
}

/// Create the identity of an album from its title and album artist
pub fn create_album_hash(title: &str, albumartist: &str) -> String {
    create_hash(&[title, albumartist], true)
}

/// Create the identity of an artist from its canonical name
pub fn create_artist_hash(name: &str) -> String {
    create_hash(&[name], true)
}

/// Create a hash for a track
pub fn create_track_hash(artists: &str, album: &str, title: &str) -> String {
    create_hash(&[artists, album, title], true)
}
