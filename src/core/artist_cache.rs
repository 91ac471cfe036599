//! Artist page cache
//!
//! Building an artist page takes three lazy stages: collect the artist's
//! tracks (and with them the identities of every album they touch), resolve
//! those identities into full albums, then run the type analysis on every
//! album. Each stage runs at most once per cache entry and its result is kept
//! until the entry is evicted, so paging through an artist does not redo the
//! work.
//!
//! Entries live in an LRU keyed by artisthash. An entry can be evicted by a
//! request for another artist while one of its stages is running; the stage
//! then reports [`LibraryError::MissingCacheEntry`] and
//! [`ArtistsCache::classified_albums`] repopulates from scratch.

use dashmap::DashMap;
use lru::LruCache;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::core::albumtype::AlbumAnalyzer;
use crate::error::{LibraryError, Result};
use crate::models::{Album, Track};
use crate::stores::MediaSource;
use crate::utils::tracks::remove_duplicates;

/// How many times a pipeline is restarted after losing its entry before it
/// falls back to an uncached computation
const MAX_REPOPULATE_ATTEMPTS: usize = 3;

/// Progress of a cache entry. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CacheStage {
    Empty,
    TracksLoaded,
    AlbumsLoaded,
    TypeChecked,
}

/// Cached state for one artist
#[derive(Debug, Clone)]
pub struct CacheEntry {
    artisthash: String,
    albumhashes: HashSet<String>,
    tracks: Vec<Track>,
    albums: Vec<Album>,
    albums_fetched: bool,
    type_checked: bool,
    generation: u64,
}

impl CacheEntry {
    pub fn new(artisthash: String, albumhashes: HashSet<String>, tracks: Vec<Track>) -> Self {
        Self {
            artisthash,
            albumhashes,
            tracks,
            albums: Vec::new(),
            albums_fetched: false,
            type_checked: false,
            generation: 0,
        }
    }

    pub fn stage(&self) -> CacheStage {
        if self.type_checked {
            CacheStage::TypeChecked
        } else if self.albums_fetched {
            CacheStage::AlbumsLoaded
        } else if !self.tracks.is_empty() {
            CacheStage::TracksLoaded
        } else {
            CacheStage::Empty
        }
    }
}

/// LRU of artist pages with at most one population pipeline per artist
pub struct ArtistsCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    pipelines: DashMap<String, Arc<Mutex<()>>>,
    next_generation: AtomicU64,
    source: Arc<dyn MediaSource>,
    analyzer: Arc<dyn AlbumAnalyzer>,
}

impl ArtistsCache {
    pub fn new(
        source: Arc<dyn MediaSource>,
        analyzer: Arc<dyn AlbumAnalyzer>,
        capacity: NonZeroUsize,
    ) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            pipelines: DashMap::new(),
            next_generation: AtomicU64::new(1),
            source,
            analyzer,
        }
    }

    /// The stores this cache reads from
    pub fn source(&self) -> &dyn MediaSource {
        self.source.as_ref()
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every entry. Called whenever the library is reloaded.
    pub fn clear(&self) {
        self.entries.lock().clear();
        tracing::debug!("Artist cache cleared");
    }

    pub fn contains(&self, artisthash: &str) -> bool {
        self.entries.lock().contains(artisthash)
    }

    pub fn stage(&self, artisthash: &str) -> Option<CacheStage> {
        self.entries.lock().peek(artisthash).map(CacheEntry::stage)
    }

    /// Cache a fresh entry for the artist, replacing any previous one and
    /// evicting the least recently used artist when full
    pub fn put(&self, artisthash: &str, albumhashes: HashSet<String>, tracks: Vec<Track>) {
        self.insert(CacheEntry::new(artisthash.to_string(), albumhashes, tracks));
    }

    fn insert(&self, mut entry: CacheEntry) {
        entry.generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let key = entry.artisthash.clone();

        if let Some((evicted, _)) = self.entries.lock().push(key.clone(), entry) {
            if evicted != key {
                tracing::debug!("Artist cache evicted {}", evicted);
            }
        }
    }

    pub fn has_tracks_cached(&self, artisthash: &str) -> bool {
        self.entries
            .lock()
            .peek(artisthash)
            .is_some_and(|e| !e.tracks.is_empty())
    }

    pub fn has_albums_cached(&self, artisthash: &str) -> bool {
        self.entries
            .lock()
            .peek(artisthash)
            .is_some_and(|e| !e.albums.is_empty())
    }

    pub fn is_albums_fetched(&self, artisthash: &str) -> bool {
        self.entries
            .lock()
            .peek(artisthash)
            .is_some_and(|e| e.albums_fetched)
    }

    pub fn is_type_checked(&self, artisthash: &str) -> bool {
        self.entries
            .lock()
            .peek(artisthash)
            .is_some_and(|e| e.type_checked)
    }

    /// Cached tracks for the artist, if the artist has an entry
    pub fn cached_tracks(&self, artisthash: &str) -> Option<Vec<Track>> {
        self.entries.lock().get(artisthash).map(|e| e.tracks.clone())
    }

    /// Cached albums for the artist in their current stage
    pub fn albums(&self, artisthash: &str) -> Result<Vec<Album>> {
        self.entries
            .lock()
            .get(artisthash)
            .map(|e| e.albums.clone())
            .ok_or_else(|| missing(artisthash))
    }

    /// Stage 2: resolve the entry's album identities into albums.
    ///
    /// Albums crediting the artist as album artist are added even when none
    /// of the artist's known tracks are on them.
    pub fn load_albums(&self, artisthash: &str) -> Result<()> {
        let (albumhashes, generation) = {
            let mut entries = self.entries.lock();
            let entry = entries.get(artisthash).ok_or_else(|| missing(artisthash))?;
            if entry.albums_fetched {
                return Ok(());
            }
            (entry.albumhashes.clone(), entry.generation)
        };

        let albums = resolve_albums(self.source(), artisthash, &albumhashes);

        let mut entries = self.entries.lock();
        let entry = entries
            .get_mut(artisthash)
            .filter(|e| e.generation == generation)
            .ok_or_else(|| missing(artisthash))?;

        if !entry.albums_fetched {
            tracing::debug!("Fetched {} albums for artist {}", albums.len(), artisthash);
            entry.albums = albums;
            entry.albums_fetched = true;
        }

        Ok(())
    }

    /// Stage 3: run the type analysis on every cached album, using each
    /// album's own deduplicated tracks from the track store. Runs stage 2
    /// first if needed.
    pub fn classify_types(&self, artisthash: &str) -> Result<()> {
        self.load_albums(artisthash)?;

        let (albums, generation) = {
            let mut entries = self.entries.lock();
            let entry = entries.get(artisthash).ok_or_else(|| missing(artisthash))?;
            if entry.type_checked {
                return Ok(());
            }
            (entry.albums.clone(), entry.generation)
        };

        let albums = analyze_albums(self.source(), self.analyzer.as_ref(), albums);

        let mut entries = self.entries.lock();
        let entry = entries
            .get_mut(artisthash)
            .filter(|e| e.generation == generation && e.albums_fetched)
            .ok_or_else(|| missing(artisthash))?;

        if !entry.type_checked {
            tracing::debug!("Type checked {} albums for artist {}", albums.len(), artisthash);
            entry.albums = albums;
            entry.type_checked = true;
        }

        Ok(())
    }

    /// The artist's tracks, from the cache or freshly loaded into it
    pub fn artist_tracks(&self, artisthash: &str) -> Vec<Track> {
        self.with_pipeline(artisthash, || match self.cached_tracks(artisthash) {
            Some(tracks) => tracks,
            None => self.populate(artisthash),
        })
    }

    /// The artist's albums with every stage complete.
    ///
    /// Losing the entry to eviction mid-pipeline restarts it; if that keeps
    /// happening the albums are computed without the cache.
    pub fn classified_albums(&self, artisthash: &str) -> Result<Vec<Album>> {
        self.with_pipeline(artisthash, || {
            for attempt in 1..=MAX_REPOPULATE_ATTEMPTS {
                match self.advance(artisthash) {
                    Err(LibraryError::MissingCacheEntry(_)) => {
                        tracing::warn!(
                            "Artist {} was evicted mid-pipeline (attempt {}), repopulating",
                            artisthash,
                            attempt
                        );
                    }
                    other => return other,
                }
            }

            tracing::warn!("Building albums for artist {} without the cache", artisthash);
            let entry = self.fresh_entry(artisthash);
            let albums = resolve_albums(self.source(), artisthash, &entry.albumhashes);
            Ok(analyze_albums(self.source(), self.analyzer.as_ref(), albums))
        })
    }

    fn advance(&self, artisthash: &str) -> Result<Vec<Album>> {
        if !self.contains(artisthash) {
            self.populate(artisthash);
        }
        self.load_albums(artisthash)?;
        self.classify_types(artisthash)?;
        self.albums(artisthash)
    }

    /// Stage 1: load the artist's tracks and album identities into a new entry
    fn populate(&self, artisthash: &str) -> Vec<Track> {
        let entry = self.fresh_entry(artisthash);
        let tracks = entry.tracks.clone();
        tracing::debug!(
            "Caching artist {} ({} tracks, {} albums)",
            artisthash,
            tracks.len(),
            entry.albumhashes.len()
        );
        self.insert(entry);
        tracks
    }

    fn fresh_entry(&self, artisthash: &str) -> CacheEntry {
        let tracks = self.source.tracks_by_artist(artisthash);

        let mut albumhashes: HashSet<String> = tracks.iter().map(|t| t.albumhash.clone()).collect();
        albumhashes.extend(
            self.source
                .albums_by_artist(artisthash)
                .into_iter()
                .map(|a| a.albumhash),
        );

        CacheEntry::new(artisthash.to_string(), albumhashes, tracks)
    }

    /// Run `f` holding the artist's pipeline lock
    fn with_pipeline<T>(&self, artisthash: &str, f: impl FnOnce() -> T) -> T {
        let lock = self
            .pipelines
            .entry(artisthash.to_string())
            .or_default()
            .clone();

        let result = {
            let _guard = lock.lock();
            f()
        };

        drop(lock);
        self.pipelines
            .remove_if(artisthash, |_, lock| Arc::strong_count(lock) == 1);

        result
    }
}

fn missing(artisthash: &str) -> LibraryError {
    LibraryError::MissingCacheEntry(artisthash.to_string())
}

/// Resolve album identities, then add the artist's albums the identities did
/// not cover. The result is ordered by albumhash.
fn resolve_albums(
    source: &dyn MediaSource,
    artisthash: &str,
    albumhashes: &HashSet<String>,
) -> Vec<Album> {
    let mut albums: Vec<Album> = albumhashes
        .iter()
        .filter_map(|h| source.album_by_hash(h))
        .collect();

    let mut seen: HashSet<String> = albums.iter().map(|a| a.albumhash.clone()).collect();
    for album in source.albums_by_artist(artisthash) {
        if seen.insert(album.albumhash.clone()) {
            albums.push(album);
        }
    }

    albums.sort_by(|a, b| a.albumhash.cmp(&b.albumhash));
    albums
}

/// Analyze every album against its deduplicated tracks, newest first
fn analyze_albums(
    source: &dyn MediaSource,
    analyzer: &dyn AlbumAnalyzer,
    mut albums: Vec<Album>,
) -> Vec<Album> {
    for album in albums.iter_mut() {
        let tracks = remove_duplicates(source.tracks_by_album(&album.albumhash), true);
        analyzer.analyze(album, &tracks);
    }

    albums.sort_by(|a, b| b.date.cmp(&a.date));
    albums
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::albumtype::TagHeuristics;
    use crate::testing::{make_album, make_track, FakeSource};
    use crate::utils::hashing::create_artist_hash;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{OnceLock, Weak};

    /// Counts calls and optionally evicts the artist under analysis
    #[derive(Default)]
    struct TestAnalyzer {
        calls: AtomicUsize,
        evictions_left: AtomicUsize,
        delay_ms: AtomicU64,
        cache: OnceLock<Weak<ArtistsCache>>,
    }

    impl AlbumAnalyzer for TestAnalyzer {
        fn analyze(&self, album: &mut Album, tracks: &[Track]) {
            self.calls.fetch_add(1, Ordering::SeqCst);

            let delay = self.delay_ms.load(Ordering::SeqCst);
            if delay > 0 {
                std::thread::sleep(std::time::Duration::from_millis(delay));
            }

            let evict = self
                .evictions_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if evict {
                if let Some(cache) = self.cache.get().and_then(Weak::upgrade) {
                    cache.put("intruder", HashSet::new(), Vec::new());
                }
            }

            TagHeuristics::default().analyze(album, tracks);
        }
    }

    fn sample_source() -> FakeSource {
        let tracks = vec![
            make_track("One", "First", "X", &["X"]),
            make_track("Two", "First", "X", &["X"]),
            make_track("Feature", "Their Record", "Y", &["Y", "X"]),
            make_track("Other", "Unrelated", "Z", &["Z"]),
        ];
        FakeSource::from_tracks(tracks)
    }

    fn cache_with(
        source: FakeSource,
        capacity: usize,
        evictions: usize,
    ) -> (Arc<ArtistsCache>, Arc<TestAnalyzer>) {
        let analyzer = Arc::new(TestAnalyzer::default());
        analyzer.evictions_left.store(evictions, Ordering::SeqCst);
        let cache = Arc::new(ArtistsCache::new(
            Arc::new(source),
            analyzer.clone(),
            NonZeroUsize::new(capacity).unwrap(),
        ));
        let _ = analyzer.cache.set(Arc::downgrade(&cache));
        (cache, analyzer)
    }

    #[test]
    fn test_put_sets_initial_stage() {
        let (cache, _) = cache_with(sample_source(), 4, 0);
        let track = make_track("One", "First", "X", &["X"]);

        cache.put("a", HashSet::new(), vec![track]);
        cache.put("b", HashSet::new(), Vec::new());

        assert_eq!(cache.stage("a"), Some(CacheStage::TracksLoaded));
        assert_eq!(cache.stage("b"), Some(CacheStage::Empty));
        assert_eq!(cache.stage("c"), None);
        assert!(cache.has_tracks_cached("a"));
        assert!(!cache.has_tracks_cached("b"));
        assert!(!cache.has_tracks_cached("c"));
        assert!(!cache.is_albums_fetched("a"));
        assert!(!cache.is_type_checked("a"));
    }

    #[test]
    fn test_capacity_one_keeps_latest_artist() {
        let (cache, _) = cache_with(sample_source(), 1, 0);
        for artist in ["X", "Y", "Z"] {
            cache.artist_tracks(&create_artist_hash(artist));
        }

        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&create_artist_hash("Z")));
        assert!(!cache.contains(&create_artist_hash("X")));
        assert!(!cache.contains(&create_artist_hash("Y")));
    }

    #[test]
    fn test_lru_keeps_most_recent_artists() {
        let (cache, _) = cache_with(sample_source(), 2, 0);
        for key in ["a", "b", "c", "d"] {
            cache.put(key, HashSet::new(), Vec::new());
        }
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), 2);
        assert!(cache.contains("c"));
        assert!(cache.contains("d"));

        // touching "c" makes "d" the next to go
        cache.cached_tracks("c");
        cache.put("e", HashSet::new(), Vec::new());
        assert!(cache.contains("c"));
        assert!(!cache.contains("d"));
    }

    #[test]
    fn test_stages_advance_in_order() {
        let (cache, analyzer) = cache_with(sample_source(), 2, 0);
        let x = create_artist_hash("X");

        assert_eq!(cache.load_albums(&x), Err(LibraryError::MissingCacheEntry(x.clone())));

        let tracks = cache.artist_tracks(&x);
        assert_eq!(tracks.len(), 3);
        assert_eq!(cache.stage(&x), Some(CacheStage::TracksLoaded));

        cache.load_albums(&x).unwrap();
        assert_eq!(cache.stage(&x), Some(CacheStage::AlbumsLoaded));
        assert!(cache.has_albums_cached(&x));
        assert_eq!(cache.albums(&x).unwrap().len(), 2);
        assert!(cache.albums(&x).unwrap().iter().all(|a| a.flags.is_none()));
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);

        cache.classify_types(&x).unwrap();
        assert_eq!(cache.stage(&x), Some(CacheStage::TypeChecked));
        assert!(cache.albums(&x).unwrap().iter().all(|a| a.flags.is_some()));
    }

    #[test]
    fn test_classify_runs_album_stage_first() {
        let (cache, _) = cache_with(sample_source(), 2, 0);
        let x = create_artist_hash("X");
        cache.artist_tracks(&x);

        cache.classify_types(&x).unwrap();
        assert!(cache.is_albums_fetched(&x));
        assert!(cache.is_type_checked(&x));
    }

    #[test]
    fn test_type_check_runs_once() {
        let (cache, analyzer) = cache_with(sample_source(), 2, 0);
        let x = create_artist_hash("X");

        let first = cache.classified_albums(&x).unwrap();
        let calls = analyzer.calls.load(Ordering::SeqCst);
        assert_eq!(calls, first.len());

        let second = cache.classified_albums(&x).unwrap();
        cache.classify_types(&x).unwrap();
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), calls);
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|a| a.flags).collect::<Vec<_>>(),
            second.iter().map(|a| a.flags).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_album_merge_uses_exact_identities() {
        let x = create_artist_hash("X");
        let mut source = FakeSource::default();

        let mut known = make_album("Known", &["Y"]);
        known.albumhash = "xabcx".to_string();
        // "abc" is a substring of "xabcx" but a different album
        let mut credited = make_album("Credited", &["X"]);
        credited.albumhash = "abc".to_string();
        let mut also_known = make_album("Also Known", &["X"]);
        also_known.albumhash = "xabcx2".to_string();

        source.albums = vec![known, credited, also_known];

        let (cache, _) = cache_with(source, 2, 0);
        let albumhashes: HashSet<String> = ["xabcx".to_string(), "xabcx2".to_string()].into();
        cache.put(&x, albumhashes, Vec::new());
        cache.load_albums(&x).unwrap();

        let hashes: Vec<String> = cache
            .albums(&x)
            .unwrap()
            .into_iter()
            .map(|a| a.albumhash)
            .collect();
        assert_eq!(hashes, vec!["abc", "xabcx", "xabcx2"]);
    }

    #[test]
    fn test_unresolvable_identities_are_dropped() {
        let x = create_artist_hash("X");
        let (cache, _) = cache_with(FakeSource::default(), 2, 0);
        cache.put(&x, ["gone".to_string()].into(), Vec::new());

        cache.load_albums(&x).unwrap();
        assert!(cache.is_albums_fetched(&x));
        assert!(!cache.has_albums_cached(&x));
    }

    #[test]
    fn test_evicted_entry_reports_missing() {
        let (cache, _) = cache_with(sample_source(), 1, 0);
        let x = create_artist_hash("X");
        let y = create_artist_hash("Y");

        cache.artist_tracks(&x);
        cache.load_albums(&x).unwrap();
        cache.artist_tracks(&y);

        assert_eq!(cache.classify_types(&x), Err(LibraryError::MissingCacheEntry(x.clone())));
        assert!(!cache.is_type_checked(&x));
    }

    #[test]
    fn test_eviction_mid_pipeline_repopulates() {
        let (cache, analyzer) = cache_with(sample_source(), 1, 1);
        let x = create_artist_hash("X");

        let albums = cache.classified_albums(&x).unwrap();
        assert_eq!(albums.len(), 2);
        assert!(albums.iter().all(|a| a.flags.is_some()));
        assert!(cache.is_type_checked(&x));
        assert!(!cache.contains("intruder"));
        // first pass was thrown away
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_persistent_eviction_falls_back_to_uncached() {
        let (cache, _) = cache_with(sample_source(), 1, usize::MAX);
        let x = create_artist_hash("X");

        let albums = cache.classified_albums(&x).unwrap();
        assert_eq!(albums.len(), 2);
        assert!(albums.iter().all(|a| a.flags.is_some()));
        assert!(!cache.is_type_checked(&x));
    }

    #[test]
    fn test_type_check_uses_deduplicated_album_tracks() {
        let single = make_track("Nights", "Nights", "X", &["X"]);
        // the same recording stored twice still counts as one track
        let source = FakeSource::from_tracks(vec![single.clone(), single]);
        let (cache, _) = cache_with(source, 1, 0);
        let x = create_artist_hash("X");

        let albums = cache.classified_albums(&x).unwrap();
        assert_eq!(albums.len(), 1);
        assert!(albums[0].flags.unwrap().is_single());
    }

    #[test]
    fn test_clear_and_pipeline_locks_released() {
        let (cache, _) = cache_with(sample_source(), 2, 0);
        let x = create_artist_hash("X");
        cache.classified_albums(&x).unwrap();

        assert!(cache.pipelines.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_concurrent_pipelines_for_many_artists() {
        let (cache, _) = cache_with(sample_source(), 1, 0);
        let artists: Vec<String> = ["X", "Y", "Z"].iter().map(|a| create_artist_hash(a)).collect();

        std::thread::scope(|s| {
            for _ in 0..4 {
                for artist in &artists {
                    let cache = &cache;
                    s.spawn(move || {
                        let albums = cache.classified_albums(artist).unwrap();
                        assert!(!albums.is_empty());
                        assert!(albums.iter().all(|a| a.flags.is_some()));
                    });
                }
            }
        });

        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_one_pipeline_per_artist() {
        let (cache, analyzer) = cache_with(sample_source(), 4, 0);
        analyzer.delay_ms.store(20, Ordering::SeqCst);
        let x = create_artist_hash("X");

        let results: Vec<Vec<Album>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.classified_albums(&x).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        // X owns "First" and appears on "Their Record"
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 2);
        assert!(results.iter().all(|albums| albums.len() == 2));
        assert!(cache.is_type_checked(&x));
        assert!(cache.pipelines.is_empty());
    }
}
