//! Favorite store - membership set of favorited items

use parking_lot::RwLock;
use std::collections::HashSet;

use crate::models::{Favorite, FavoriteType};

/// In-memory store for favorites
#[derive(Default)]
pub struct FavoriteStore {
    favorites: RwLock<HashSet<(FavoriteType, String)>>,
}

impl FavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store contents
    pub fn load(&self, favorites: Vec<Favorite>) {
        let mut set = self.favorites.write();
        set.clear();
        set.extend(favorites.into_iter().map(|f| (f.favorite_type, f.hash)));
    }

    /// Check whether an item is favorited
    pub fn is_favorite(&self, hash: &str, kind: FavoriteType) -> bool {
        self.favorites.read().contains(&(kind, hash.to_string()))
    }

    /// Get total favorite count
    pub fn count(&self) -> usize {
        self.favorites.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorites_are_typed() {
        let store = FavoriteStore::new();
        store.load(vec![Favorite::new("abc".into(), FavoriteType::Artist)]);

        assert!(store.is_favorite("abc", FavoriteType::Artist));
        assert!(!store.is_favorite("abc", FavoriteType::Album));
        assert!(!store.is_favorite("def", FavoriteType::Artist));
        assert_eq!(store.count(), 1);
    }
}
