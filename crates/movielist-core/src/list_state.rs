use movielist_models::{ListEntry, ListFilter, ListFlags, MovieRef};
use std::collections::HashMap;

use crate::membership::Membership;

/// The user's whole list, keyed by movie id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    entries: HashMap<String, ListEntry>,
}

impl ListState {
    /// Build the state from the three per-filter collections.
    ///
    /// Each id's membership comes from [`Membership::derive`], so an id listed
    /// in several collections keeps favourites over watched over to-watch.
    pub fn from_filters(
        to_watch: Vec<ListEntry>,
        watched: Vec<ListEntry>,
        favourites: Vec<ListEntry>,
    ) -> Self {
        let mut entries: HashMap<String, ListEntry> = HashMap::new();
        for entry in to_watch.iter().chain(&watched).chain(&favourites) {
            if entries.contains_key(&entry.movie_id) {
                continue;
            }
            let membership = Membership::derive(&entry.movie_id, &to_watch, &watched, &favourites);
            if let Some(flags) = membership.flags() {
                let mut entry = entry.clone();
                entry.set_flags(flags);
                entries.insert(entry.movie_id.clone(), entry);
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, movie_id: &str) -> Option<&ListEntry> {
        self.entries.get(movie_id)
    }

    pub fn contains(&self, movie_id: &str) -> bool {
        self.entries.contains_key(movie_id)
    }

    pub fn membership(&self, movie_id: &str) -> Membership {
        Membership::from_entry(self.entries.get(movie_id))
    }

    /// Insert the movie or overwrite its flags.
    pub fn upsert(&mut self, movie: &MovieRef, flags: ListFlags) {
        match self.entries.get_mut(&movie.id) {
            Some(entry) => entry.set_flags(flags),
            None => {
                self.entries
                    .insert(movie.id.clone(), ListEntry::new(movie, flags));
            }
        }
    }

    /// Returns false when the movie is not in the list.
    pub fn set_flags(&mut self, movie_id: &str, flags: ListFlags) -> bool {
        match self.entries.get_mut(movie_id) {
            Some(entry) => {
                entry.set_flags(flags);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, movie_id: &str) -> Option<ListEntry> {
        self.entries.remove(movie_id)
    }

    /// Entries matching one filter, sorted by title.
    pub fn entries(&self, filter: ListFilter) -> Vec<&ListEntry> {
        let wanted = Membership::from_flags(filter.flags().watched(), filter.flags().favourite());
        let mut matching: Vec<&ListEntry> = self
            .entries
            .values()
            .filter(|e| Membership::from_entry(Some(*e)) == wanted)
            .collect();
        matching.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.movie_id.cmp(&b.movie_id)));
        matching
    }

    /// Every entry, sorted by title.
    pub fn all(&self) -> Vec<&ListEntry> {
        let mut all: Vec<&ListEntry> = self.entries.values().collect();
        all.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.movie_id.cmp(&b.movie_id)));
        all
    }
}
