use movielist_models::{ListEntry, ListFlags};
use serde::Serialize;
use std::fmt;

/// Where a movie sits in the user's list.
///
/// Favourite only exists inside `Watched`, so an unwatched favourite cannot
/// be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Membership {
    NotInList,
    ToWatch,
    Watched { favourite: bool },
}

/// A user interaction on a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Not in list → to watch → watched → not in list.
    Cycle,
    ToggleFavourite,
}

/// The single remote command a transition issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCommand {
    Add(ListFlags),
    Update(ListFlags),
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Membership,
    pub to: Membership,
    pub command: ListCommand,
}

impl Membership {
    /// Raw server flags. `(false, true)` is normalized to a watched favourite.
    pub fn from_flags(watched: bool, favourite: bool) -> Self {
        match (watched, favourite) {
            (_, true) => Membership::Watched { favourite: true },
            (true, false) => Membership::Watched { favourite: false },
            (false, false) => Membership::ToWatch,
        }
    }

    pub fn from_entry(entry: Option<&ListEntry>) -> Self {
        entry.map_or(Membership::NotInList, |e| {
            Membership::from_flags(e.watched, e.favourite)
        })
    }

    /// Classify a movie from the three per-filter collections.
    ///
    /// A movie listed in more than one collection takes the first of
    /// favourites, watched, to-watch.
    pub fn derive(
        movie_id: &str,
        to_watch: &[ListEntry],
        watched: &[ListEntry],
        favourites: &[ListEntry],
    ) -> Self {
        let contains = |list: &[ListEntry]| list.iter().any(|e| e.movie_id == movie_id);
        if contains(favourites) {
            Membership::Watched { favourite: true }
        } else if contains(watched) {
            Membership::Watched { favourite: false }
        } else if contains(to_watch) {
            Membership::ToWatch
        } else {
            Membership::NotInList
        }
    }

    /// The flags that represent this membership on the server, or `None`
    /// when the movie is not in the list.
    pub fn flags(&self) -> Option<ListFlags> {
        match self {
            Membership::NotInList => None,
            Membership::ToWatch => Some(ListFlags::TO_WATCH),
            Membership::Watched { favourite: false } => Some(ListFlags::WATCHED),
            Membership::Watched { favourite: true } => Some(ListFlags::FAVOURITE),
        }
    }

    pub fn is_favourite(&self) -> bool {
        matches!(self, Membership::Watched { favourite: true })
    }

    pub fn apply(self, gesture: Gesture) -> Transition {
        let (to, command) = match (gesture, self) {
            (Gesture::Cycle, Membership::NotInList) => {
                (Membership::ToWatch, ListCommand::Add(ListFlags::TO_WATCH))
            }
            (Gesture::Cycle, Membership::ToWatch) => (
                Membership::Watched { favourite: false },
                ListCommand::Update(ListFlags::WATCHED),
            ),
            (Gesture::Cycle, Membership::Watched { .. }) => {
                (Membership::NotInList, ListCommand::Remove)
            }
            (Gesture::ToggleFavourite, Membership::NotInList) => (
                Membership::Watched { favourite: true },
                ListCommand::Add(ListFlags::FAVOURITE),
            ),
            (Gesture::ToggleFavourite, Membership::ToWatch) => (
                Membership::Watched { favourite: true },
                ListCommand::Update(ListFlags::FAVOURITE),
            ),
            (Gesture::ToggleFavourite, Membership::Watched { favourite: true }) => (
                Membership::Watched { favourite: false },
                ListCommand::Update(ListFlags::WATCHED),
            ),
            (Gesture::ToggleFavourite, Membership::Watched { favourite: false }) => (
                Membership::Watched { favourite: true },
                ListCommand::Update(ListFlags::FAVOURITE),
            ),
        };
        Transition {
            from: self,
            to,
            command,
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Membership::NotInList => write!(f, "not in list"),
            Membership::ToWatch => write!(f, "to watch"),
            Membership::Watched { favourite: false } => write!(f, "watched"),
            Membership::Watched { favourite: true } => write!(f, "watched, favourite"),
        }
    }
}

impl fmt::Display for ListCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListCommand::Add(flags) => write!(
                f,
                "add(watched={}, favourite={})",
                flags.watched(),
                flags.favourite()
            ),
            ListCommand::Update(flags) => write!(
                f,
                "update(watched={}, favourite={})",
                flags.watched(),
                flags.favourite()
            ),
            ListCommand::Remove => write!(f, "delete"),
        }
    }
}
