use crate::catalog::Track;
use rand::seq::SliceRandom;
use rand::Rng;

pub const FAVORITES: &str = "Favorites";
pub const RECENTLY_PLAYED: &str = "Recently Played";
pub const MOST_PLAYED: &str = "Most Played";
pub const HYPIXEL_SKYBLOCK: &str = "Hypixel Skyblock";

const RECENT_LEN: usize = 5;
const MOST_PLAYED_LEN: usize = 8;
const NOTE_BLOCK: &str = "note block";

#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub songs: Vec<Track>,
}

impl Playlist {
    fn empty(id: u32, name: &str, description: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            songs: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

/// The four fixed playlists, all empty.
pub fn empty_playlists() -> Vec<Playlist> {
    vec![
        Playlist::empty(1, FAVORITES, "Your favorite tracks"),
        Playlist::empty(2, RECENTLY_PLAYED, "Recently played tracks"),
        Playlist::empty(3, MOST_PLAYED, "Your most played tracks"),
        Playlist::empty(4, HYPIXEL_SKYBLOCK, "NoteBlock tracks"),
    ]
}

/// Derives the four playlists from a freshly fetched catalog.
pub fn derive_playlists<R: Rng + ?Sized>(catalog: &[Track], rng: &mut R) -> Vec<Playlist> {
    let mut playlists = empty_playlists();

    playlists[0].songs = catalog.to_vec();
    playlists[1].songs = catalog.iter().take(RECENT_LEN).cloned().collect();
    // Sampling is by position, so repeated catalog entries are still drawn at most once each.
    playlists[2].songs = catalog
        .choose_multiple(rng, MOST_PLAYED_LEN)
        .cloned()
        .collect();
    playlists[3].songs = catalog
        .iter()
        .filter(|t| t.name.to_lowercase().contains(NOTE_BLOCK))
        .cloned()
        .collect();

    playlists
}

/// In-memory playlists plus the current selection. Lives as long as the process.
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    playlists: Vec<Playlist>,
    current: Option<usize>,
}

impl Default for PlaylistStore {
    fn default() -> Self {
        Self {
            playlists: empty_playlists(),
            current: None,
        }
    }
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every playlist wholesale and selects Favorites.
    pub fn load_catalog<R: Rng + ?Sized>(&mut self, catalog: &[Track], rng: &mut R) {
        self.playlists = derive_playlists(catalog, rng);
        self.select_playlist(FAVORITES);
    }

    pub fn list_playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Exact name match; unknown names leave the selection untouched.
    pub fn select_playlist(&mut self, name: &str) -> bool {
        match self.playlists.iter().position(|p| p.name == name) {
            Some(idx) => {
                self.current = Some(idx);
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Option<&Playlist> {
        self.current.and_then(|idx| self.playlists.get(idx))
    }

    /// Next/previous playlist in sidebar order, wrapping.
    pub fn cycle(&mut self, forward: bool) -> Option<&Playlist> {
        let len = self.playlists.len();
        if len == 0 {
            return None;
        }
        let next = match self.current {
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
            None => 0,
        };
        self.current = Some(next);
        self.playlists.get(next)
    }
}
