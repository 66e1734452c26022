//! Property tests for playlist derivation and progress math.

use aurora::catalog::Track;
use aurora::player::Progress;
use aurora::playlist::{derive_playlists, HYPIXEL_SKYBLOCK, MOST_PLAYED, RECENTLY_PLAYED};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{1,12}\\.mp3",
        "[A-Za-z ]{0,6}(note block|Note Block|NOTE BLOCK)[a-z ]{0,6}\\.mp3",
    ]
}

/// Catalogs with unique names, like a real directory listing.
fn catalog_strategy() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::hash_set(name_strategy(), 0..30)
        .prop_map(|names| names.into_iter().map(|n| Track::new(&n)).collect())
}

fn playlist<'a>(lists: &'a [aurora::playlist::Playlist], name: &str) -> &'a [Track] {
    &lists.iter().find(|p| p.name == name).unwrap().songs
}

proptest! {
    /// Property: "Recently Played" is the first min(5, n) tracks, in order
    #[test]
    fn recently_played_is_prefix(catalog in catalog_strategy(), seed in any::<u64>()) {
        let lists = derive_playlists(&catalog, &mut StdRng::seed_from_u64(seed));
        let recent = playlist(&lists, RECENTLY_PLAYED);
        prop_assert_eq!(recent.len(), catalog.len().min(5));
        prop_assert_eq!(recent, &catalog[..recent.len()]);
    }

    /// Property: "Most Played" has min(8, n) distinct tracks drawn from the catalog
    #[test]
    fn most_played_is_sample(catalog in catalog_strategy(), seed in any::<u64>()) {
        let lists = derive_playlists(&catalog, &mut StdRng::seed_from_u64(seed));
        let most = playlist(&lists, MOST_PLAYED);
        prop_assert_eq!(most.len(), catalog.len().min(8));

        let names: HashSet<&str> = most.iter().map(|t| t.name.as_str()).collect();
        prop_assert_eq!(names.len(), most.len());
        for track in most {
            prop_assert!(catalog.contains(track));
        }
    }

    /// Property: "Hypixel Skyblock" is exactly the note block tracks, in order
    #[test]
    fn hypixel_is_name_filter(catalog in catalog_strategy(), seed in any::<u64>()) {
        let lists = derive_playlists(&catalog, &mut StdRng::seed_from_u64(seed));
        let expected: Vec<Track> = catalog
            .iter()
            .filter(|t| t.name.to_lowercase().contains("note block"))
            .cloned()
            .collect();
        prop_assert_eq!(playlist(&lists, HYPIXEL_SKYBLOCK), expected.as_slice());
    }

    /// Property: progress never divides by an unknown duration
    #[test]
    fn progress_is_always_finite(
        current in prop::num::f64::ANY,
        duration in prop::option::of(prop::num::f64::ANY),
    ) {
        let progress = Progress::compute(current, duration);
        if let Some(percent) = progress.percent {
            prop_assert!(percent.is_finite());
            prop_assert!((0.0..=100.0).contains(&percent));
        }
        if !duration.is_some_and(|d| d.is_finite() && d > 0.0) {
            prop_assert_eq!(progress.percent, None);
            prop_assert_eq!(progress.total.as_str(), "-:--");
        }
    }
}
