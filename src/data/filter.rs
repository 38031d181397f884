use std::collections::BTreeSet;

use super::model::{TrackRecord, TrackTable};

// ---------------------------------------------------------------------------
// Filter predicate: selected genres and a popularity window
// ---------------------------------------------------------------------------

/// Highest popularity value a track can have.
pub const MAX_POPULARITY: u8 = 100;

/// Closed popularity interval `[lo, hi]`, always within `0..=100` and `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularityRange {
    lo: u8,
    hi: u8,
}

impl Default for PopularityRange {
    fn default() -> Self {
        Self {
            lo: 0,
            hi: MAX_POPULARITY,
        }
    }
}

impl PopularityRange {
    /// Build a range, clamping both ends into `0..=100` and swapping them if reversed.
    pub fn new(lo: u8, hi: u8) -> Self {
        let lo = lo.min(MAX_POPULARITY);
        let hi = hi.min(MAX_POPULARITY);
        Self {
            lo: lo.min(hi),
            hi: lo.max(hi),
        }
    }

    pub fn lo(&self) -> u8 {
        self.lo
    }

    pub fn hi(&self) -> u8 {
        self.hi
    }

    /// Move the lower bound; the upper bound follows if it would be overtaken.
    pub fn with_lo(self, lo: u8) -> Self {
        let lo = lo.min(MAX_POPULARITY);
        Self {
            lo,
            hi: self.hi.max(lo),
        }
    }

    /// Move the upper bound; the lower bound follows if it would be overtaken.
    pub fn with_hi(self, hi: u8) -> Self {
        let hi = hi.min(MAX_POPULARITY);
        Self {
            lo: self.lo.min(hi),
            hi,
        }
    }

    /// A missing popularity lies in no range.
    pub fn contains(&self, popularity: Option<u8>) -> bool {
        popularity.is_some_and(|p| (self.lo..=self.hi).contains(&p))
    }
}

/// Current sidebar selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Selected genres.  Empty means nothing passes.
    pub genres: BTreeSet<String>,
    pub popularity: PopularityRange,
}

impl FilterState {
    /// The first `genre_count` genres in encounter order and the full popularity range.
    pub fn initial(table: &TrackTable, genre_count: usize) -> Self {
        Self {
            genres: table.genres.iter().take(genre_count).cloned().collect(),
            popularity: PopularityRange::default(),
        }
    }

    pub fn matches(&self, track: &TrackRecord) -> bool {
        self.genres.contains(&track.genre) && self.popularity.contains(track.popularity)
    }

    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.genres.remove(genre) {
            self.genres.insert(genre.to_string());
        }
    }

    pub fn select_all(&mut self, table: &TrackTable) {
        self.genres = table.genres.iter().cloned().collect();
    }

    pub fn select_none(&mut self) {
        self.genres.clear();
    }
}

/// Return indices of tracks that pass the filter, in table order.
///
/// A track passes when its genre is selected and its popularity lies
/// within the closed range.  An empty genre selection hides everything, and
/// a track without a popularity never passes.
pub fn filtered_indices(table: &TrackTable, filters: &FilterState) -> Vec<usize> {
    table
        .tracks
        .iter()
        .enumerate()
        .filter(|(_, track)| filters.matches(track))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_table() -> TrackTable {
        TrackTable::new(
            vec![
                TrackRecord::mock("a", "pop", 10),
                TrackRecord::mock("b", "pop", 90),
                TrackRecord::mock("c", "rock", 50),
            ],
            Vec::new(),
        )
    }

    fn genres(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_single_genre_full_range() {
        let table = scenario_table();
        let filters = FilterState {
            genres: genres(&["pop"]),
            popularity: PopularityRange::default(),
        };
        assert_eq!(filtered_indices(&table, &filters), [0, 1]);
    }

    #[test]
    fn test_empty_selection_hides_everything() {
        let table = scenario_table();
        let filters = FilterState::default();
        assert!(filtered_indices(&table, &filters).is_empty());
    }

    #[test]
    fn test_popularity_bounds_are_inclusive() {
        let table = scenario_table();
        let filters = FilterState {
            genres: genres(&["pop", "rock"]),
            popularity: PopularityRange::new(50, 90),
        };
        assert_eq!(filtered_indices(&table, &filters), [1, 2]);
    }

    #[test]
    fn test_missing_popularity_never_passes() {
        let mut unrated = TrackRecord::mock("d", "pop", 0);
        unrated.popularity = None;
        let mut tracks = scenario_table().tracks;
        tracks.push(unrated);
        let table = TrackTable::new(tracks, Vec::new());

        let filters = FilterState {
            genres: genres(&["pop"]),
            popularity: PopularityRange::default(),
        };
        assert_eq!(filtered_indices(&table, &filters), [0, 1]);
        assert!(!PopularityRange::default().contains(None));
    }

    #[test]
    fn test_initial_selection_takes_first_genres() {
        let tracks = ["g1", "g2", "g1", "g3", "g4", "g5", "g6"]
            .iter()
            .map(|g| TrackRecord::mock("t", g, 1))
            .collect();
        let table = TrackTable::new(tracks, Vec::new());
        let filters = FilterState::initial(&table, 5);
        assert_eq!(filters.genres, genres(&["g1", "g2", "g3", "g4", "g5"]));
        assert_eq!(filters.popularity, PopularityRange::new(0, 100));
    }

    #[test]
    fn test_range_keeps_bounds_ordered() {
        let r = PopularityRange::new(80, 20);
        assert_eq!((r.lo(), r.hi()), (20, 80));

        let r = r.with_lo(95);
        assert_eq!((r.lo(), r.hi()), (95, 95));

        let r = r.with_hi(10);
        assert_eq!((r.lo(), r.hi()), (10, 10));

        let r = PopularityRange::new(0, 250);
        assert_eq!(r.hi(), 100);
    }

    #[test]
    fn test_toggle_and_bulk_selection() {
        let table = scenario_table();
        let mut filters = FilterState::default();
        filters.toggle_genre("rock");
        assert_eq!(filtered_indices(&table, &filters), [2]);
        filters.toggle_genre("rock");
        assert!(filters.genres.is_empty());

        filters.select_all(&table);
        assert_eq!(filtered_indices(&table, &filters).len(), 3);
        filters.select_none();
        assert!(filtered_indices(&table, &filters).is_empty());
    }
}
