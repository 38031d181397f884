use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Mode – the musical mode of a track
// ---------------------------------------------------------------------------

/// Major or minor tonality, decoded from the numeric `mode` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Major, Mode::Minor];

    /// `1 → Major`, `0 → Minor`, anything else is unmapped.
    pub fn from_code(code: f64) -> Option<Self> {
        if code == 1.0 {
            Some(Mode::Major)
        } else if code == 0.0 {
            Some(Mode::Minor)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Major => "Major",
            Mode::Minor => "Minor",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PitchClass – the musical key of a track
// ---------------------------------------------------------------------------

/// Pitch class in standard notation, decoded from the numeric `key` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Map a 0–11 code to its pitch class. Codes outside the range
    /// (the dataset uses -1 for "no key detected") are unmapped.
    pub fn from_code(code: f64) -> Option<Self> {
        if code.fract() != 0.0 || !(0.0..=11.0).contains(&code) {
            return None;
        }
        Self::ALL.get(code as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Feature – the selectable numeric audio features
// ---------------------------------------------------------------------------

/// Audio features offered in the histogram and scatter selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Danceability,
    Energy,
    Loudness,
    Acousticness,
    Instrumentalness,
    Liveness,
    Valence,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Feature::Danceability,
        Feature::Energy,
        Feature::Loudness,
        Feature::Acousticness,
        Feature::Instrumentalness,
        Feature::Liveness,
        Feature::Valence,
    ];

    pub fn column(self) -> SourceColumn {
        match self {
            Feature::Danceability => SourceColumn::Danceability,
            Feature::Energy => SourceColumn::Energy,
            Feature::Loudness => SourceColumn::Loudness,
            Feature::Acousticness => SourceColumn::Acousticness,
            Feature::Instrumentalness => SourceColumn::Instrumentalness,
            Feature::Liveness => SourceColumn::Liveness,
            Feature::Valence => SourceColumn::Valence,
        }
    }

    pub fn label(self) -> &'static str {
        self.column().label()
    }

    /// Read this feature from a track. `NaN` means the cell was missing.
    pub fn value(self, track: &TrackRecord) -> f64 {
        match self {
            Feature::Danceability => track.danceability,
            Feature::Energy => track.energy,
            Feature::Loudness => track.loudness,
            Feature::Acousticness => track.acousticness,
            Feature::Instrumentalness => track.instrumentalness,
            Feature::Liveness => track.liveness,
            Feature::Valence => track.valence,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SourceColumn – the fixed rename table
// ---------------------------------------------------------------------------

/// A known column of the source file, with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceColumn {
    TrackId,
    AlbumName,
    Explicit,
    Speechiness,
    TrackName,
    Artists,
    TrackGenre,
    Popularity,
    Danceability,
    Energy,
    Loudness,
    Acousticness,
    Instrumentalness,
    Liveness,
    Valence,
    Tempo,
    DurationMs,
    Key,
    Mode,
    TimeSignature,
}

impl SourceColumn {
    pub const ALL: [SourceColumn; 20] = [
        SourceColumn::TrackId,
        SourceColumn::AlbumName,
        SourceColumn::Explicit,
        SourceColumn::Speechiness,
        SourceColumn::TrackName,
        SourceColumn::Artists,
        SourceColumn::TrackGenre,
        SourceColumn::Popularity,
        SourceColumn::Danceability,
        SourceColumn::Energy,
        SourceColumn::Loudness,
        SourceColumn::Acousticness,
        SourceColumn::Instrumentalness,
        SourceColumn::Liveness,
        SourceColumn::Valence,
        SourceColumn::Tempo,
        SourceColumn::DurationMs,
        SourceColumn::Key,
        SourceColumn::Mode,
        SourceColumn::TimeSignature,
    ];

    /// Normalized identifier as it appears in the source header.
    pub fn source_id(self) -> &'static str {
        match self {
            SourceColumn::TrackId => "track_id",
            SourceColumn::AlbumName => "album_name",
            SourceColumn::Explicit => "explicit",
            SourceColumn::Speechiness => "speechiness",
            SourceColumn::TrackName => "track_name",
            SourceColumn::Artists => "artists",
            SourceColumn::TrackGenre => "track_genre",
            SourceColumn::Popularity => "popularity",
            SourceColumn::Danceability => "danceability",
            SourceColumn::Energy => "energy",
            SourceColumn::Loudness => "loudness",
            SourceColumn::Acousticness => "acousticness",
            SourceColumn::Instrumentalness => "instrumentalness",
            SourceColumn::Liveness => "liveness",
            SourceColumn::Valence => "valence",
            SourceColumn::Tempo => "tempo",
            SourceColumn::DurationMs => "duration_ms",
            SourceColumn::Key => "key",
            SourceColumn::Mode => "mode",
            SourceColumn::TimeSignature => "time_signature",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SourceColumn::TrackId => "Track ID",
            SourceColumn::AlbumName => "Album Name",
            SourceColumn::Explicit => "Explicit",
            SourceColumn::Speechiness => "Speechiness",
            SourceColumn::TrackName => "Track Name",
            SourceColumn::Artists => "Artist",
            SourceColumn::TrackGenre => "Genre",
            SourceColumn::Popularity => "Popularity",
            SourceColumn::Danceability => "Danceability",
            SourceColumn::Energy => "Energy",
            SourceColumn::Loudness => "Loudness",
            SourceColumn::Acousticness => "Acousticness",
            SourceColumn::Instrumentalness => "Instrumentalness",
            SourceColumn::Liveness => "Liveness",
            SourceColumn::Valence => "Valence",
            SourceColumn::Tempo => "Tempo (BPM)",
            SourceColumn::DurationMs => "Duration (ms)",
            SourceColumn::Key => "Key",
            SourceColumn::Mode => "Mode",
            SourceColumn::TimeSignature => "Time Signature",
        }
    }

    pub fn from_source_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|col| col.source_id() == id)
    }

    /// Render the cell of this column for the data table.
    pub fn cell_text(self, track: &TrackRecord) -> String {
        fn float(v: f64) -> String {
            if v.is_nan() {
                String::new()
            } else {
                format!("{v:.3}")
            }
        }
        fn optional<T: fmt::Display>(v: Option<T>) -> String {
            v.map(|v| v.to_string()).unwrap_or_default()
        }

        match self {
            SourceColumn::TrackId => track.track_id.clone(),
            SourceColumn::AlbumName => track.album_name.clone(),
            SourceColumn::Explicit => track.explicit.to_string(),
            SourceColumn::Speechiness => float(track.speechiness),
            SourceColumn::TrackName => track.track_name.clone(),
            SourceColumn::Artists => track.artist.clone(),
            SourceColumn::TrackGenre => track.genre.clone(),
            SourceColumn::Popularity => optional(track.popularity),
            SourceColumn::Danceability => float(track.danceability),
            SourceColumn::Energy => float(track.energy),
            SourceColumn::Loudness => float(track.loudness),
            SourceColumn::Acousticness => float(track.acousticness),
            SourceColumn::Instrumentalness => float(track.instrumentalness),
            SourceColumn::Liveness => float(track.liveness),
            SourceColumn::Valence => float(track.valence),
            SourceColumn::Tempo => float(track.tempo),
            SourceColumn::DurationMs => optional(track.duration_ms),
            SourceColumn::Key => optional(track.key),
            SourceColumn::Mode => optional(track.mode),
            SourceColumn::TimeSignature => optional(track.time_signature),
        }
    }
}

/// A column of the loaded source after normalization and renaming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    /// Display label, or the normalized identifier of an unknown column.
    pub label: String,
    pub source: Option<SourceColumn>,
}

// ---------------------------------------------------------------------------
// TrackRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single track with decoded categorical columns.
///
/// Numeric features hold `NaN` where the source cell was missing.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    pub track_id: String,
    pub album_name: String,
    pub track_name: String,
    pub artist: String,
    pub genre: String,
    pub explicit: bool,
    /// Integer within `0..=100`, `None` when missing or out of range.
    pub popularity: Option<u8>,
    pub danceability: f64,
    pub energy: f64,
    pub speechiness: f64,
    pub loudness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub tempo: f64,
    pub duration_ms: Option<u64>,
    pub key: Option<PitchClass>,
    pub mode: Option<Mode>,
    pub time_signature: Option<u8>,
}

// ---------------------------------------------------------------------------
// TrackTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full loaded table. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct TrackTable {
    /// All tracks in source order.
    pub tracks: Vec<TrackRecord>,
    /// Source columns in source order, after normalization and renaming.
    pub columns: Vec<TableColumn>,
    /// Distinct non-empty genres in order of first appearance.
    pub genres: Vec<String>,
}

impl TrackTable {
    pub fn new(tracks: Vec<TrackRecord>, columns: Vec<TableColumn>) -> Self {
        let mut seen = HashSet::new();
        let genres = tracks
            .iter()
            .filter(|t| !t.genre.is_empty() && seen.insert(t.genre.as_str()))
            .map(|t| t.genre.clone())
            .collect();
        TrackTable {
            tracks,
            columns,
            genres,
        }
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Known columns present in the source, in source order, with their labels.
    pub fn display_columns(&self) -> Vec<(&str, SourceColumn)> {
        self.columns
            .iter()
            .filter_map(|c| Some((c.label.as_str(), c.source?)))
            .collect()
    }

}

#[cfg(test)]
impl TrackRecord {
    pub fn mock(name: &str, genre: &str, popularity: u8) -> Self {
        Self {
            track_id: format!("id-{name}"),
            album_name: "Mock Album".to_string(),
            track_name: name.to_string(),
            artist: "Mock Artist".to_string(),
            genre: genre.to_string(),
            explicit: false,
            popularity: Some(popularity),
            danceability: 0.5,
            energy: 0.5,
            speechiness: 0.05,
            loudness: -7.0,
            acousticness: 0.2,
            instrumentalness: 0.0,
            liveness: 0.1,
            valence: 0.5,
            tempo: 120.0,
            duration_ms: Some(200_000),
            key: Some(PitchClass::C),
            mode: Some(Mode::Major),
            time_signature: Some(4),
        }
    }
}
