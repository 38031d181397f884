use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use arrow::array::{Array, AsArray, BooleanArray, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use serde_json::{Map as JsonMap, Value as JsonValue};
use thiserror::Error;

use super::model::{Mode, PitchClass, SourceColumn, TableColumn, TrackRecord, TrackTable};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a track table could not be produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Data file \"{}\" not found. Check that it is in the working directory.", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("{0:#}")]
    Malformed(#[from] anyhow::Error),
}

/// Columns without which filtering is impossible.
const REQUIRED_COLUMNS: [SourceColumn; 2] = [SourceColumn::TrackGenre, SourceColumn::Popularity];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a track table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one track per line (the dataset's native format)
/// * `.json`    – `[{ "track_id": ..., "popularity": ..., ... }, ...]`
/// * `.parquet` – flat columns named like the CSV header
pub fn load_file(path: &Path) -> Result<TrackTable, LoadError> {
    if !path.is_file() {
        return Err(LoadError::SourceNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };
    Ok(table)
}

// ---------------------------------------------------------------------------
// Column identifiers
// ---------------------------------------------------------------------------

/// Trim surrounding whitespace and lowercase a header.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Normalize headers and replace known identifiers by their display label.
/// Unknown headers keep their normalized identifier.
pub fn rename_columns<I, S>(headers: I) -> Vec<TableColumn>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    headers
        .into_iter()
        .map(|h| {
            let id = normalize_header(h.as_ref());
            let source = SourceColumn::from_source_id(&id);
            TableColumn {
                label: source.map_or(id, |col| col.label().to_string()),
                source,
            }
        })
        .collect()
}

fn require_columns<'a>(normalized: impl IntoIterator<Item = &'a str>) -> anyhow::Result<()> {
    let present: HashSet<&str> = normalized.into_iter().collect();
    for col in REQUIRED_COLUMNS {
        if !present.contains(col.source_id()) {
            bail!("missing required column '{}'", col.source_id());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Raw row shape shared by all formats
// ---------------------------------------------------------------------------

/// One source row before categorical decoding.  Field names are the
/// normalized source identifiers.
#[derive(Debug, Deserialize)]
struct RawTrack {
    #[serde(default, deserialize_with = "text")]
    track_id: String,
    #[serde(default, deserialize_with = "text")]
    album_name: String,
    #[serde(default, deserialize_with = "text")]
    track_name: String,
    #[serde(default, deserialize_with = "text")]
    artists: String,
    #[serde(default, deserialize_with = "text")]
    track_genre: String,
    #[serde(default, deserialize_with = "flag")]
    explicit: bool,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    popularity: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    duration_ms: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    danceability: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    energy: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    key: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    loudness: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    mode: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    speechiness: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    acousticness: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    instrumentalness: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    liveness: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    valence: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    tempo: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    time_signature: Option<f64>,
}

impl RawTrack {
    fn into_record(self, row: usize) -> TrackRecord {
        let popularity = match self.popularity {
            Some(p) if (0.0..=100.0).contains(&p) && p.fract() == 0.0 => Some(p as u8),
            Some(p) => {
                log::warn!(
                    "Row {row}: popularity {p} is not an integer in 0..=100, treated as missing"
                );
                None
            }
            None => None,
        };
        let whole = |v: Option<f64>| v.filter(|v| v.is_finite() && *v >= 0.0);

        TrackRecord {
            track_id: self.track_id,
            album_name: self.album_name,
            track_name: self.track_name,
            artist: self.artists,
            genre: self.track_genre,
            explicit: self.explicit,
            popularity,
            danceability: self.danceability.unwrap_or(f64::NAN),
            energy: self.energy.unwrap_or(f64::NAN),
            speechiness: self.speechiness.unwrap_or(f64::NAN),
            loudness: self.loudness.unwrap_or(f64::NAN),
            acousticness: self.acousticness.unwrap_or(f64::NAN),
            instrumentalness: self.instrumentalness.unwrap_or(f64::NAN),
            liveness: self.liveness.unwrap_or(f64::NAN),
            valence: self.valence.unwrap_or(f64::NAN),
            tempo: self.tempo.unwrap_or(f64::NAN),
            duration_ms: whole(self.duration_ms).map(|v| v.round() as u64),
            key: self.key.and_then(PitchClass::from_code),
            mode: self.mode.and_then(Mode::from_code),
            time_signature: whole(self.time_signature)
                .filter(|v| *v <= f64::from(u8::MAX))
                .map(|v| v as u8),
        }
    }
}

/// Missing or null text becomes the empty string.
fn text<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

/// Accepts `true`/`false` in any case, `1`/`0` and real booleans.
/// Anything else reads as `false`.
fn flag<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean flag")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
            Ok(v != 0.0)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            Ok(matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1"))
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }
    }

    de.deserialize_any(FlagVisitor)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> anyhow::Result<TrackTable> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// CSV layout: header row with column names, one track per record.
/// Columns outside the rename table (e.g. a leading unnamed index) are ignored.
fn read_csv<R: Read>(source: R) -> anyhow::Result<TrackTable> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let normalized: csv::StringRecord = headers.iter().map(normalize_header).collect();

    require_columns(normalized.iter())?;
    let columns = rename_columns(normalized.iter());
    reader.set_headers(normalized);

    let mut tracks = Vec::new();
    for (row_no, result) in reader.deserialize::<RawTrack>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        tracks.push(raw.into_record(row_no));
    }

    Ok(TrackTable::new(tracks, columns))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> anyhow::Result<TrackTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text)
}

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "track_id": "5SuOikwiRyPMVoIQDJUgSV", "track_genre": "acoustic", "popularity": 73, ... },
///   ...
/// ]
/// ```
fn read_json(text: &str) -> anyhow::Result<TrackTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    // Columns are the union of all record keys, in order of first appearance.
    let mut keys: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let normalized: JsonMap<String, JsonValue> = obj
            .iter()
            .map(|(k, v)| (normalize_header(k), v.clone()))
            .collect();
        for key in normalized.keys() {
            if seen.insert(key.clone()) {
                keys.push(key.clone());
            }
        }
        rows.push(normalized);
    }

    require_columns(keys.iter().map(String::as_str))?;
    let columns = rename_columns(&keys);

    let mut tracks = Vec::with_capacity(rows.len());
    for (i, normalized) in rows.into_iter().enumerate() {
        let raw: RawTrack = serde_json::from_value(JsonValue::Object(normalized))
            .with_context(|| format!("Row {i}"))?;
        tracks.push(raw.into_record(i));
    }

    Ok(TrackTable::new(tracks, columns))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

const TEXT_COLUMNS: [SourceColumn; 5] = [
    SourceColumn::TrackId,
    SourceColumn::AlbumName,
    SourceColumn::TrackName,
    SourceColumn::Artists,
    SourceColumn::TrackGenre,
];

/// Load a Parquet file with one flat column per source identifier.
///
/// Numeric columns of any integer or float type are accepted; cells that
/// cannot be cast become missing values.  Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> anyhow::Result<TrackTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;

    let normalized: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| normalize_header(f.name()))
        .collect();
    require_columns(normalized.iter().map(String::as_str))?;
    let columns = rename_columns(&normalized);

    let reader = builder.build().context("building parquet reader")?;

    let mut tracks = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let cols = BatchColumns::new(&batch)?;
        for row in 0..batch.num_rows() {
            let raw = cols.raw_track(row);
            tracks.push(raw.into_record(tracks.len()));
        }
    }

    Ok(TrackTable::new(tracks, columns))
}

// -- Parquet / Arrow helpers --

/// The known columns of one record batch, cast to the types the row needs.
struct BatchColumns {
    text: HashMap<SourceColumn, StringArray>,
    numbers: HashMap<SourceColumn, Float64Array>,
    explicit: Option<BooleanArray>,
}

impl BatchColumns {
    fn new(batch: &RecordBatch) -> anyhow::Result<Self> {
        let mut text = HashMap::new();
        let mut numbers = HashMap::new();
        let mut explicit = None;

        let schema = batch.schema();
        for (field, array) in schema.fields().iter().zip(batch.columns()) {
            let Some(col) = SourceColumn::from_source_id(&normalize_header(field.name())) else {
                continue;
            };
            if col == SourceColumn::Explicit {
                let cast_array = cast(array.as_ref(), &DataType::Boolean)
                    .with_context(|| format!("casting '{}' to boolean", field.name()))?;
                explicit = Some(cast_array.as_boolean().clone());
            } else if TEXT_COLUMNS.contains(&col) {
                let cast_array = cast(array.as_ref(), &DataType::Utf8)
                    .with_context(|| format!("casting '{}' to text", field.name()))?;
                text.insert(col, cast_array.as_string::<i32>().clone());
            } else {
                let cast_array = cast(array.as_ref(), &DataType::Float64)
                    .with_context(|| format!("casting '{}' to float", field.name()))?;
                numbers.insert(col, cast_array.as_primitive::<Float64Type>().clone());
            }
        }

        Ok(BatchColumns {
            text,
            numbers,
            explicit,
        })
    }

    fn text_at(&self, col: SourceColumn, row: usize) -> String {
        self.text
            .get(&col)
            .filter(|a| a.is_valid(row))
            .map(|a| a.value(row).to_string())
            .unwrap_or_default()
    }

    fn number_at(&self, col: SourceColumn, row: usize) -> Option<f64> {
        self.numbers
            .get(&col)
            .filter(|a| a.is_valid(row))
            .map(|a| a.value(row))
    }

    fn raw_track(&self, row: usize) -> RawTrack {
        RawTrack {
            track_id: self.text_at(SourceColumn::TrackId, row),
            album_name: self.text_at(SourceColumn::AlbumName, row),
            track_name: self.text_at(SourceColumn::TrackName, row),
            artists: self.text_at(SourceColumn::Artists, row),
            track_genre: self.text_at(SourceColumn::TrackGenre, row),
            explicit: self
                .explicit
                .as_ref()
                .is_some_and(|a| a.is_valid(row) && a.value(row)),
            popularity: self.number_at(SourceColumn::Popularity, row),
            duration_ms: self.number_at(SourceColumn::DurationMs, row),
            danceability: self.number_at(SourceColumn::Danceability, row),
            energy: self.number_at(SourceColumn::Energy, row),
            key: self.number_at(SourceColumn::Key, row),
            loudness: self.number_at(SourceColumn::Loudness, row),
            mode: self.number_at(SourceColumn::Mode, row),
            speechiness: self.number_at(SourceColumn::Speechiness, row),
            acousticness: self.number_at(SourceColumn::Acousticness, row),
            instrumentalness: self.number_at(SourceColumn::Instrumentalness, row),
            liveness: self.number_at(SourceColumn::Liveness, row),
            valence: self.number_at(SourceColumn::Valence, row),
            tempo: self.number_at(SourceColumn::Tempo, row),
            time_signature: self.number_at(SourceColumn::TimeSignature, row),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{BooleanArray, Int32Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn labels(table: &TrackTable) -> Vec<&str> {
        table.columns.iter().map(|c| c.label.as_str()).collect()
    }

    const SAMPLE_CSV: &str = "\
,Track_ID , ALBUM_NAME,track_name,artists,track_genre,explicit,popularity,duration_ms,danceability,energy,key,loudness,mode,speechiness,acousticness,instrumentalness,liveness,valence,tempo,time_signature
0,t1,Album 1,Song One,Artist A,pop,False,10,200000,0.5,0.6,0,-5.0,1,0.05,0.1,0.0,0.1,0.4,120.0,4
1,t2,Album 2,Song Two,Artist B,pop,True,90,180000,0.7,0.8,11,-4.0,0,0.04,0.2,0.0,0.2,0.6,128.0,4
2,t3,Album 3,Song Three,Artist C,rock,False,50,240000,0.3,0.9,-1,-3.0,7,0.06,0.0,0.5,0.3,0.2,140.0,3
";

    #[test]
    fn test_csv_row_count_and_renames() {
        let table = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            labels(&table),
            [
                "",
                "Track ID",
                "Album Name",
                "Track Name",
                "Artist",
                "Genre",
                "Explicit",
                "Popularity",
                "Duration (ms)",
                "Danceability",
                "Energy",
                "Key",
                "Loudness",
                "Mode",
                "Speechiness",
                "Acousticness",
                "Instrumentalness",
                "Liveness",
                "Valence",
                "Tempo (BPM)",
                "Time Signature",
            ]
        );
        assert_eq!(table.genres, ["pop", "rock"]);
        // The unnamed index column is kept in the column list but not displayed.
        assert_eq!(table.columns[0].source, None);
        assert_eq!(table.display_columns().len(), 20);
    }

    #[test]
    fn test_csv_column_subset_keeps_source_order() {
        let csv = "popularity,Energy,track_name,extra,track_genre
12,0.4,Song,x,pop
";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(labels(&table), ["Popularity", "Energy", "Track Name", "extra", "Genre"]);
        assert_eq!(
            table.display_columns(),
            [
                ("Popularity", SourceColumn::Popularity),
                ("Energy", SourceColumn::Energy),
                ("Track Name", SourceColumn::TrackName),
                ("Genre", SourceColumn::TrackGenre),
            ]
        );
    }

    #[test]
    fn test_csv_decodes_mode_and_key() {
        let table = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        let t = &table.tracks;
        assert_eq!(t[0].mode, Some(Mode::Major));
        assert_eq!(t[1].mode, Some(Mode::Minor));
        assert_eq!(t[2].mode, None);
        assert_eq!(t[0].key, Some(PitchClass::C));
        assert_eq!(t[1].key, Some(PitchClass::B));
        assert_eq!(t[2].key, None);
    }

    #[test]
    fn test_csv_field_values() {
        let table = read_csv(SAMPLE_CSV.as_bytes()).unwrap();
        let second = &table.tracks[1];
        assert_eq!(second.track_id, "t2");
        assert_eq!(second.track_name, "Song Two");
        assert_eq!(second.artist, "Artist B");
        assert!(second.explicit);
        assert!(!table.tracks[0].explicit);
        assert_eq!(second.popularity, Some(90));
        assert_eq!(second.duration_ms, Some(180_000));
        assert_eq!(second.time_signature, Some(4));
        assert!((second.tempo - 128.0).abs() < 1e-12);
    }

    #[test]
    fn test_csv_malformed_cells_become_missing() {
        let csv = "track_genre,popularity,energy,key,mode\npop,150,abc,x,\nrock,,0.2,3,1\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.tracks[0].popularity, None);
        assert!(table.tracks[0].energy.is_nan());
        assert_eq!(table.tracks[0].key, None);
        assert_eq!(table.tracks[0].mode, None);
        assert_eq!(table.tracks[1].popularity, None);
        assert_eq!(table.tracks[1].key, Some(PitchClass::DSharp));
    }

    #[test]
    fn test_csv_popularity_outside_integers_is_missing() {
        let csv = "track_name,artists,track_genre,popularity\n\
                   A,X,pop,80\n\
                   B,X,pop,\n\
                   C,Y,pop,150\n\
                   D,Y,pop,49.6\n\
                   E,Y,pop,-3\n\
                   F,Y,pop,100.0\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        let popularity: Vec<Option<u8>> = table.tracks.iter().map(|t| t.popularity).collect();
        assert_eq!(popularity, [Some(80), None, None, None, None, Some(100)]);
    }

    #[test]
    fn test_csv_missing_required_column() {
        let err = read_csv("track_name,popularity\nx,1\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("track_genre"));
    }

    #[test]
    fn test_rename_keeps_unknown_columns() {
        let columns = rename_columns([" Tempo ", "Unnamed: 0", "TRACK_GENRE"]);
        let labels: Vec<&str> = columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Tempo (BPM)", "unnamed: 0", "Genre"]);
        assert_eq!(columns[0].source, Some(SourceColumn::Tempo));
        assert_eq!(columns[1].source, None);
    }

    #[test]
    fn test_json_records() {
        let json = r#"[
            {"Track_Genre": "pop", "popularity": 42, "explicit": true, "mode": 0, "key": 9, "artists": null},
            {"track_genre": "jazz", "popularity": 7.0, "explicit": "false", "mode": null, "key": 12}
        ]"#;
        let table = read_json(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.tracks[0].popularity, Some(42));
        assert!(table.tracks[0].explicit);
        assert_eq!(table.tracks[0].mode, Some(Mode::Minor));
        assert_eq!(table.tracks[0].key, Some(PitchClass::A));
        assert_eq!(table.tracks[0].artist, "");
        assert_eq!(table.tracks[1].mode, None);
        assert_eq!(table.tracks[1].key, None);
        assert_eq!(labels(&table), ["Genre", "Popularity", "Explicit", "Mode", "Key", "Artist"]);
    }

    #[test]
    fn test_json_absent_keys_become_missing() {
        let json = r#"[
            {"track_name": "A", "track_genre": "pop", "popularity": 40},
            {"track_name": "B", "popularity": 60},
            {"track_name": "C", "track_genre": "rock", "energy": 0.3}
        ]"#;
        let table = read_json(json).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.tracks[1].genre, "");
        assert_eq!(table.tracks[2].popularity, None);
        assert_eq!(table.genres, ["pop", "rock"]);
        assert_eq!(labels(&table), ["Track Name", "Genre", "Popularity", "Energy"]);
    }

    #[test]
    fn test_json_required_columns_checked_across_records() {
        let json = r#"[{"track_name": "A", "popularity": 1}, {"track_genre": "pop"}]"#;
        assert!(read_json(json).is_ok());

        let err = read_json(r#"[{"track_name": "A", "track_genre": "pop"}]"#).unwrap_err();
        assert!(err.to_string().contains("popularity"));
    }

    #[test]
    fn test_missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");
        assert!(matches!(load_file(&path), Err(LoadError::SourceNotFound(p)) if p == path));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.xlsx");
        std::fs::write(&path, b"not a table").unwrap();
        assert!(matches!(load_file(&path), Err(LoadError::UnsupportedFormat(ext)) if ext == "xlsx"));
    }

    #[test]
    fn test_load_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();
        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_load_parquet_file() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("track_genre", DataType::Utf8, false),
            Field::new("Popularity", DataType::Int64, false),
            Field::new("explicit", DataType::Boolean, true),
            Field::new("key", DataType::Int32, true),
            Field::new("mode", DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["pop", "rock"])),
                Arc::new(Int64Array::from(vec![33, 66])),
                Arc::new(BooleanArray::from(vec![Some(true), None])),
                Arc::new(Int32Array::from(vec![Some(4), Some(-1)])),
                Arc::new(Int64Array::from(vec![Some(1), None])),
            ],
        )
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracks.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(labels(&table), ["Genre", "Popularity", "Explicit", "Key", "Mode"]);
        assert_eq!(table.tracks[0].popularity, Some(33));
        assert!(table.tracks[0].explicit);
        assert!(!table.tracks[1].explicit);
        assert_eq!(table.tracks[0].key, Some(PitchClass::E));
        assert_eq!(table.tracks[1].key, None);
        assert_eq!(table.tracks[0].mode, Some(Mode::Major));
        assert_eq!(table.tracks[1].mode, None);
        assert!(table.tracks[0].danceability.is_nan());
    }
}
