//! Writes a deterministic synthetic track dataset with the column layout of
//! the public Spotify tracks dataset.
//!
//! ```text
//! generate_sample [OUTPUT]      # OUTPUT defaults to dataset.csv; *.parquet writes Parquet
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

const GENRES: [&str; 12] = [
    "acoustic", "afrobeat", "alt-rock", "ambient", "blues", "chill", "classical", "dance",
    "disco", "edm", "funk", "hip-hop",
];
const TRACKS_PER_GENRE: usize = 80;
const ARTISTS_PER_GENRE: usize = 12;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Roughly bell-shaped value in `[0, 1]` around `center`.
    fn around(&mut self, center: f64, spread: f64) -> f64 {
        let noise = (self.unit() + self.unit() + self.unit()) / 3.0 - 0.5;
        (center + noise * 2.0 * spread).clamp(0.0, 1.0)
    }
}

/// One generated row, in source column order.
struct Track {
    track_id: String,
    artists: String,
    album_name: String,
    track_name: String,
    popularity: i64,
    duration_ms: i64,
    explicit: bool,
    danceability: f64,
    energy: f64,
    key: i64,
    loudness: f64,
    mode: i64,
    speechiness: f64,
    acousticness: f64,
    instrumentalness: f64,
    liveness: f64,
    valence: f64,
    tempo: f64,
    time_signature: i64,
    track_genre: String,
}

fn generate(rng: &mut SimpleRng) -> Vec<Track> {
    let mut tracks = Vec::with_capacity(GENRES.len() * TRACKS_PER_GENRE);

    for (g, genre) in GENRES.iter().enumerate() {
        // Each genre gets its own character.
        let base_energy = 0.25 + 0.6 * (g as f64 / GENRES.len() as f64);
        let base_dance = rng.around(0.55, 0.25);
        let base_popularity = 20.0 + rng.unit() * 40.0;

        for i in 0..TRACKS_PER_GENRE {
            let artist_no = rng.below(ARTISTS_PER_GENRE as u64);
            let energy = rng.around(base_energy, 0.2);
            let acousticness = (1.0 - energy) * rng.around(0.8, 0.2);
            let popularity =
                (base_popularity + rng.around(0.5, 0.5) * 60.0 - 20.0).clamp(0.0, 100.0);
            // About one track in twenty has no detected key.
            let key = if rng.below(20) == 0 {
                -1
            } else {
                rng.below(12) as i64
            };

            tracks.push(Track {
                track_id: format!("{:022x}", rng.next_u64()),
                artists: format!("{} Artist {}", capitalize(genre), artist_no + 1),
                album_name: format!("{} Sessions Vol. {}", capitalize(genre), i % 5 + 1),
                track_name: format!("{} Song {}", capitalize(genre), i + 1),
                popularity: popularity.round() as i64,
                duration_ms: 120_000 + rng.below(240_000) as i64,
                explicit: rng.below(10) == 0,
                danceability: rng.around(base_dance, 0.2),
                energy,
                key,
                loudness: -25.0 + energy * 22.0 + rng.around(0.5, 0.5) * 4.0 - 2.0,
                mode: (rng.below(3) != 0) as i64,
                speechiness: rng.around(0.08, 0.07),
                acousticness,
                instrumentalness: if rng.below(4) == 0 { rng.unit() } else { 0.0 },
                liveness: rng.around(0.18, 0.15),
                valence: rng.around(0.45, 0.4),
                tempo: 70.0 + rng.unit() * 110.0,
                time_signature: if rng.below(8) == 0 { 3 } else { 4 },
                track_genre: genre.to_string(),
            });
        }
    }
    tracks
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const HEADER: [&str; 21] = [
    "", "track_id", "artists", "album_name", "track_name", "popularity", "duration_ms",
    "explicit", "danceability", "energy", "key", "loudness", "mode", "speechiness",
    "acousticness", "instrumentalness", "liveness", "valence", "tempo", "time_signature",
    "track_genre",
];

fn write_csv(path: &Path, tracks: &[Track]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(HEADER)?;
    for (i, t) in tracks.iter().enumerate() {
        writer.write_record([
            i.to_string(),
            t.track_id.clone(),
            t.artists.clone(),
            t.album_name.clone(),
            t.track_name.clone(),
            t.popularity.to_string(),
            t.duration_ms.to_string(),
            // The public dataset spells booleans the Python way.
            if t.explicit { "True" } else { "False" }.to_string(),
            format!("{:.3}", t.danceability),
            format!("{:.3}", t.energy),
            t.key.to_string(),
            format!("{:.3}", t.loudness),
            t.mode.to_string(),
            format!("{:.4}", t.speechiness),
            format!("{:.4}", t.acousticness),
            format!("{:.6}", t.instrumentalness),
            format!("{:.4}", t.liveness),
            format!("{:.3}", t.valence),
            format!("{:.3}", t.tempo),
            t.time_signature.to_string(),
            t.track_genre.clone(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn to_batch(tracks: &[Track]) -> Result<RecordBatch> {
    fn text(tracks: &[Track], f: impl Fn(&Track) -> &str) -> ArrayRef {
        Arc::new(StringArray::from(tracks.iter().map(f).collect::<Vec<_>>()))
    }
    fn int(tracks: &[Track], f: impl Fn(&Track) -> i64) -> ArrayRef {
        Arc::new(Int64Array::from(tracks.iter().map(f).collect::<Vec<_>>()))
    }
    fn float(tracks: &[Track], f: impl Fn(&Track) -> f64) -> ArrayRef {
        Arc::new(Float64Array::from(tracks.iter().map(f).collect::<Vec<_>>()))
    }

    let columns: Vec<(&str, DataType, ArrayRef)> = vec![
        ("track_id", DataType::Utf8, text(tracks, |t| t.track_id.as_str())),
        ("artists", DataType::Utf8, text(tracks, |t| t.artists.as_str())),
        ("album_name", DataType::Utf8, text(tracks, |t| t.album_name.as_str())),
        ("track_name", DataType::Utf8, text(tracks, |t| t.track_name.as_str())),
        ("popularity", DataType::Int64, int(tracks, |t| t.popularity)),
        ("duration_ms", DataType::Int64, int(tracks, |t| t.duration_ms)),
        (
            "explicit",
            DataType::Boolean,
            Arc::new(BooleanArray::from(
                tracks.iter().map(|t| t.explicit).collect::<Vec<_>>(),
            )),
        ),
        ("danceability", DataType::Float64, float(tracks, |t| t.danceability)),
        ("energy", DataType::Float64, float(tracks, |t| t.energy)),
        ("key", DataType::Int64, int(tracks, |t| t.key)),
        ("loudness", DataType::Float64, float(tracks, |t| t.loudness)),
        ("mode", DataType::Int64, int(tracks, |t| t.mode)),
        ("speechiness", DataType::Float64, float(tracks, |t| t.speechiness)),
        ("acousticness", DataType::Float64, float(tracks, |t| t.acousticness)),
        ("instrumentalness", DataType::Float64, float(tracks, |t| t.instrumentalness)),
        ("liveness", DataType::Float64, float(tracks, |t| t.liveness)),
        ("valence", DataType::Float64, float(tracks, |t| t.valence)),
        ("tempo", DataType::Float64, float(tracks, |t| t.tempo)),
        ("time_signature", DataType::Int64, int(tracks, |t| t.time_signature)),
        ("track_genre", DataType::Utf8, text(tracks, |t| t.track_genre.as_str())),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, ty, _)| Field::new(*name, ty.clone(), false))
            .collect::<Vec<_>>(),
    ));
    let arrays = columns.into_iter().map(|(_, _, array)| array).collect();
    RecordBatch::try_new(schema, arrays).context("assembling record batch")
}

fn write_parquet(path: &Path, tracks: &[Track]) -> Result<()> {
    let batch = to_batch(tracks)?;
    println!("{}", pretty_format_batches(&[batch.slice(0, 5)])?);

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dataset.csv"));

    let mut rng = SimpleRng::new(42);
    let tracks = generate(&mut rng);

    let is_parquet = output_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet") || e.eq_ignore_ascii_case("pq"));
    if is_parquet {
        write_parquet(&output_path, &tracks)?;
    } else {
        write_csv(&output_path, &tracks)?;
    }

    println!(
        "Wrote {} tracks in {} genres to {}",
        tracks.len(),
        GENRES.len(),
        output_path.display()
    );
    Ok(())
}
