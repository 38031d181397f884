use std::cmp::Reverse;
use std::collections::HashMap;

use super::stats::mean;
use crate::data::model::TrackRecord;

/// A track in the popularity ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTrack {
    pub track_name: String,
    pub artist: String,
    pub popularity: u8,
}

/// Mean popularity of one group (artist or genre).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub label: String,
    pub mean: f64,
    pub count: usize,
}

/// The `n` most popular tracks, ties kept in input order.  Tracks without a
/// popularity are not ranked.
pub fn top_tracks(rows: &[&TrackRecord], n: usize) -> Vec<RankedTrack> {
    let mut ranked: Vec<(&TrackRecord, u8)> = rows
        .iter()
        .filter_map(|&t| Some((t, t.popularity?)))
        .collect();
    ranked.sort_by_key(|&(_, popularity)| Reverse(popularity));
    ranked
        .into_iter()
        .take(n)
        .map(|(t, popularity)| RankedTrack {
            track_name: t.track_name.clone(),
            artist: t.artist.clone(),
            popularity,
        })
        .collect()
}

/// The `n` artists with the highest mean popularity.
pub fn top_artists(rows: &[&TrackRecord], n: usize) -> Vec<GroupMean> {
    top_groups(rows, n, |t| t.artist.as_str())
}

/// The `n` genres with the highest mean popularity.
pub fn top_genres(rows: &[&TrackRecord], n: usize) -> Vec<GroupMean> {
    top_groups(rows, n, |t| t.genre.as_str())
}

/// Group by `key`, average popularity per group and keep the `n` largest
/// means.  Equal means keep the order in which their groups first appear.
/// Rows with an empty key or no popularity belong to no group.
fn top_groups<F>(rows: &[&TrackRecord], n: usize, key: F) -> Vec<GroupMean>
where
    F: Fn(&TrackRecord) -> &str,
{
    let mut order: Vec<&str> = Vec::new();
    let mut members: HashMap<&str, Vec<f64>> = HashMap::new();
    for &t in rows {
        let k = key(t);
        let Some(popularity) = t.popularity else {
            continue;
        };
        if k.is_empty() {
            continue;
        }
        members
            .entry(k)
            .or_insert_with(|| {
                order.push(k);
                Vec::new()
            })
            .push(f64::from(popularity));
    }

    let mut groups: Vec<GroupMean> = order
        .into_iter()
        .filter_map(|label| {
            let values = members.remove(label)?;
            let count = values.len();
            Some(GroupMean {
                label: label.to_string(),
                mean: mean(values)?,
                count,
            })
        })
        .collect();

    groups.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    groups.truncate(n);
    groups
}
