use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Season requested when a show lists no usable first season.
pub const DEFAULT_SEASON: u32 = 1;

/// `null` and missing fields both decode to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Genre id to display name, filled once per catalog view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreTable(HashMap<u64, String>);

impl GenreTable {
    pub fn name(&self, id: u64) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Genre> for GenreTable {
    fn from_iter<I: IntoIterator<Item = Genre>>(iter: I) -> Self {
        Self(iter.into_iter().map(|g| (g.id, g.name)).collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<u64>,
}

impl Show {
    /// First listed genre, used for grouping.
    pub fn primary_genre(&self) -> Option<u64> {
        self.genre_ids.first().copied()
    }

    pub fn summary(&self) -> &str {
        self.overview
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("No summary available.")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    pub episode_number: u32,
    #[serde(default)]
    pub still_path: Option<String>,
}

impl Episode {
    pub fn title(&self) -> String {
        format!("Episode {}: {}", self.episode_number, self.name)
    }

    pub fn description(&self) -> &str {
        if self.overview.trim().is_empty() {
            "No description available."
        } else {
            &self.overview
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub season_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub episode_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowDetails {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seasons: Vec<SeasonSummary>,
}

impl ShowDetails {
    /// Number of the first listed season. Season 0 counts as unset, matching
    /// the web client this replaces.
    pub fn default_season(&self) -> u32 {
        self.seasons
            .first()
            .map(|s| s.season_number)
            .filter(|n| *n != 0)
            .unwrap_or(DEFAULT_SEASON)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Season {
    #[serde(default, deserialize_with = "null_as_default")]
    pub episodes: Vec<Episode>,
}

// Response envelopes

#[derive(Debug, Deserialize)]
pub(crate) struct GenreList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Page<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<T>,
}
