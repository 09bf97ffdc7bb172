//! View state and data flow for the ShowDeck catalog browser.
//!
//! The catalog view and the detail view each own their state; background
//! fetches report back through [`Msg`]s that the [`Shell`] routes to whichever
//! view is mounted.

mod api;
pub mod app_state;
pub mod artwork;
pub mod catalog;
pub mod debounce;
pub mod detail;
mod error;
pub mod models;
pub mod navigation;
pub mod shell;

#[cfg(test)]
mod testing;

pub use api::{CatalogConfig, CatalogService, TmdbClient, DEFAULT_API_BASE, DEFAULT_LANGUAGE, FIRST_PAGE};
pub use app_state::{Msg, Outbox, ViewId};
pub use artwork::{Artwork, PosterSource, DEFAULT_IMAGE_BASE, PLACEHOLDER_ASSET};
pub use catalog::{group_by_genre, CatalogEvent, CatalogState, CatalogView, GenreGroup, OTHERS_BUCKET, SEARCH_DEBOUNCE};
pub use detail::{DetailEvent, DetailState, DetailView};
pub use error::{CatalogError, CatalogResult};
pub use models::{Episode, Genre, GenreTable, Season, SeasonSummary, Show, ShowDetails, DEFAULT_SEASON};
pub use navigation::{ChannelNavigator, Navigator, Route};
pub use shell::{ActiveView, Shell, ShellOptions};
