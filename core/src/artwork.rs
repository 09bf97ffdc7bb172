pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
pub const IMAGE_WIDTH: &str = "w300";
/// Local asset shown in place of a missing poster.
pub const PLACEHOLDER_ASSET: &str = "no-image.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterSource {
    Remote(String),
    Placeholder,
}

/// Builds image URLs from server-relative paths.
#[derive(Debug, Clone)]
pub struct Artwork {
    base: String,
}

impl Default for Artwork {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE)
    }
}

impl Artwork {
    pub fn new(base: &str) -> Self {
        Self { base: base.trim_end_matches('/').to_string() }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}/{}{}", self.base, IMAGE_WIDTH, path)
        } else {
            format!("{}/{}/{}", self.base, IMAGE_WIDTH, path)
        }
    }

    /// Catalog posters always render: a missing path maps to the placeholder.
    pub fn poster(&self, path: Option<&str>) -> PosterSource {
        match path.filter(|p| !p.is_empty()) {
            Some(p) => PosterSource::Remote(self.url(p)),
            None => PosterSource::Placeholder,
        }
    }

    /// Episode stills are dropped from the layout when missing.
    pub fn still(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty()).map(|p| self.url(p))
    }
}
