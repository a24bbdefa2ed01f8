//! Shared data structures for the gallery state
//!
//! These structs represent the data model that flows between
//! the gallery store and the UI layer.

/// Fixed list of author names used for the seed set and for new pictures
pub const AUTHORS: [&str; 8] = [
    "Ван Гог",
    "Пикассо",
    "Моне",
    "Да Винчи",
    "Рембрандт",
    "Дали",
    "Кандинский",
    "Матисс",
];

/// First URL seed handed out to randomly added pictures
pub const FIRST_URL_SEED: u32 = 100;

/// Build the placeholder image URL for a seed value
pub fn picture_url(seed: u32) -> String {
    format!("https://picsum.photos/400/300?random={}", seed)
}

/// Represents a single picture in the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    /// Unique within the gallery
    pub id: u32,
    /// Display name shown under the image
    pub author: String,
    /// Remote image locator, unique within the gallery
    pub url: String,
}

impl Picture {
    pub fn new(id: u32, author: impl Into<String>, url: impl Into<String>) -> Self {
        Picture {
            id,
            author: author.into(),
            url: url.into(),
        }
    }
}

/// How the visible pictures are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Single column of cards
    #[default]
    List,
    /// Two-column grid of cards
    Grid,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::List => ViewMode::Grid,
            ViewMode::Grid => ViewMode::List,
        }
    }
}

/// Full gallery state at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryState {
    /// Pictures in insertion order
    pub items: Vec<Picture>,
    pub search_query: String,
    pub view_mode: ViewMode,
    /// Id handed to the next add attempt
    pub next_id: u32,
    /// URL seed handed to the next add attempt
    pub next_url_seed: u32,
}

impl GalleryState {
    /// State with no pictures and counters at their starting values
    pub fn empty() -> Self {
        GalleryState {
            items: Vec::new(),
            search_query: String::new(),
            view_mode: ViewMode::default(),
            next_id: 1,
            next_url_seed: FIRST_URL_SEED,
        }
    }

    /// The 8-picture seed set shown at application start
    pub fn seeded() -> Self {
        let items: Vec<Picture> = AUTHORS
            .iter()
            .zip(1u32..)
            .map(|(author, id)| Picture::new(id, *author, picture_url(id)))
            .collect();
        let next_id = items.iter().map(|p| p.id).max().unwrap_or(0) + 1;

        GalleryState {
            items,
            next_id,
            ..GalleryState::empty()
        }
    }
}

impl Default for GalleryState {
    fn default() -> Self {
        GalleryState::seeded()
    }
}
