use iced::{Element, Task, Theme};
use std::collections::HashMap;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod remote;
mod state;
mod ui;

use config::Settings;
use remote::{FetchError, FetchedImage, ImageCache};
use state::{AddOutcome, Gallery};
use ui::ImageSlot;

/// Main application state
struct PictureGallery {
    /// All gallery state; changed only through its operations
    gallery: Gallery,
    /// Loaded card images by URL. Owned here, never by the gallery.
    images: HashMap<String, ImageSlot>,
    settings: Settings,
    client: Option<reqwest::Client>,
    cache: Option<ImageCache>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Search box contents changed
    SearchChanged(String),
    /// User clicked the list/grid toggle
    ToggleViewMode,
    /// User clicked "clear all"
    ClearAll,
    /// User clicked the add button
    AddPicture,
    /// User clicked a card
    RemovePicture(u32),
    /// Background fetch for a URL finished
    ImageLoaded(String, Result<FetchedImage, Arc<FetchError>>),
}

impl PictureGallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();

        // Without a client every fetch fails soft and cards show placeholders
        let client = match remote::fetch::create_client(&settings) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!(error = %e, "failed to create HTTP client");
                None
            }
        };

        let cache = if settings.disk_cache {
            ImageCache::open_default()
        } else {
            None
        };

        PictureGallery::with_parts(settings, client, cache)
    }

    /// Seed the gallery and start fetching its images
    fn with_parts(
        settings: Settings,
        client: Option<reqwest::Client>,
        cache: Option<ImageCache>,
    ) -> (Self, Task<Message>) {
        let gallery = Gallery::new();
        tracing::info!(pictures = gallery.len(), "gallery initialized");

        let mut app = PictureGallery {
            gallery,
            images: HashMap::new(),
            settings,
            client,
            cache,
        };
        let task = app.request_images();

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SearchChanged(query) => {
                self.gallery.set_search_query(query);
            }
            Message::ToggleViewMode => {
                self.gallery.toggle_view_mode();
            }
            Message::ClearAll => {
                if !self.gallery.is_empty() {
                    self.gallery.clear_all();
                    self.forget_removed_images();
                    tracing::info!("gallery cleared");
                }
            }
            Message::AddPicture => match self.gallery.add_random_picture() {
                AddOutcome::Added(id) => tracing::info!(id, "picture added"),
                AddOutcome::Duplicate => tracing::info!(
                    next_id = self.gallery.next_id(),
                    next_url_seed = self.gallery.next_url_seed(),
                    "duplicate picture skipped"
                ),
            },
            Message::RemovePicture(id) => {
                if self.gallery.remove_picture(id) {
                    self.forget_removed_images();
                    tracing::info!(id, "picture removed");
                }
            }
            Message::ImageLoaded(url, result) => {
                if !self.gallery.items().iter().any(|p| p.url == url) {
                    tracing::debug!(%url, "discarding image for removed picture");
                    return Task::none();
                }

                let slot = match result {
                    Ok(fetched) => ImageSlot::Ready(iced::widget::image::Handle::from_rgba(
                        fetched.width,
                        fetched.height,
                        fetched.pixels,
                    )),
                    Err(e) => {
                        tracing::warn!(%url, error = %e, "image fetch failed");
                        ImageSlot::Failed
                    }
                };
                self.images.insert(url, slot);
                return Task::none();
            }
        }

        tracing::trace!(state = ?self.gallery.state(), "gallery updated");
        self.request_images()
    }

    /// Start a fetch for every visible picture not requested yet.
    /// Each URL is fetched at most once per session.
    fn request_images(&mut self) -> Task<Message> {
        let mut tasks = Vec::new();

        for picture in self.gallery.visible_items() {
            if self.images.contains_key(&picture.url) {
                continue;
            }
            self.images.insert(picture.url.clone(), ImageSlot::Loading);

            let url = picture.url.clone();
            tasks.push(Task::perform(
                remote::fetch_image(
                    self.client.clone(),
                    self.cache.clone(),
                    url.clone(),
                    self.settings.image_width,
                    self.settings.image_height,
                ),
                move |result| Message::ImageLoaded(url.clone(), result.map_err(Arc::new)),
            ));
        }

        Task::batch(tasks)
    }

    /// Drop image slots whose picture is no longer in the gallery
    fn forget_removed_images(&mut self) {
        let items = self.gallery.items();
        self.images.retain(|url, _| items.iter().any(|p| &p.url == url));
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let toolbar = ui::layout::toolbar(self.gallery.search_query(), self.gallery.view_mode());
        let pictures = ui::layout::pictures(
            self.gallery.visible_items(),
            self.gallery.view_mode(),
            self.gallery.search_query(),
            &self.images,
            self.settings.card_image_height,
        );

        ui::layout::screen(toolbar, pictures)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        if self.settings.dark_theme {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

fn main() -> iced::Result {
    if let Err(e) = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
    {
        eprintln!("tracing init failed: {}", e);
    }

    iced::application("Picture Gallery", PictureGallery::update, PictureGallery::view)
        .theme(PictureGallery::theme)
        .centered()
        .run_with(PictureGallery::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_app() -> PictureGallery {
        let (app, _) = PictureGallery::with_parts(Settings::default(), None, None);
        app
    }

    fn url_of(app: &PictureGallery, id: u32) -> String {
        app.gallery
            .items()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.url.clone())
            .unwrap()
    }

    #[test]
    fn test_startup_requests_every_seed_image() {
        let app = offline_app();

        assert_eq!(app.images.len(), 8);
        assert!(app.images.values().all(|slot| matches!(slot, ImageSlot::Loading)));
    }

    #[test]
    fn test_clear_all_releases_image_slots() {
        let mut app = offline_app();
        for _ in 0..100 {
            let _ = app.update(Message::AddPicture);
        }
        assert_eq!(app.images.len(), 108);

        let _ = app.update(Message::ClearAll);

        assert!(app.gallery.is_empty());
        assert!(app.images.is_empty());
    }

    #[test]
    fn test_card_press_removes_picture_and_its_image() {
        let mut app = offline_app();
        let url = url_of(&app, 3);

        let _ = app.update(Message::RemovePicture(3));

        assert_eq!(app.gallery.len(), 7);
        assert!(app.gallery.items().iter().all(|p| p.id != 3));
        assert!(!app.images.contains_key(&url));
        assert_eq!(app.images.len(), 7);
    }

    #[test]
    fn test_image_loaded_never_changes_gallery() {
        let mut app = offline_app();
        let before = app.gallery.clone();
        let url = url_of(&app, 1);

        let _ = app.update(Message::ImageLoaded(
            url.clone(),
            Err(Arc::new(FetchError::NoClient)),
        ));

        assert_eq!(app.gallery, before);
        assert!(matches!(app.images.get(&url), Some(ImageSlot::Failed)));
    }

    #[test]
    fn test_late_image_for_removed_picture_is_dropped() {
        let mut app = offline_app();
        let url = url_of(&app, 2);
        let _ = app.update(Message::RemovePicture(2));

        let _ = app.update(Message::ImageLoaded(
            url.clone(),
            Ok(FetchedImage {
                width: 1,
                height: 1,
                pixels: vec![0, 0, 0, 255],
            }),
        ));

        assert!(!app.images.contains_key(&url));
        assert_eq!(app.gallery.len(), 7);
    }

    #[test]
    fn test_search_and_toggle_route_to_gallery() {
        let mut app = offline_app();

        let _ = app.update(Message::SearchChanged("дали".to_string()));
        let _ = app.update(Message::ToggleViewMode);

        assert_eq!(app.gallery.search_query(), "дали");
        assert_eq!(app.gallery.visible_items().len(), 1);
        assert_eq!(app.gallery.view_mode(), state::ViewMode::Grid);
    }
}
