use rand::seq::IndexedRandom;
use rand::Rng;

use super::data::{picture_url, GalleryState, Picture, ViewMode, AUTHORS};

/// What happened to an add attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new picture with this id was appended
    Added(u32),
    /// The candidate shared an id or url with an existing picture and was dropped
    Duplicate,
}

/// The Gallery owns every piece of mutable gallery state.
///
/// Fields are private: the UI reads through the accessors and changes
/// state only through the named operations below, so rendering stays a
/// pure function of the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    state: GalleryState,
}

impl Gallery {
    /// Create a gallery holding the 8-picture seed set
    pub fn new() -> Self {
        Gallery::from_state(GalleryState::seeded())
    }

    pub fn from_state(state: GalleryState) -> Self {
        Gallery { state }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn items(&self) -> &[Picture] {
        &self.state.items
    }

    pub fn search_query(&self) -> &str {
        &self.state.search_query
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    pub fn next_id(&self) -> u32 {
        self.state.next_id
    }

    pub fn next_url_seed(&self) -> u32 {
        self.state.next_url_seed
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Add a picture by a random author using the thread-local RNG
    pub fn add_random_picture(&mut self) -> AddOutcome {
        self.add_random_picture_with(&mut rand::rng())
    }

    /// Add a picture by a random author.
    ///
    /// Both counters advance on every call, even when the candidate is
    /// dropped because its id or url is already taken. A dropped candidate
    /// is not retried. Counters wrap around at `u32::MAX`.
    pub fn add_random_picture_with<R: Rng>(&mut self, rng: &mut R) -> AddOutcome {
        let author = *AUTHORS.choose(rng).unwrap_or(&AUTHORS[0]);
        let id = self.state.next_id;
        let url = picture_url(self.state.next_url_seed);

        self.state.next_id = self.state.next_id.wrapping_add(1);
        self.state.next_url_seed = self.state.next_url_seed.wrapping_add(1);

        let exists = self
            .state
            .items
            .iter()
            .any(|p| p.id == id || p.url == url);

        if exists {
            tracing::debug!(id, %url, "skipping duplicate picture");
            return AddOutcome::Duplicate;
        }

        tracing::debug!(id, author, %url, "added picture");
        self.state.items.push(Picture::new(id, author, url));
        AddOutcome::Added(id)
    }

    /// Remove the picture with the given id.
    /// Returns false when no such picture exists.
    pub fn remove_picture(&mut self, id: u32) -> bool {
        let before = self.state.items.len();
        self.state.items.retain(|p| p.id != id);
        let removed = self.state.items.len() != before;

        if removed {
            tracing::debug!(id, "removed picture");
        }
        removed
    }

    /// Drop every picture. Counters keep their values.
    pub fn clear_all(&mut self) {
        tracing::debug!(count = self.state.items.len(), "clearing gallery");
        self.state.items.clear();
    }

    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.state.search_query = text.into();
    }

    pub fn toggle_view_mode(&mut self) {
        self.state.view_mode = self.state.view_mode.toggled();
    }

    /// Pictures whose author contains the search query, ignoring case.
    /// Recomputed on every call.
    pub fn visible_items(&self) -> Vec<&Picture> {
        filter_by_author(&self.state.items, &self.state.search_query)
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Gallery::new()
    }
}

/// Case-insensitive substring filter over author names, order preserved
pub fn filter_by_author<'a>(items: &'a [Picture], query: &str) -> Vec<&'a Picture> {
    if query.is_empty() {
        return items.iter().collect();
    }

    let needle = fold_case(query);
    items
        .iter()
        .filter(|p| fold_case(&p.author).contains(&needle))
        .collect()
}

/// Lowercase char by char, without context-dependent rules like final sigma
fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;
    use std::collections::HashSet;

    fn ids(pictures: &[&Picture]) -> Vec<u32> {
        pictures.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_add_one_to_seed_set() {
        let mut gallery = Gallery::new();
        let mut rng = StdRng::seed_from_u64(7);

        let outcome = gallery.add_random_picture_with(&mut rng);

        assert_eq!(outcome, AddOutcome::Added(9));
        assert_eq!(gallery.len(), 9);
        assert_eq!(gallery.next_id(), 10);
        assert_eq!(gallery.next_url_seed(), 101);

        let added = &gallery.items()[8];
        assert_eq!(added.id, 9);
        assert_eq!(added.url, "https://picsum.photos/400/300?random=100");
        assert!(AUTHORS.contains(&added.author.as_str()));
    }

    #[test]
    fn test_added_pictures_are_unique() {
        let mut gallery = Gallery::new();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            gallery.add_random_picture_with(&mut rng);
        }

        let ids: HashSet<u32> = gallery.items().iter().map(|p| p.id).collect();
        let urls: HashSet<&str> = gallery.items().iter().map(|p| p.url.as_str()).collect();
        assert_eq!(ids.len(), gallery.len());
        assert_eq!(urls.len(), gallery.len());
        assert_eq!(gallery.len(), 58);
    }

    #[test]
    fn test_duplicate_candidate_is_dropped_but_counters_advance() {
        let mut state = GalleryState::seeded();
        // Hand-inserted picture already owns the next generated url
        state.items.push(Picture::new(500, "Моне", picture_url(100)));
        let mut gallery = Gallery::from_state(state);

        let outcome = gallery.add_random_picture();

        assert_eq!(outcome, AddOutcome::Duplicate);
        assert_eq!(gallery.len(), 9);
        assert_eq!(gallery.next_id(), 10);
        assert_eq!(gallery.next_url_seed(), 101);

        // Next attempt uses fresh counters and succeeds
        assert_eq!(gallery.add_random_picture(), AddOutcome::Added(10));
        assert_eq!(gallery.len(), 10);
    }

    #[test]
    fn test_duplicate_id_is_dropped() {
        let mut state = GalleryState::seeded();
        state.next_id = 4;
        let mut gallery = Gallery::from_state(state);

        assert_eq!(gallery.add_random_picture(), AddOutcome::Duplicate);
        assert_eq!(gallery.len(), 8);
        assert_eq!(gallery.next_id(), 5);
    }

    #[test]
    fn test_remove_seed_picture() {
        let mut gallery = Gallery::new();

        assert!(gallery.remove_picture(3));

        assert_eq!(gallery.len(), 7);
        assert_eq!(ids(&gallery.visible_items()), vec![1, 2, 4, 5, 6, 7, 8]);
        assert_eq!(gallery.next_id(), 9);
        assert_eq!(gallery.next_url_seed(), 100);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut gallery = Gallery::new();

        assert!(gallery.remove_picture(5));
        let after_first = gallery.clone();
        assert!(!gallery.remove_picture(5));

        assert_eq!(gallery, after_first);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut gallery = Gallery::new();
        assert!(!gallery.remove_picture(999));
        assert_eq!(gallery, Gallery::new());
    }

    #[test]
    fn test_clear_all_keeps_counters() {
        let mut gallery = Gallery::new();
        gallery.add_random_picture();
        gallery.set_search_query("дали");

        gallery.clear_all();

        assert!(gallery.is_empty());
        assert!(gallery.visible_items().is_empty());
        assert_eq!(gallery.next_id(), 10);
        assert_eq!(gallery.next_url_seed(), 101);

        assert_eq!(gallery.add_random_picture(), AddOutcome::Added(10));
        assert_eq!(gallery.items()[0].url, picture_url(101));
    }

    #[test]
    fn test_empty_query_shows_everything_in_order() {
        let mut gallery = Gallery::new();
        gallery.add_random_picture();
        gallery.remove_picture(2);

        let visible = gallery.visible_items();
        let all: Vec<&Picture> = gallery.items().iter().collect();
        assert_eq!(visible, all);
    }

    #[rstest]
    #[case("дал", vec![6])]
    #[case("ДАЛИ", vec![6])]
    #[case("зз", vec![])]
    #[case("ИН", vec![4, 7])]
    #[case("ван", vec![1])]
    fn test_search_is_case_insensitive_substring(#[case] query: &str, #[case] expected: Vec<u32>) {
        let mut gallery = Gallery::new();
        gallery.set_search_query(query);

        assert_eq!(ids(&gallery.visible_items()), expected);
    }

    #[rstest]
    #[case("ΑΣ", "σ")]
    #[case("ΑΣ", "Σ")]
    #[case("Van Gogh", "GOGH")]
    #[case("Van Gogh", "n g")]
    fn test_search_folds_each_char(#[case] author: &str, #[case] query: &str) {
        let items = [Picture::new(1, author, "u1")];
        assert_eq!(filter_by_author(&items, query).len(), 1);
    }

    #[test]
    fn test_counters_wrap_at_max() {
        let mut state = GalleryState::empty();
        state.next_id = u32::MAX;
        state.next_url_seed = u32::MAX;
        let mut gallery = Gallery::from_state(state);

        assert_eq!(gallery.add_random_picture(), AddOutcome::Added(u32::MAX));
        assert_eq!(gallery.next_id(), 0);
        assert_eq!(gallery.next_url_seed(), 0);
        assert_eq!(gallery.items()[0].url, picture_url(u32::MAX));
    }

    #[test]
    fn test_search_query_is_not_trimmed() {
        let mut gallery = Gallery::new();
        gallery.set_search_query(" Гог ");

        assert_eq!(gallery.search_query(), " Гог ");
        assert!(gallery.visible_items().is_empty());
    }

    #[test]
    fn test_visible_items_follow_mutations() {
        let mut gallery = Gallery::new();
        gallery.set_search_query("матисс");
        assert_eq!(ids(&gallery.visible_items()), vec![8]);

        gallery.remove_picture(8);
        assert!(gallery.visible_items().is_empty());

        gallery.set_search_query("");
        assert_eq!(gallery.visible_items().len(), 7);
    }

    #[test]
    fn test_toggle_view_mode_leaves_items_alone() {
        let mut gallery = Gallery::new();

        gallery.toggle_view_mode();
        assert_eq!(gallery.view_mode(), ViewMode::Grid);
        gallery.toggle_view_mode();
        assert_eq!(gallery.view_mode(), ViewMode::List);
        assert_eq!(gallery.len(), 8);
    }
}
