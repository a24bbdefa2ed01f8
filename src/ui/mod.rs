//! User interface building blocks
//!
//! - `card.rs` - a single picture card
//! - `layout.rs` - toolbar, list/grid of cards and the add button

pub mod card;
pub mod layout;

pub use card::ImageSlot;
