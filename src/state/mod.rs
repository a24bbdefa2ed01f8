//! State management module
//!
//! This module handles all gallery state, including:
//! - Shared data structures and the seed set (data.rs)
//! - The gallery store and its operations (gallery.rs)

pub mod data;
pub mod gallery;

pub use data::{Picture, ViewMode};
pub use gallery::{AddOutcome, Gallery};
