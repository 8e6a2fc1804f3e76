//! # Portfolio Core
//!
//! Pure, I/O-free logic for the portfolio showcase: the project catalog,
//! tag index, match predicate, card renderer, filter controller, and the
//! small theme and menu controllers that drive a headless [`page::Page`].
//!
//! This crate contains no tokio, filesystem I/O, or other native-only
//! dependencies. Storage is reached through the [`theme::KeyValueStore`]
//! trait and rendering produces [`render::Element`] trees that serialize
//! to HTML.
//!
//! ```text
//! Catalog ──▶ tag_index ──▶ tag selector options
//!    │
//!    └──▶ FilterState ──▶ matches() ──▶ render_card() ──▶ project grid
//! ```

pub mod catalog;
pub mod filter;
pub mod links;
pub mod matching;
pub mod menu;
pub mod models;
pub mod page;
pub mod render;
pub mod tags;
pub mod theme;
