//! # Portfolio
//!
//! A personal portfolio showcase: a catalog of projects rendered as cards,
//! with free-text search, tag filtering, and a persisted light/dark theme.
//!
//! The filtering and rendering logic lives in [`portfolio_core`]; this crate
//! adds configuration, catalog files, the preference store, and the outer
//! surfaces: a static page renderer, query commands, and an HTTP server.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────────┐   ┌───────────────┐
//! │ folio.toml   │──▶│  portfolio-core    │──▶│  HTML / JSON  │
//! │ projects.toml│   │ tags·match·render  │   │  CLI · HTTP   │
//! └──────────────┘   └────────────────────┘   └───────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! folio tags                              # list the tag index
//! folio search segmentation               # filter by text
//! folio search --tag "Computer Vision"    # filter by tag
//! folio render --output dist/index.html   # write the static page
//! folio theme toggle                      # flip the stored theme
//! folio serve                             # start the HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`catalog`] | Catalog file loading |
//! | [`prefs`] | File-backed preference store |
//! | [`site`] | Full-page rendering |
//! | [`search`] | Search and tag listing |
//! | [`export`] | JSON export for static hosts |
//! | [`theme_cmd`] | Theme subcommands |
//! | [`server`] | HTTP server |

pub mod catalog;
pub mod config;
pub mod export;
pub mod prefs;
pub mod search;
pub mod server;
pub mod site;
pub mod theme_cmd;
