//! `folio theme` subcommands: inspect and change the persisted theme.

use anyhow::Result;

use portfolio_core::theme::{load_theme, save_theme, Theme};

use crate::config::Config;
use crate::prefs::JsonFileStore;

pub fn run_theme_show(config: &Config) -> Result<()> {
    let store = JsonFileStore::open(&config.theme.store_path)?;
    println!("{}", load_theme(&store));
    Ok(())
}

pub fn run_theme_set(config: &Config, theme: Theme) -> Result<()> {
    let mut store = JsonFileStore::open(&config.theme.store_path)?;
    save_theme(&mut store, theme)?;
    tracing::info!(theme = %theme, path = %store.path().display(), "theme saved");
    println!("{}", theme);
    Ok(())
}

pub fn run_theme_toggle(config: &Config) -> Result<()> {
    let store = JsonFileStore::open(&config.theme.store_path)?;
    let next = load_theme(&store).toggled();
    run_theme_set(config, next)
}
