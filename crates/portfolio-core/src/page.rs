//! Headless page model and its initialization hook.
//!
//! A [`Page`] holds the display slots the controllers write into. Every slot
//! is optional: [`initialize`] runs year, theme, menu, and filter setup in
//! that order, and each step silently skips itself when the slots it needs
//! are missing. Event methods (`select_tag`, `input_search`, ...) are no-ops
//! until the matching setup step has bound them.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::filter::{FilterController, FilterError, TagOption};
use crate::links::PlaceholderPolicy;
use crate::menu::{link_activated, toggle_menu, NavLink, NavPanel};
use crate::models::{FilterState, TagSelection, ALL_TAGS};
use crate::render::Element;
use crate::theme::{load_theme, save_theme, KeyValueStore, StoreError, Theme, THEME_ATTR};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSlot {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelect {
    pub options: Vec<TagOption>,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchField {
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    pub children: Vec<Element>,
}

/// Which event handlers setup has attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bindings {
    pub theme_toggle: bool,
    pub menu: bool,
    pub filters: bool,
}

#[derive(Default)]
pub struct Page {
    /// Attributes of the document root (always present).
    pub root_attrs: BTreeMap<String, String>,
    pub year: Option<TextSlot>,
    pub theme_label: Option<TextSlot>,
    pub theme_button: bool,
    pub menu_button: bool,
    pub nav: Option<NavPanel>,
    pub tag_select: Option<TagSelect>,
    pub search: Option<SearchField>,
    pub grid: Option<Grid>,
    bindings: Bindings,
    filters: Option<FilterController>,
}

/// Everything the initialization hook needs from the host.
pub struct PageContext<'a> {
    pub catalog: Arc<Catalog>,
    pub policy: PlaceholderPolicy,
    pub store: &'a mut dyn KeyValueStore,
    pub year: i32,
}

pub fn default_nav_links() -> Vec<NavLink> {
    vec![
        NavLink::new("#about", "About"),
        NavLink::new("#projects", "Projects"),
        NavLink::new("#contact", "Contact"),
    ]
}

impl Page {
    /// A page with every slot present.
    pub fn full(nav_links: Vec<NavLink>) -> Self {
        Self {
            year: Some(TextSlot::default()),
            theme_label: Some(TextSlot::default()),
            theme_button: true,
            menu_button: true,
            nav: Some(NavPanel::new(nav_links)),
            tag_select: Some(TagSelect::default()),
            search: Some(SearchField::default()),
            grid: Some(Grid::default()),
            ..Self::default()
        }
    }

    /// A page with no optional slots.
    pub fn bare() -> Self {
        Self::default()
    }

    pub fn bindings(&self) -> Bindings {
        self.bindings
    }

    pub fn filters(&self) -> Option<&FilterController> {
        self.filters.as_ref()
    }

    /// Theme as reflected on the root attribute.
    pub fn current_theme(&self) -> Theme {
        self.root_attrs
            .get(THEME_ATTR)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// Filter state read back from the control values.
    pub fn filter_state(&self) -> FilterState {
        let tag = self
            .tag_select
            .as_ref()
            .map(|s| TagSelection::parse(&s.value))
            .unwrap_or_default();
        let search = self
            .search
            .as_ref()
            .map(|s| s.value.clone())
            .unwrap_or_default();
        FilterState::new(tag, search)
    }

    /// Headings of the cards currently in the grid.
    pub fn rendered_titles(&self) -> Vec<String> {
        self.grid
            .iter()
            .flat_map(|g| g.children.iter())
            .filter_map(|c| c.find(&|e: &Element| e.tag == "h3"))
            .map(|h| h.text_content())
            .collect()
    }

    /// Tag selector change.
    ///
    /// Returns `Ok(false)` when filters are not bound. An unknown tag is
    /// rejected and leaves both the control and the grid unchanged.
    pub fn select_tag(&mut self, value: &str) -> Result<bool, FilterError> {
        if !self.bindings.filters {
            return Ok(false);
        }
        if let Some(filters) = &self.filters {
            filters.validate(&TagSelection::parse(value))?;
        }
        if let Some(select) = self.tag_select.as_mut() {
            select.value = value.to_string();
        }
        self.apply_filters()?;
        Ok(true)
    }

    /// Search field input. Returns `false` when filters are not bound.
    pub fn input_search(&mut self, text: &str) -> bool {
        if !self.bindings.filters {
            return false;
        }
        if let Some(search) = self.search.as_mut() {
            search.value = text.to_string();
        }
        // The selector only ever holds validated values.
        self.apply_filters().is_ok()
    }

    /// Theme button click. Returns the new theme, or `None` when unbound.
    pub fn click_theme_button(
        &mut self,
        store: &mut dyn KeyValueStore,
    ) -> Result<Option<Theme>, StoreError> {
        if !self.bindings.theme_toggle {
            return Ok(None);
        }
        let next = self.current_theme().toggled();
        self.set_theme(store, next)?;
        Ok(Some(next))
    }

    /// Menu trigger click. Returns whether the panel is open afterwards.
    pub fn click_menu_button(&mut self) -> Option<bool> {
        if !self.bindings.menu {
            return None;
        }
        self.nav.as_mut().map(toggle_menu)
    }

    /// Navigation link click. Returns whether the panel collapsed.
    pub fn click_nav_link(&mut self, viewport_width: u32) -> bool {
        if !self.bindings.menu {
            return false;
        }
        self.nav
            .as_mut()
            .map(|nav| link_activated(nav, viewport_width))
            .unwrap_or(false)
    }

    /// Persists `theme`, reflects it on the root, and updates the label.
    pub fn set_theme(
        &mut self,
        store: &mut dyn KeyValueStore,
        theme: Theme,
    ) -> Result<(), StoreError> {
        self.root_attrs
            .insert(THEME_ATTR.to_string(), theme.as_str().to_string());
        save_theme(store, theme)?;
        if let Some(label) = self.theme_label.as_mut() {
            label.text = theme.label().to_string();
        }
        Ok(())
    }

    fn apply_filters(&mut self) -> Result<(), FilterError> {
        let state = self.filter_state();
        let Some(filters) = self.filters.as_mut() else {
            return Ok(());
        };
        let cards = filters.apply(state)?;
        if let Some(grid) = self.grid.as_mut() {
            grid.children = cards;
        }
        Ok(())
    }
}

pub fn setup_year(page: &mut Page, year: i32) {
    if let Some(slot) = page.year.as_mut() {
        slot.text = year.to_string();
    }
}

/// Applies the stored (or default) theme and binds the toggle button.
pub fn setup_theme(page: &mut Page, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    let theme = load_theme(store);
    page.set_theme(store, theme)?;
    page.bindings.theme_toggle = page.theme_button;
    Ok(())
}

pub fn setup_menu(page: &mut Page) {
    if !page.menu_button || page.nav.is_none() {
        return;
    }
    page.bindings.menu = true;
}

/// Populates the tag selector, binds the filter controls, and renders the
/// initial (unfiltered) grid.
pub fn setup_filters(
    page: &mut Page,
    catalog: Arc<Catalog>,
    policy: PlaceholderPolicy,
) -> Result<(), FilterError> {
    if page.tag_select.is_none() || page.search.is_none() || page.grid.is_none() {
        return Ok(());
    }
    let controller = FilterController::new(catalog, policy);
    if let Some(select) = page.tag_select.as_mut() {
        select.options = controller.tag_options();
        select.value = ALL_TAGS.to_string();
    }
    page.filters = Some(controller);
    page.bindings.filters = true;
    page.apply_filters()
}

/// Failure of one of the initialization steps.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("theme setup failed: {0}")]
    Theme(#[from] StoreError),
    #[error("filter setup failed: {0}")]
    Filters(#[from] FilterError),
}

/// The host's load hook: year, theme, menu, then filters.
pub fn initialize(page: &mut Page, ctx: PageContext<'_>) -> Result<(), InitError> {
    setup_year(page, ctx.year);
    setup_theme(page, ctx.store)?;
    setup_menu(page);
    setup_filters(page, ctx.catalog, ctx.policy)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectRecord;
    use crate::render::EMPTY_TITLE;
    use crate::theme::{MemoryStore, THEME_KEY};

    fn init(page: &mut Page, store: &mut MemoryStore) {
        initialize(
            page,
            PageContext {
                catalog: Arc::new(Catalog::builtin()),
                policy: PlaceholderPolicy::default(),
                store,
                year: 2026,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_full_page_initialization() {
        let mut store = MemoryStore::new();
        let mut page = Page::full(default_nav_links());
        init(&mut page, &mut store);

        assert_eq!(page.year.as_ref().unwrap().text, "2026");
        assert_eq!(page.current_theme(), Theme::Light);
        assert_eq!(page.root_attrs.get("data-theme").map(String::as_str), Some("light"));
        assert_eq!(page.theme_label.as_ref().unwrap().text, "Light");
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));

        let select = page.tag_select.as_ref().unwrap();
        assert_eq!(select.value, "all");
        assert_eq!(select.options.len(), 9);
        assert_eq!(page.rendered_titles().len(), 2);
        assert_eq!(
            page.bindings(),
            Bindings {
                theme_toggle: true,
                menu: true,
                filters: true
            }
        );
    }

    #[test]
    fn test_stored_theme_restored() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "dark").unwrap();
        let mut page = Page::full(default_nav_links());
        init(&mut page, &mut store);
        assert_eq!(page.current_theme(), Theme::Dark);
        assert_eq!(page.theme_label.as_ref().unwrap().text, "Dark");
    }

    #[test]
    fn test_theme_button_toggles_and_persists() {
        let mut store = MemoryStore::new();
        let mut page = Page::full(default_nav_links());
        init(&mut page, &mut store);

        assert_eq!(page.click_theme_button(&mut store).unwrap(), Some(Theme::Dark));
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(page.click_theme_button(&mut store).unwrap(), Some(Theme::Light));
        assert_eq!(page.theme_label.as_ref().unwrap().text, "Light");
    }

    #[test]
    fn test_bare_page_skips_every_step() {
        let mut store = MemoryStore::new();
        let mut page = Page::bare();
        init(&mut page, &mut store);

        assert_eq!(page.bindings(), Bindings::default());
        assert!(page.filters().is_none());
        assert_eq!(page.select_tag("Python"), Ok(false));
        assert!(!page.input_search("x"));
        assert_eq!(page.click_menu_button(), None);
        assert!(!page.click_nav_link(320));
        assert_eq!(page.click_theme_button(&mut store).unwrap(), None);
        // Theme still lands on the root.
        assert_eq!(page.current_theme(), Theme::Light);
    }

    #[test]
    fn test_missing_grid_skips_filters_only() {
        let mut store = MemoryStore::new();
        let mut page = Page::full(default_nav_links());
        page.grid = None;
        init(&mut page, &mut store);
        assert!(!page.bindings().filters);
        assert!(page.bindings().menu);
        assert!(page.tag_select.as_ref().unwrap().options.is_empty());
    }

    #[test]
    fn test_filter_events_rerender_grid() {
        let mut store = MemoryStore::new();
        let mut page = Page::full(default_nav_links());
        init(&mut page, &mut store);

        assert_eq!(page.select_tag("Computer Vision"), Ok(true));
        assert_eq!(
            page.rendered_titles(),
            vec!["Skin Lesion Classification and Segmentation"]
        );

        assert!(page.input_search("diabetes"));
        assert_eq!(page.rendered_titles(), vec![EMPTY_TITLE]);

        assert_eq!(page.select_tag("all"), Ok(true));
        assert_eq!(
            page.rendered_titles(),
            vec!["Diabetes Risk Classification Using ML Algorithms"]
        );
        assert_eq!(
            page.filter_state(),
            FilterState::new(TagSelection::All, "diabetes")
        );
    }

    #[test]
    fn test_unknown_tag_keeps_grid() {
        let mut store = MemoryStore::new();
        let mut page = Page::full(default_nav_links());
        init(&mut page, &mut store);
        let before = page.grid.clone();
        assert!(page.select_tag("Rust").is_err());
        assert_eq!(page.grid, before);
        assert_eq!(page.tag_select.as_ref().unwrap().value, "all");
    }

    #[test]
    fn test_setup_filters_applies_prefilled_search() {
        let mut page = Page::full(default_nav_links());
        page.search.as_mut().unwrap().value = "diabetes".to_string();
        setup_filters(&mut page, Arc::new(Catalog::builtin()), PlaceholderPolicy::default())
            .unwrap();
        assert!(page.bindings().filters);
        assert_eq!(
            page.rendered_titles(),
            vec!["Diabetes Risk Classification Using ML Algorithms"]
        );
    }

    #[test]
    fn test_menu_events() {
        let mut store = MemoryStore::new();
        let mut page = Page::full(default_nav_links());
        init(&mut page, &mut store);
        assert_eq!(page.click_menu_button(), Some(true));
        assert!(!page.click_nav_link(1280));
        assert!(page.nav.as_ref().unwrap().is_open());
        assert!(page.click_nav_link(375));
        assert!(!page.nav.as_ref().unwrap().is_open());
    }

    #[test]
    fn test_placeholder_link_on_page() {
        let catalog = Catalog::new(vec![ProjectRecord::new("Template", "")
            .with_github("https://github.com/your-username/template")])
        .unwrap();
        let mut store = MemoryStore::new();
        let mut page = Page::full(Vec::new());
        initialize(
            &mut page,
            PageContext {
                catalog: Arc::new(catalog),
                policy: PlaceholderPolicy::default(),
                store: &mut store,
                year: 2026,
            },
        )
        .unwrap();
        let grid = page.grid.as_ref().unwrap();
        let link = grid.children[0].find(&|e: &Element| e.tag == "a").unwrap();
        assert_eq!(link.get_attr("href"), Some("#"));
        assert_eq!(link.text_content(), "GitHub (Add link)");
    }
}
