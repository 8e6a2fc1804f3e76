//! Full-page rendering.
//!
//! Builds a headless [`Page`], runs the initialization hook against it,
//! replays the requested filter state as user input, and serializes the
//! result into a complete HTML document. Used by `folio render` and by the
//! `GET /` route of the HTTP server.
//!
//! The filter controls are wrapped in a `GET` form (`?tag=&q=`) so the
//! page filters without client-side script when served by `folio serve`.
//! The theme form posts back with the same query so a toggle keeps the
//! current filter. The menu trigger is the only piece bound by an inline
//! script.

use anyhow::Result;
use chrono::Datelike;
use std::path::Path;
use std::sync::Arc;

use portfolio_core::catalog::Catalog;
use portfolio_core::menu::menu_script;
use portfolio_core::models::FilterState;
use portfolio_core::page::{default_nav_links, initialize, Page, PageContext};
use portfolio_core::render::Element;
use portfolio_core::theme::{KeyValueStore, MemoryStore, THEME_KEY};

use crate::catalog::load_catalog;
use crate::config::Config;
use crate::prefs::JsonFileStore;

pub const STYLESHEET_HREF: &str = "assets/css/style.css";
pub const MENU_BUTTON_ID: &str = "menuBtn";
pub const NAV_ID: &str = "nav";

/// `?tag=&q=` for `state`, or an empty string when nothing is filtered.
pub fn filter_query(state: &FilterState) -> String {
    let mut params = Vec::new();
    if !state.selected_tag.is_all() {
        params.push(format!("tag={}", urlencoding::encode(state.selected_tag.as_str())));
    }
    if !state.search_text.is_empty() {
        params.push(format!("q={}", urlencoding::encode(&state.search_text)));
    }
    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Initializes a full page and applies `state` through the page's own
/// event handlers, exactly as a user would.
pub fn build_page(
    config: &Config,
    catalog: Arc<Catalog>,
    store: &mut dyn KeyValueStore,
    state: &FilterState,
    year: i32,
) -> Result<Page> {
    let mut page = Page::full(default_nav_links());
    initialize(
        &mut page,
        PageContext {
            catalog,
            policy: config.links.policy(),
            store,
            year,
        },
    )?;
    page.select_tag(state.selected_tag.as_str())?;
    page.input_search(&state.search_text);
    Ok(page)
}

fn header(config: &Config, page: &Page) -> Element {
    let mut header = Element::new("header").class("site-header").child(
        Element::new("a")
            .class("brand")
            .attr("href", "#")
            .text(&config.site.title),
    );

    if page.menu_button {
        header = header.child(
            Element::new("button")
                .attr("id", MENU_BUTTON_ID)
                .class("icon-btn")
                .attr("type", "button")
                .attr("aria-label", "Menu")
                .text("Menu"),
        );
    }

    if let Some(nav) = &page.nav {
        let mut el = Element::new("nav").attr("id", NAV_ID).class("nav");
        let style = nav.style_attr();
        if !style.is_empty() {
            el = el.attr("style", style);
        }
        header = header.child(el.children(
            nav.links
                .iter()
                .map(|l| Element::new("a").attr("href", &l.href).text(&l.label)),
        ));
    }

    if page.theme_button {
        let label = page
            .theme_label
            .as_ref()
            .map(|l| l.text.clone())
            .unwrap_or_default();
        header = header.child(
            Element::new("form")
                .attr("method", "post")
                .attr(
                    "action",
                    format!("/theme/toggle{}", filter_query(&page.filter_state())),
                )
                .child(
                    Element::new("button")
                        .attr("id", "themeBtn")
                        .class("icon-btn")
                        .attr("type", "submit")
                        .child(Element::new("span").attr("id", "themeBtnText").text(label)),
                ),
        );
    }

    header
}

fn filter_form(page: &Page) -> Option<Element> {
    let select = page.tag_select.as_ref()?;
    let search = page.search.as_ref()?;

    let options = select.options.iter().map(|o| {
        let opt = Element::new("option").attr("value", &o.value).text(&o.label);
        if o.value == select.value {
            opt.attr("selected", "selected")
        } else {
            opt
        }
    });

    Some(
        Element::new("form")
            .class("filters")
            .attr("method", "get")
            .attr("action", "/")
            .child(
                Element::new("select")
                    .attr("id", "tagFilter")
                    .attr("name", "tag")
                    .children(options),
            )
            .child(
                Element::new("input")
                    .attr("id", "projectSearch")
                    .attr("type", "search")
                    .attr("name", "q")
                    .attr("placeholder", "Search projects...")
                    .attr("value", &search.value),
            )
            .child(
                Element::new("button")
                    .class("small-btn")
                    .attr("type", "submit")
                    .text("Filter"),
            ),
    )
}

/// The `<html>` element for an initialized page.
pub fn document(config: &Config, page: &Page) -> Element {
    let mut html = Element::new("html").attr("lang", "en");
    for (name, value) in &page.root_attrs {
        html = html.attr(name, value);
    }

    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Element::new("title").text(&config.site.title))
        .child(
            Element::new("link")
                .attr("rel", "stylesheet")
                .attr("href", STYLESHEET_HREF),
        );

    let mut section = Element::new("section")
        .attr("id", "projects")
        .class("section")
        .child(Element::new("h2").text("Projects"));
    if let Some(tagline) = &config.site.tagline {
        section = section.child(Element::new("p").class("muted").text(tagline));
    }
    if let Some(form) = filter_form(page) {
        section = section.child(form);
    }
    if let Some(grid) = &page.grid {
        section = section.child(
            Element::new("div")
                .attr("id", "projectsGrid")
                .class("grid")
                .children(grid.children.iter().cloned()),
        );
    }

    let mut footer = Element::new("footer").class("site-footer").text("© ");
    if let Some(year) = &page.year {
        footer = footer.child(Element::new("span").attr("id", "year").text(&year.text));
    }
    if let Some(owner) = &config.site.owner {
        footer = footer.text(format!(" {}", owner));
    }

    let mut body = Element::new("body")
        .child(header(config, page))
        .child(Element::new("main").child(section))
        .child(footer);
    if page.menu_button && page.nav.is_some() {
        body = body.child(Element::new("script").raw(menu_script(MENU_BUTTON_ID, NAV_ID)));
    }

    html.child(head).child(body)
}

pub fn render_document(config: &Config, page: &Page) -> String {
    let mut out = String::from("<!DOCTYPE html>\n");
    document(config, page).write_html(&mut out);
    out.push('\n');
    out
}

/// Seeds a volatile store with the persisted theme so rendering never
/// writes the preference file.
pub fn snapshot_store(config: &Config) -> Result<MemoryStore> {
    let file = JsonFileStore::open(&config.theme.store_path)?;
    let mut store = MemoryStore::new();
    if let Some(theme) = file.get(THEME_KEY) {
        store.set(THEME_KEY, &theme)?;
    }
    Ok(store)
}

pub fn run_render(config: &Config, output: Option<&Path>, state: &FilterState) -> Result<()> {
    let catalog = Arc::new(load_catalog(config)?);
    let mut store = snapshot_store(config)?;
    let page = build_page(config, catalog, &mut store, state, current_year())?;
    let html = render_document(config, &page);

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &html)?;
            tracing::info!(
                path = %path.display(),
                cards = page.rendered_titles().len(),
                "rendered page"
            );
            eprintln!("Rendered {}", path.display());
        }
        None => {
            print!("{}", html);
        }
    }

    Ok(())
}
