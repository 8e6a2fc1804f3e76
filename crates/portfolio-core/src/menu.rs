//! Mobile navigation menu.
//!
//! The trigger toggles the navigation panel between hidden and an open,
//! floating column layout. Activating a link collapses the panel on small
//! screens only.

use std::collections::BTreeMap;

/// Viewports at or below this width (logical pixels) collapse the menu
/// after a link is activated.
pub const SMALL_SCREEN_MAX_WIDTH: u32 = 640;

/// Inline layout applied to the panel whenever the trigger is clicked.
const PANEL_LAYOUT: &[(&str, &str)] = &[
    ("flex-direction", "column"),
    ("gap", "12px"),
    ("position", "absolute"),
    ("right", "20px"),
    ("top", "64px"),
    ("padding", "14px"),
    ("background", "var(--panelSolid)"),
    ("border", "1px solid var(--border)"),
    ("border-radius", "14px"),
    ("box-shadow", "var(--shadow)"),
    ("backdrop-filter", "blur(12px)"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

impl NavLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// Navigation panel with its inline style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavPanel {
    pub links: Vec<NavLink>,
    pub style: BTreeMap<String, String>,
}

impl NavPanel {
    pub fn new(links: Vec<NavLink>) -> Self {
        Self {
            links,
            style: BTreeMap::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.style.get("display").map(String::as_str) == Some("flex")
    }

    /// Serialized inline style, empty when nothing has been applied.
    pub fn style_attr(&self) -> String {
        self.style
            .iter()
            .map(|(k, v)| format!("{}: {};", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn set_style(&mut self, name: &str, value: &str) {
        self.style.insert(name.to_string(), value.to_string());
    }
}

/// Trigger click: opens a closed (or never touched) panel and closes an
/// open one. Returns whether the panel is now open.
pub fn toggle_menu(nav: &mut NavPanel) -> bool {
    let open = !nav.is_open();
    nav.set_style("display", if open { "flex" } else { "none" });
    for (name, value) in PANEL_LAYOUT {
        nav.set_style(name, value);
    }
    open
}

/// Link activation: collapses the panel on small viewports. Returns whether
/// it collapsed.
pub fn link_activated(nav: &mut NavPanel, viewport_width: u32) -> bool {
    if viewport_width <= SMALL_SCREEN_MAX_WIDTH {
        nav.set_style("display", "none");
        true
    } else {
        false
    }
}

/// Browser-side counterpart of [`toggle_menu`] and [`link_activated`],
/// binding the trigger `trigger_id` to the panel `nav_id`.
pub fn menu_script(trigger_id: &str, nav_id: &str) -> String {
    let layout = PANEL_LAYOUT
        .iter()
        .map(|(name, value)| format!("nav.style.setProperty(\"{name}\", \"{value}\");"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "(function () {{\n\
         var btn = document.getElementById(\"{trigger_id}\");\n\
         var nav = document.getElementById(\"{nav_id}\");\n\
         if (!btn || !nav) return;\n\
         btn.addEventListener(\"click\", function () {{\n\
         var open = nav.style.display !== \"flex\";\n\
         nav.style.display = open ? \"flex\" : \"none\";\n\
         {layout}\n\
         }});\n\
         nav.querySelectorAll(\"a\").forEach(function (link) {{\n\
         link.addEventListener(\"click\", function () {{\n\
         if (window.innerWidth <= {SMALL_SCREEN_MAX_WIDTH}) nav.style.display = \"none\";\n\
         }});\n\
         }});\n\
         }})();"
    )
}
