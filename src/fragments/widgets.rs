//! Interactive widgets of the injected header and footer

use crate::binder::Effect;
use crate::dom::{Document, Element};

const MOBILE_MENU_BUTTON: &str = "mobile-menu-button";
const MOBILE_MENU: &str = "mobile-menu";
const PRODUCTS_TOGGLE: &str = "products-toggle";
const PRODUCTS_SUBMENU: &str = "products-submenu";
const PRODUCTS_CHEVRON: &str = "products-chevron";
const PRODUCTS_TRIGGER: &str = "products-trigger";
const PRODUCTS_OVERLAY: &str = "products-overlay";

const CATEGORY_TAB: &str = "category-tab";
const CATEGORY_CONTENT: &str = "category-content";
const CATEGORY_IDLE: &[&str] = &["bg-blue-50", "text-blue-800", "border-blue-200", "shadow-sm"];
const CATEGORY_SELECTED: &[&str] = &["bg-red-50", "text-red-700", "border-red-200"];

const HEADER_SCROLLED: &str = "header-scrolled";
const HEADER_SHADOW_OFFSET: f64 = 10.0;

const TAB_PLANT: &str = "tab-plant";
const TAB_OFFICE: &str = "tab-office";
const PANEL_PLANT: &str = "panel-plant";
const PANEL_OFFICE: &str = "panel-office";
const SCROLL_TOP_BUTTON: &str = "scroll-top-btn";
const SCROLL_TOP_OFFSET: f64 = 300.0;
const BROCHURE_BUTTON: &str = "brochureDropdownBtn";
const BROCHURE_DROPDOWN: &str = "brochureDropdown";

fn is_within(document: &Document, ancestor: &str, target: &str) -> bool {
    document
        .get(ancestor)
        .is_some_and(|element| element.find(target).is_some())
}

/// Mobile menu, products submenu, mega-menu categories and scroll shadow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderWidgets {
    mobile_menu: bool,
    products_submenu: bool,
    mega_menu: bool,
}

impl HeaderWidgets {
    /// Binds whichever widgets the injected header actually contains.
    pub fn bind(document: &Document) -> Self {
        let present = |ids: &[&str]| ids.iter().all(|id| document.contains(id));
        Self {
            mobile_menu: present(&[MOBILE_MENU_BUTTON, MOBILE_MENU]),
            products_submenu: present(&[PRODUCTS_TOGGLE, PRODUCTS_SUBMENU, PRODUCTS_CHEVRON]),
            mega_menu: present(&[PRODUCTS_TRIGGER, PRODUCTS_OVERLAY]),
        }
    }

    /// Handles a click on the element `target`. Clicks outside the mobile
    /// menu and its button close the menu.
    pub fn click(&self, document: &mut Document, target: &str) {
        if self.mobile_menu && target == MOBILE_MENU_BUTTON {
            if let Some(menu) = document.get_mut(MOBILE_MENU) {
                menu.toggle_class("hidden");
            }
            return;
        }

        if self.products_submenu && target == PRODUCTS_TOGGLE {
            let hidden = document
                .get_mut(PRODUCTS_SUBMENU)
                .map(|submenu| submenu.toggle_class("hidden"))
                .unwrap_or(true);
            if let Some(chevron) = document.get_mut(PRODUCTS_CHEVRON) {
                let rotation = if hidden { "rotate(0deg)" } else { "rotate(180deg)" };
                chevron.set_style("transform", rotation);
            }
        }

        if self.mobile_menu
            && !is_within(document, MOBILE_MENU, target)
            && !is_within(document, MOBILE_MENU_BUTTON, target)
        {
            if let Some(menu) = document.get_mut(MOBILE_MENU) {
                menu.add_class("hidden");
            }
        }
    }

    /// Switches the mega menu to `category`; returns false when the header
    /// has no mega menu.
    pub fn select_category(&self, document: &mut Document, category: &str) -> bool {
        if !self.mega_menu {
            return false;
        }

        document.for_each_with_class_mut(CATEGORY_TAB, |tab| {
            for class in CATEGORY_SELECTED {
                tab.remove_class(class);
            }
            for class in CATEGORY_IDLE {
                tab.remove_class(class);
            }
            let style = if tab.attr("data-category") == Some(category) {
                CATEGORY_SELECTED
            } else {
                CATEGORY_IDLE
            };
            for class in style {
                tab.add_class(class);
            }
            tab.add_class("shadow-sm");
        });
        document.for_each_with_class_mut(CATEGORY_CONTENT, |content| {
            content.add_class("hidden");
        });
        if let Some(content) = document.get_mut(&format!("{category}-content")) {
            content.remove_class("hidden");
        }
        true
    }

    pub fn on_scroll(&self, document: &mut Document, offset: f64) {
        if let Some(header) = document.first_tag_mut("header") {
            if offset > HEADER_SHADOW_OFFSET {
                header.add_class(HEADER_SCROLLED);
            } else {
                header.remove_class(HEADER_SCROLLED);
            }
        }
    }
}

/// Footer address tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Plant,
    Office,
}

impl Location {
    fn ids(self) -> (&'static str, &'static str) {
        match self {
            Self::Plant => (TAB_PLANT, PANEL_PLANT),
            Self::Office => (TAB_OFFICE, PANEL_OFFICE),
        }
    }

    fn other(self) -> Self {
        match self {
            Self::Plant => Self::Office,
            Self::Office => Self::Plant,
        }
    }
}

/// Plant/office tabs, scroll-to-top button and brochure dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterWidgets {
    location: Option<Location>,
    dropdown_open: bool,
    dropdown: bool,
}

impl FooterWidgets {
    /// Binds the footer and puts it in its initial state: office tab shown,
    /// columns visible, scroll button hidden, dropdown closed.
    pub fn bind(document: &mut Document) -> Self {
        let tabs_present = [TAB_PLANT, TAB_OFFICE, PANEL_PLANT, PANEL_OFFICE]
            .iter()
            .all(|id| document.contains(id));
        let dropdown = document.contains(BROCHURE_BUTTON) && document.contains(BROCHURE_DROPDOWN);

        for class in ["footer-col", "footer-list"] {
            document.for_each_with_class_mut(class, |element| {
                element.set_style("display", "flex");
                element.set_style("visibility", "visible");
                element.set_style("opacity", "1");
            });
        }

        let mut widgets = Self {
            location: None,
            dropdown_open: false,
            dropdown,
        };
        if tabs_present {
            widgets.activate(document, Location::Office);
        }
        widgets.on_scroll(document, 0.0);
        widgets.set_dropdown(document, false);
        widgets
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn activate(&mut self, document: &mut Document, location: Location) {
        let (tab, panel) = location.ids();
        let (other_tab, other_panel) = location.other().ids();
        if let Some(element) = document.get_mut(tab) {
            select_tab(element, true);
        }
        if let Some(element) = document.get_mut(other_tab) {
            select_tab(element, false);
        }
        if let Some(element) = document.get_mut(panel) {
            element.remove_attr("hidden");
        }
        if let Some(element) = document.get_mut(other_panel) {
            element.set_attr("hidden", "");
        }
        self.location = Some(location);
    }

    pub fn click(&mut self, document: &mut Document, target: &str) {
        if self.location.is_some() {
            match target {
                TAB_PLANT => self.activate(document, Location::Plant),
                TAB_OFFICE => self.activate(document, Location::Office),
                _ => {}
            }
        }

        if !self.dropdown {
            return;
        }
        if target == BROCHURE_BUTTON {
            let open = !self.dropdown_open;
            self.set_dropdown(document, open);
        } else if !is_within(document, BROCHURE_DROPDOWN, target) {
            self.set_dropdown(document, false);
        }
    }

    /// Enter and Space activate a focused location tab.
    pub fn key(&mut self, document: &mut Document, target: &str, key: &str) {
        if self.location.is_none() || !matches!(key, "Enter" | " " | "Spacebar") {
            return;
        }
        match target {
            TAB_PLANT => self.activate(document, Location::Plant),
            TAB_OFFICE => self.activate(document, Location::Office),
            _ => {}
        }
    }

    pub fn click_scroll_top(&self, document: &Document) -> Option<Effect> {
        (!document.elements_with_class(SCROLL_TOP_BUTTON).is_empty()).then_some(Effect::ScrollToTop)
    }

    pub fn on_scroll(&self, document: &mut Document, offset: f64) {
        let display = if offset > SCROLL_TOP_OFFSET { "flex" } else { "none" };
        document.for_each_with_class_mut(SCROLL_TOP_BUTTON, |button| {
            button.set_style("display", display);
        });
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    fn set_dropdown(&mut self, document: &mut Document, open: bool) {
        if !self.dropdown {
            return;
        }
        self.dropdown_open = open;
        if let Some(button) = document.get_mut(BROCHURE_BUTTON) {
            button.set_attr("aria-expanded", if open { "true" } else { "false" });
        }
        if let Some(dropdown) = document.get_mut(BROCHURE_DROPDOWN) {
            dropdown.set_style("display", if open { "block" } else { "none" });
        }
    }
}

fn select_tab(tab: &mut Element, selected: bool) {
    if selected {
        tab.add_class("active");
    } else {
        tab.remove_class("active");
    }
    tab.set_attr("aria-selected", if selected { "true" } else { "false" });
    tab.set_attr("tabindex", if selected { "0" } else { "-1" });
}
