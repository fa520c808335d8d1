//! Element builders for the generated parts of the product page
//!
//! Every data field is inserted as a text node or an attribute value, so the
//! serializer escapes it. Only the overview is ever injected as markup.

use crate::dom::Element;
use crate::models::{AppIcon, Application, Certification, Variant};

use super::tabs::{button_id, panel_id};

const ROW_BUTTON_CLASS: &str = "flex items-center gap-2 border border-[#d9d9d9] rounded-md px-3 py-3 w-full text-left hover:bg-[#f0f4f9]";
const ACCENT_EVEN: &str = "bg-[#b71c1c]";
const ACCENT_ODD: &str = "bg-[#144a75]";

pub const TAB_ACTIVE_CLASSES: &[&str] = &["border-b-2", "border-[#144a75]", "pb-1", "font-semibold"];
pub const TAB_INACTIVE_CLASS: &str = "opacity-60";

const TABLE_CLASS: &str = "min-w-[340px] w-full text-xs sm:text-sm border-collapse tab-content";
const CARD_CLASS: &str = "bg-white border border-[#e6e9f0] rounded-2xl p-6 sm:p-8 flex flex-col items-center text-center text-[#144a75] shadow hover:shadow-lg transition-all duration-300 hover:scale-105 cursor-pointer min-h-[180px] sm:min-h-[210px]";

/// Id of the sidebar button for a variant
pub fn variant_button_id(variant: &Variant) -> String {
    format!("variant-{}", variant.id)
}

/// Sidebar row; the accent colour alternates by position only.
pub fn variant_row(variant: &Variant, index: usize) -> Element {
    let accent = if index % 2 == 0 { ACCENT_EVEN } else { ACCENT_ODD };
    let dot = Element::new("span")
        .with_attr("aria-hidden", "true")
        .with_class("w-3 h-3 rounded-full inline-block flex-shrink-0")
        .with_class(accent);
    let button = Element::new("button")
        .with_id(variant_button_id(variant))
        .with_class(ROW_BUTTON_CLASS)
        .with_attr("type", "button")
        .with_child(dot)
        .with_text(variant.name.as_str());
    Element::new("li").with_child(button)
}

/// Tab strip button; its selected look is applied by the tab group.
pub fn tab_button(variant: &Variant, index: usize) -> Element {
    Element::new("button")
        .with_id(button_id(index))
        .with_class("tab-btn px-3 py-1")
        .with_attr("data-tab", panel_id(index))
        .with_attr("type", "button")
        .with_text(variant.name.as_str())
}

pub fn spec_table(variant: &Variant, index: usize) -> Element {
    let header_cell = |label: &str| {
        Element::new("th")
            .with_class("py-2 px-3 font-semibold uppercase w-1/2")
            .with_text(label)
    };
    let head = Element::new("thead").with_child(
        Element::new("tr")
            .with_class("bg-[#144a75] text-white text-left text-[11px] sm:text-xs")
            .with_child(header_cell("Parameter"))
            .with_child(header_cell("Specification")),
    );

    let body = variant.specifications.iter().fold(
        Element::new("tbody").with_class("text-[#0f3a5f]"),
        |body, spec| {
            body.with_child(
                Element::new("tr")
                    .with_class("border-b border-[#e6e9f0]")
                    .with_child(
                        Element::new("td")
                            .with_class("py-2 px-3")
                            .with_text(spec.parameter.as_str()),
                    )
                    .with_child(
                        Element::new("td")
                            .with_class("py-2 px-3")
                            .with_text(spec.value.as_str()),
                    ),
            )
        },
    );

    Element::new("table")
        .with_id(panel_id(index))
        .with_class(TABLE_CLASS)
        .with_child(head)
        .with_child(body)
}

pub fn feature_item(feature: &str) -> Element {
    Element::new("li").with_text(feature)
}

pub fn application_card(application: &Application) -> Element {
    let mut card = Element::new("div").with_class(CARD_CLASS);
    match application.icon() {
        Some(AppIcon::Image(url)) => card.append(
            Element::new("img")
                .with_attr("src", url)
                .with_attr("alt", application.title.as_str())
                .with_class("w-12 h-12 mb-3 sm:mb-4 object-contain"),
        ),
        Some(AppIcon::Glyph(class)) => card.append(
            Element::new("i")
                .with_attr("aria-hidden", "true")
                .with_class(class)
                .with_class("text-[#a9b9c9] text-3xl sm:text-4xl mb-3 sm:mb-4"),
        ),
        None => {}
    }
    card.with_child(
        Element::new("strong")
            .with_class("text-sm sm:text-base mb-2 font-bold")
            .with_text(application.title.as_str()),
    )
    .with_child(
        Element::new("p")
            .with_class("text-xs sm:text-sm leading-tight max-w-[220px]")
            .with_text(application.description.as_str()),
    )
}

pub fn certification_row(certification: &Certification) -> Element {
    let icon = Element::new("img")
        .with_attr("alt", format!("{} certification icon", certification.name))
        .with_class("w-4 h-4 object-contain")
        .with_attr("height", "16")
        .with_attr("width", "16")
        .with_attr("loading", "lazy")
        .with_attr("src", certification.icon_url.as_str());
    Element::new("li").with_child(
        Element::new("button")
            .with_class(ROW_BUTTON_CLASS)
            .with_attr("type", "button")
            .with_child(icon)
            .with_text(certification.name.as_str()),
    )
}
