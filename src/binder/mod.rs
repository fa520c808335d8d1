//! # Product View Binder
//!
//! Projects a [`ProductDescription`] into the product page skeleton and keeps
//! the page's interactive regions consistent afterwards.
//!
//! ## Regions
//!
//! Each region of the skeleton is optional. Rendering a region whose
//! container is absent is skipped and reported as
//! [`RegionOutcome::Missing`], so a page without, say, a certifications
//! section still renders everything else.
//!
//! ## Interaction
//!
//! The carousel and the specification tabs are owned state values
//! ([`Carousel`], [`TabGroup`]). Clicks are routed through an id → [`Action`]
//! registry that is rebuilt from scratch on every render, so re-rendering
//! never stacks handlers. A sidebar variant row and its tab button trigger the
//! same tab transition.
//!
//! Every binding is also written onto its element as `data-*` attributes
//! (`data-action`, plus `data-tab`, `data-href` and `data-target` where they
//! apply), so the served page carries the same wiring as the in-process view.

pub mod carousel;
pub mod query;
pub mod regions;
pub mod tabs;

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::dom::{Document, escape_text};
use crate::error::FetchError;
use crate::models::ProductDescription;
use crate::traits::AssetSource;

pub use carousel::{Carousel, Slot};
pub use query::{ProductQuery, resolve_product_id};
pub use tabs::TabGroup;

pub const PRODUCT_TITLE: &str = "product-title";
pub const PRODUCT_BRAND: &str = "product-brand";
pub const BREADCRUMB: &str = "breadcrumb-product-name";
pub const OVERVIEW: &str = "product-overview";
pub const IMAGE_FIRST: &str = "carousel-image";
pub const IMAGE_SECOND: &str = "carousel-image-2";
pub const PREV_BUTTON: &str = "prev-btn";
pub const NEXT_BUTTON: &str = "next-btn";
pub const VARIANTS_LIST: &str = "variants-list";
pub const TABS_NAV: &str = "spec-tabs-nav";
pub const TABS_CONTENT: &str = "spec-tabs-content";
pub const SPEC_SECTION: &str = "product-specifications";
pub const FEATURES_LIST: &str = "features-list";
pub const APPLICATIONS_GRID: &str = "applications-grid";
pub const BROCHURE_PRODUCT: &str = "download-brochure-product";
pub const BROCHURE_COMPANY: &str = "download-brochure-company";
pub const CERTIFICATIONS_LIST: &str = "certifications-list";

/// Site-relative path of a product's JSON description
pub fn product_resource(id: &str) -> String {
    format!("assets/data/products/{}.json", urlencoding::encode(id))
}

/// Fetches and parses one product description. No retry.
pub async fn fetch_product(
    source: &dyn AssetSource,
    id: &str,
) -> Result<ProductDescription, FetchError> {
    let resource = product_resource(id);
    info!("Loading product {} from {}", id, source.name());
    let body = source.fetch_text(&resource).await?;
    ProductDescription::from_json(&resource, &body)
}

/// Whether the overview field may be injected as markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkupTrust {
    /// The data source is the trust boundary; inject as-is.
    #[default]
    Trusted,
    /// Inject the overview as escaped text.
    Untrusted,
}

/// A named part of the product page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Region {
    Title,
    Brand,
    Overview,
    Gallery,
    VariantList,
    SpecTabs,
    Features,
    Applications,
    Brochures,
    Certifications,
}

/// What happened to a region during render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionOutcome {
    Rendered,
    /// The description has nothing for this region; the placeholder stays.
    NoData,
    /// These expected elements were absent; whatever could be bound was bound.
    Missing(Vec<&'static str>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    outcomes: BTreeMap<Region, RegionOutcome>,
}

impl RenderReport {
    pub fn outcome(&self, region: Region) -> Option<&RegionOutcome> {
        self.outcomes.get(&region)
    }

    pub fn is_rendered(&self, region: Region) -> bool {
        self.outcome(region) == Some(&RegionOutcome::Rendered)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, &RegionOutcome)> {
        self.outcomes.iter().map(|(region, outcome)| (*region, outcome))
    }

    fn record(&mut self, region: Region, missing: Vec<&'static str>) {
        let outcome = if missing.is_empty() {
            RegionOutcome::Rendered
        } else {
            RegionOutcome::Missing(missing)
        };
        self.outcomes.insert(region, outcome);
    }

    fn no_data(&mut self, region: Region) {
        self.outcomes.insert(region, RegionOutcome::NoData);
    }
}

/// Behaviour bound to a clickable element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CarouselPrev,
    CarouselNext,
    ActivateTab(usize),
    SelectVariant(usize),
    OpenUrl(String),
}

/// Attributes a binding may write onto its element
const BINDING_ATTRS: &[&str] = &[
    "data-action",
    "data-tab",
    "data-scroll-target",
    "data-href",
    "data-target",
];

impl Action {
    /// The `data-*` attributes that carry this binding into the markup
    fn attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            Action::CarouselPrev => vec![("data-action", "carousel-prev".to_string())],
            Action::CarouselNext => vec![("data-action", "carousel-next".to_string())],
            Action::ActivateTab(index) => vec![
                ("data-action", "activate-tab".to_string()),
                ("data-tab", tabs::panel_id(*index)),
            ],
            Action::SelectVariant(index) => vec![
                ("data-action", "select-variant".to_string()),
                ("data-tab", tabs::panel_id(*index)),
                ("data-scroll-target", SPEC_SECTION.to_string()),
            ],
            Action::OpenUrl(url) => vec![
                ("data-action", "open-url".to_string()),
                ("data-href", url.clone()),
                ("data-target", "_blank".to_string()),
            ],
        }
    }
}

/// Side effect a click asks the hosting browsing context to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenUrl { url: String, target: &'static str },
    ScrollIntoView(&'static str),
    ScrollToTop,
}

/// A product page document together with its interactive state
#[derive(Debug, Clone)]
pub struct ProductView {
    document: Document,
    trust: MarkupTrust,
    carousel: Option<Carousel>,
    tabs: Option<TabGroup>,
    handlers: BTreeMap<String, Action>,
    report: RenderReport,
}

impl ProductView {
    pub fn new(document: Document, trust: MarkupTrust) -> Self {
        Self {
            document,
            trust,
            carousel: None,
            tabs: None,
            handlers: BTreeMap::new(),
            report: RenderReport::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn report(&self) -> &RenderReport {
        &self.report
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn tabs(&self) -> Option<&TabGroup> {
        self.tabs.as_ref()
    }

    pub fn handler(&self, id: &str) -> Option<&Action> {
        self.handlers.get(id)
    }

    /// Projects `product` into the document. Steps run in a fixed order since
    /// the later ones bind elements created by the earlier ones.
    ///
    /// `selected_variant` is accepted but does not change the initial tab.
    pub fn render(
        &mut self,
        product: &ProductDescription,
        selected_variant: Option<&str>,
    ) -> &RenderReport {
        if let Some(variant) = selected_variant {
            debug!("Variant {} requested; initial tab stays on the first variant", variant);
        }

        self.unbind_all();
        self.carousel = None;
        self.tabs = None;
        self.report = RenderReport::default();

        self.render_title(product);
        self.render_brand(product);
        self.render_overview(product);
        self.render_gallery(product);
        self.render_variant_list(product);
        self.render_spec_tabs(product);
        self.link_variants_to_tabs(product);
        self.render_features(product);
        self.render_applications(product);
        self.render_brochures(product);
        self.render_certifications(product);

        info!(
            "Rendered product {} ({} variants, {} images)",
            product.title,
            product.variants.len(),
            product.gallery.len()
        );
        &self.report
    }

    /// Runs the behaviour bound to `id`, if any.
    pub fn click(&mut self, id: &str) -> Option<Effect> {
        let action = self.handlers.get(id)?.clone();
        match action {
            Action::CarouselPrev => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.prev();
                }
                self.apply_carousel();
                None
            }
            Action::CarouselNext => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.next();
                }
                self.apply_carousel();
                None
            }
            Action::ActivateTab(index) => {
                self.activate_tab(index);
                None
            }
            Action::SelectVariant(index) => {
                self.activate_tab(index);
                self.document
                    .contains(SPEC_SECTION)
                    .then_some(Effect::ScrollIntoView(SPEC_SECTION))
            }
            Action::OpenUrl(url) => Some(Effect::OpenUrl {
                url,
                target: "_blank",
            }),
        }
    }

    /// Registers `action` for `id` and mirrors it onto the element.
    fn bind(&mut self, id: String, action: Action) {
        if let Some(element) = self.document.get_mut(&id) {
            for (name, value) in action.attributes() {
                element.set_attr(name, value);
            }
        }
        self.handlers.insert(id, action);
    }

    fn unbind_all(&mut self) {
        for id in self.handlers.keys() {
            if let Some(element) = self.document.get_mut(id) {
                for name in BINDING_ATTRS {
                    element.remove_attr(name);
                }
            }
        }
        self.handlers.clear();
    }

    fn missing(&self, ids: &[&'static str]) -> Vec<&'static str> {
        ids.iter()
            .copied()
            .filter(|id| !self.document.contains(id))
            .collect()
    }

    fn render_title(&mut self, product: &ProductDescription) {
        self.document.set_title(&product.title);
        for id in [PRODUCT_TITLE, BREADCRUMB] {
            if let Some(element) = self.document.get_mut(id) {
                element.set_text(product.title.as_str());
            }
        }
        let missing = self.missing(&[PRODUCT_TITLE, BREADCRUMB]);
        self.report.record(Region::Title, missing);
    }

    fn render_brand(&mut self, product: &ProductDescription) {
        let Some(element) = self.document.get_mut(PRODUCT_BRAND) else {
            self.report.record(Region::Brand, vec![PRODUCT_BRAND]);
            return;
        };
        match product.display_brand() {
            Some(brand) => {
                element.set_text(brand);
                element.set_style("display", "block");
            }
            None => element.set_style("display", "none"),
        }
        self.report.record(Region::Brand, Vec::new());
    }

    fn render_overview(&mut self, product: &ProductDescription) {
        let Some(overview) = product.overview.as_deref().filter(|o| !o.is_empty()) else {
            self.report.no_data(Region::Overview);
            return;
        };
        let Some(element) = self.document.get_mut(OVERVIEW) else {
            self.report.record(Region::Overview, vec![OVERVIEW]);
            return;
        };
        match self.trust {
            MarkupTrust::Trusted => element.set_markup(overview),
            MarkupTrust::Untrusted => element.set_markup(escape_text(overview)),
        }
        self.report.record(Region::Overview, Vec::new());
    }

    fn render_gallery(&mut self, product: &ProductDescription) {
        let Some(first) = product.gallery.first() else {
            self.report.no_data(Region::Gallery);
            return;
        };

        if let Some(image) = self.document.get_mut(IMAGE_FIRST) {
            image.set_attr("src", first.url.as_str());
            image.set_attr("alt", first.alt.as_str());
        }
        if let Some(image) = self.document.get_mut(IMAGE_SECOND) {
            match product.gallery.get(1) {
                Some(second) => {
                    image.set_attr("src", second.url.as_str());
                    image.set_attr("alt", second.alt.as_str());
                    image.set_style("opacity", "0");
                    image.remove_style("display");
                }
                None => image.set_style("display", "none"),
            }
        }

        self.carousel = Carousel::new(product.gallery.len());
        if self.document.contains(PREV_BUTTON) && self.document.contains(NEXT_BUTTON) {
            self.bind(PREV_BUTTON.to_string(), Action::CarouselPrev);
            self.bind(NEXT_BUTTON.to_string(), Action::CarouselNext);
        }
        self.apply_carousel();

        let missing = self.missing(&[IMAGE_FIRST, IMAGE_SECOND, PREV_BUTTON, NEXT_BUTTON]);
        self.report.record(Region::Gallery, missing);
    }

    /// Makes exactly one slot opaque according to the carousel index.
    fn apply_carousel(&mut self) {
        let Some(carousel) = self.carousel else {
            return;
        };
        let (first, second) = match carousel.visible_slot() {
            Slot::First => ("1", "0"),
            Slot::Second => ("0", "1"),
        };
        if let Some(image) = self.document.get_mut(IMAGE_FIRST) {
            image.set_style("opacity", first);
        }
        if let Some(image) = self.document.get_mut(IMAGE_SECOND) {
            image.set_style("opacity", second);
        }
    }

    fn render_variant_list(&mut self, product: &ProductDescription) {
        if product.variants.is_empty() {
            self.report.no_data(Region::VariantList);
            return;
        }
        let Some(list) = self.document.get_mut(VARIANTS_LIST) else {
            self.report.record(Region::VariantList, vec![VARIANTS_LIST]);
            return;
        };
        list.clear_children();
        for (index, variant) in product.variants.iter().enumerate() {
            list.append(regions::variant_row(variant, index));
        }
        self.report.record(Region::VariantList, Vec::new());
    }

    fn render_spec_tabs(&mut self, product: &ProductDescription) {
        if product.variants.is_empty() {
            self.report.no_data(Region::SpecTabs);
            return;
        }
        let missing = self.missing(&[TABS_NAV, TABS_CONTENT]);
        if !missing.is_empty() {
            self.report.record(Region::SpecTabs, missing);
            return;
        }

        if let Some(nav) = self.document.get_mut(TABS_NAV) {
            nav.clear_children();
            for (index, variant) in product.variants.iter().enumerate() {
                nav.append(regions::tab_button(variant, index));
            }
        }
        if let Some(content) = self.document.get_mut(TABS_CONTENT) {
            content.clear_children();
            for (index, variant) in product.variants.iter().enumerate() {
                content.append(regions::spec_table(variant, index));
            }
        }

        self.tabs = TabGroup::new(product.variants.len());
        for index in 0..product.variants.len() {
            self.bind(tabs::button_id(index), Action::ActivateTab(index));
        }
        self.apply_tabs();
        self.report.record(Region::SpecTabs, Vec::new());
    }

    fn link_variants_to_tabs(&mut self, product: &ProductDescription) {
        if self.tabs.is_none() {
            return;
        }
        for (index, variant) in product.variants.iter().enumerate() {
            let id = regions::variant_button_id(variant);
            if self.document.contains(&id) {
                self.bind(id, Action::SelectVariant(index));
            }
        }
    }

    fn activate_tab(&mut self, index: usize) {
        if let Some(tabs) = self.tabs.as_mut() {
            tabs.activate(index);
        }
        self.apply_tabs();
    }

    /// Marks the active tab current and shows only its table.
    fn apply_tabs(&mut self) {
        let Some(group) = self.tabs else {
            return;
        };
        for index in 0..group.len() {
            let active = group.is_active(index);
            if let Some(button) = self.document.get_mut(&tabs::button_id(index)) {
                if active {
                    for class in regions::TAB_ACTIVE_CLASSES {
                        button.add_class(class);
                    }
                    button.remove_class(regions::TAB_INACTIVE_CLASS);
                    button.set_attr("aria-current", "true");
                } else {
                    for class in regions::TAB_ACTIVE_CLASSES {
                        button.remove_class(class);
                    }
                    button.add_class(regions::TAB_INACTIVE_CLASS);
                    button.remove_attr("aria-current");
                }
            }
            if let Some(table) = self.document.get_mut(&tabs::panel_id(index)) {
                if active {
                    table.remove_class("hidden");
                } else {
                    table.add_class("hidden");
                }
            }
        }
    }

    fn render_features(&mut self, product: &ProductDescription) {
        if product.features.is_empty() {
            self.report.no_data(Region::Features);
            return;
        }
        let Some(list) = self.document.get_mut(FEATURES_LIST) else {
            self.report.record(Region::Features, vec![FEATURES_LIST]);
            return;
        };
        list.clear_children();
        for feature in &product.features {
            list.append(regions::feature_item(feature));
        }
        self.report.record(Region::Features, Vec::new());
    }

    fn render_applications(&mut self, product: &ProductDescription) {
        if product.applications.is_empty() {
            self.report.no_data(Region::Applications);
            return;
        }
        let Some(grid) = self.document.get_mut(APPLICATIONS_GRID) else {
            self.report.record(Region::Applications, vec![APPLICATIONS_GRID]);
            return;
        };
        grid.clear_children();
        for application in &product.applications {
            grid.append(regions::application_card(application));
        }
        self.report.record(Region::Applications, Vec::new());
    }

    fn render_brochures(&mut self, product: &ProductDescription) {
        let brochures = [
            (BROCHURE_PRODUCT, product.brochures.product.as_deref()),
            (BROCHURE_COMPANY, product.brochures.company.as_deref()),
        ];
        if brochures.iter().all(|(_, url)| url.is_none()) {
            self.report.no_data(Region::Brochures);
            return;
        }

        let mut missing = Vec::new();
        for (id, url) in brochures {
            let Some(url) = url else { continue };
            if self.document.contains(id) {
                self.bind(id.to_string(), Action::OpenUrl(url.to_string()));
            } else {
                missing.push(id);
            }
        }
        self.report.record(Region::Brochures, missing);
    }

    fn render_certifications(&mut self, product: &ProductDescription) {
        if product.certifications.is_empty() {
            self.report.no_data(Region::Certifications);
            return;
        }
        let Some(list) = self.document.get_mut(CERTIFICATIONS_LIST) else {
            self.report.record(Region::Certifications, vec![CERTIFICATIONS_LIST]);
            return;
        };
        list.clear_children();
        for certification in &product.certifications {
            list.append(regions::certification_row(certification));
        }
        self.report.record(Region::Certifications, Vec::new());
    }
}
