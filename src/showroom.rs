use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use crate::binder::{MarkupTrust, ProductQuery, ProductView, RenderReport, fetch_product};
use crate::dom::Document;
use crate::error::FetchError;
use crate::fragments::{FooterWidgets, FragmentKind, FragmentLoader, FragmentOutcome, HeaderWidgets};
use crate::traits::AssetSource;

/// How the product part of a page load ended
#[derive(Debug)]
pub enum ProductLoad {
    /// No `product` parameter; the page stays a placeholder.
    NoProduct,
    /// Fetch or parse failed; the page stays a placeholder.
    Failed(FetchError),
    Rendered(RenderReport),
}

/// One loaded product page
#[derive(Debug)]
pub struct ProductPage {
    pub view: ProductView,
    pub product: ProductLoad,
    pub header: FragmentOutcome,
    pub footer: FragmentOutcome,
    pub header_widgets: HeaderWidgets,
    pub footer_widgets: FooterWidgets,
}

impl ProductPage {
    pub fn to_html(&self) -> String {
        self.view.document().to_html()
    }
}

#[derive(Clone)]
pub struct Showroom {
    source: Arc<dyn AssetSource>,
    fragments: FragmentLoader,
    template: String,
    trust: MarkupTrust,
}

impl Showroom {
    pub fn new(source: Arc<dyn AssetSource>, template: impl Into<String>, trust: MarkupTrust) -> Self {
        Self {
            fragments: FragmentLoader::new(source.clone()),
            source,
            template: template.into(),
            trust,
        }
    }

    /// Builds the product page for a raw query string. Only a missing
    /// skeleton is an error; product and fragment failures leave the
    /// corresponding placeholders in place.
    pub async fn open(&self, query: &str) -> Result<ProductPage> {
        let skeleton = self.source.fetch_text(&self.template).await?;
        let mut document = Document::parse(&skeleton);

        let header = self.fragments.load(&mut document, FragmentKind::Header).await;
        let footer = self.fragments.load(&mut document, FragmentKind::Footer).await;
        let header_widgets = HeaderWidgets::bind(&document);
        let footer_widgets = FooterWidgets::bind(&mut document);

        let query = ProductQuery::parse(query);
        let mut view = ProductView::new(document, self.trust);

        let product = match query.product.as_deref() {
            None => ProductLoad::NoProduct,
            Some(id) => match fetch_product(self.source.as_ref(), id).await {
                Ok(description) => {
                    let report = view.render(&description, query.variant.as_deref()).clone();
                    ProductLoad::Rendered(report)
                }
                Err(e) => {
                    error!("Error loading product data for {}: {}", id, e);
                    ProductLoad::Failed(e)
                }
            },
        };

        if let ProductLoad::Rendered(report) = &product {
            let rendered = report
                .iter()
                .filter(|(region, _)| report.is_rendered(*region))
                .count();
            info!("Product page ready with {} rendered regions", rendered);
        }

        Ok(ProductPage {
            view,
            product,
            header,
            footer,
            header_widgets,
            footer_widgets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{PRODUCT_TITLE, Region};
    use crate::fragments::Location;
    use crate::sources::LocalAssetSource;

    const SKELETON: &str = r#"<html><head><title>Products</title></head><body>
        <div id="header-container"></div>
        <h1 id="product-title">Product name</h1>
        <ul id="variants-list"></ul>
    </body></html>"#;

    fn site() -> (tempfile::TempDir, Showroom) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("product.html"), SKELETON).unwrap();
        let products = dir.path().join("assets/data/products");
        std::fs::create_dir_all(&products).unwrap();
        std::fs::write(
            products.join("valve-7.json"),
            r#"{"title": "Valve 7", "variants": [{"id": "v1", "name": "V1"}]}"#,
        )
        .unwrap();
        std::fs::write(products.join("broken.json"), "{ not json").unwrap();

        let source = Arc::new(LocalAssetSource::new(dir.path()));
        (dir, Showroom::new(source, "product.html", MarkupTrust::Trusted))
    }

    #[tokio::test]
    async fn renders_requested_product() {
        let (_dir, showroom) = site();
        let page = showroom.open("?product=valve-7").await.unwrap();

        let ProductLoad::Rendered(report) = &page.product else {
            panic!("expected a rendered page, got {:?}", page.product);
        };
        assert!(report.is_rendered(Region::VariantList));
        assert_eq!(page.view.document().title(), "Valve 7");
        assert!(matches!(page.header, FragmentOutcome::Placeholder(_)));
        assert!(matches!(page.footer, FragmentOutcome::NoContainer));
    }

    #[tokio::test]
    async fn no_product_parameter_keeps_placeholder() {
        let (_dir, showroom) = site();
        let page = showroom.open("").await.unwrap();
        assert!(matches!(page.product, ProductLoad::NoProduct));
        assert_eq!(
            page.view.document().get(PRODUCT_TITLE).unwrap().text_content(),
            "Product name"
        );
    }

    #[tokio::test]
    async fn fetch_failures_keep_placeholder() {
        let (_dir, showroom) = site();

        let page = showroom.open("product=missing").await.unwrap();
        assert!(matches!(page.product, ProductLoad::Failed(ref e) if e.is_not_found()));
        assert_eq!(page.view.document().title(), "Products");

        let page = showroom.open("product=broken").await.unwrap();
        assert!(matches!(page.product, ProductLoad::Failed(FetchError::Parse { .. })));
        assert_eq!(
            page.view.document().get(PRODUCT_TITLE).unwrap().text_content(),
            "Product name"
        );
    }

    #[tokio::test]
    async fn footer_is_served_in_its_initial_state() {
        let (dir, _) = site();
        std::fs::write(
            dir.path().join("product.html"),
            r#"<html><body><div id="footer-container"></div></body></html>"#,
        )
        .unwrap();
        let templates = dir.path().join("assets/Templates");
        std::fs::create_dir_all(&templates).unwrap();
        std::fs::write(
            templates.join("footer-template.html"),
            r#"<footer>
              <div class="footer-col" style="display: none"></div>
              <button id="tab-plant">Plant</button><button id="tab-office">Office</button>
              <div id="panel-plant"></div><div id="panel-office"></div>
              <button class="scroll-top-btn">Top</button>
              <button id="brochureDropdownBtn">Brochures</button>
              <div id="brochureDropdown"></div>
            </footer>"#,
        )
        .unwrap();

        let showroom = Showroom::new(
            Arc::new(LocalAssetSource::new(dir.path())),
            "product.html",
            MarkupTrust::Trusted,
        );
        let page = showroom.open("").await.unwrap();
        assert!(matches!(page.footer, FragmentOutcome::Injected));
        assert_eq!(page.footer_widgets.location(), Some(Location::Office));
        assert!(!page.footer_widgets.is_dropdown_open());

        let doc = Document::parse(&page.to_html());
        assert_eq!(doc.get("tab-office").unwrap().attr("aria-selected"), Some("true"));
        assert!(doc.get("panel-plant").unwrap().is_hidden());
        assert!(!doc.get("panel-office").unwrap().is_hidden());
        assert_eq!(
            doc.get("brochureDropdownBtn").unwrap().attr("aria-expanded"),
            Some("false")
        );
        assert!(doc.get("brochureDropdown").unwrap().is_hidden());
        let hidden_buttons = doc.elements_with_class("scroll-top-btn");
        assert!(hidden_buttons.iter().all(|button| button.is_hidden()));
        let columns = doc.elements_with_class("footer-col");
        assert!(columns.iter().all(|column| column.style("display") == Some("flex")));
    }

    #[tokio::test]
    async fn missing_skeleton_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let showroom = Showroom::new(
            Arc::new(LocalAssetSource::new(dir.path())),
            "product.html",
            MarkupTrust::Trusted,
        );
        assert!(showroom.open("product=x").await.is_err());
    }
}
