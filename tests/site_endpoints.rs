use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use product_showroom::binder::MarkupTrust;
use product_showroom::dom::Document;
use product_showroom::models::MailMessage;
use product_showroom::relay::ContactRelay;
use product_showroom::sources::LocalAssetSource;
use product_showroom::traits::MailTransport;
use product_showroom::{AppState, RelayError, Showroom, build_router};
use serde_json::Value;
use tempfile::TempDir;

const SKELETON: &str = r#"<!DOCTYPE html>
<html><head><title>Product</title></head><body>
<div id="header-container"></div>
<span id="breadcrumb-product-name">Product</span>
<h1 id="product-title">Loading product</h1>
<p id="product-brand">Brand</p>
<div id="product-overview"></div>
<img id="carousel-image" src="" alt=""><img id="carousel-image-2" src="" alt="">
<button id="prev-btn">Prev</button><button id="next-btn">Next</button>
<ul id="variants-list"></ul>
<section id="product-specifications"><div id="spec-tabs-nav"></div><div id="spec-tabs-content"></div></section>
<ul id="features-list"></ul>
<div id="applications-grid"></div>
<ul id="certifications-list"></ul>
<button id="download-brochure-product">Brochure</button>
<button id="download-brochure-company">Company</button>
<div id="footer-container"></div>
</body></html>"#;

const PUMP_42: &str = r#"{
  "title": "Pump 42",
  "brandName": "n/a",
  "overview": "<p>Self-priming <strong>monoblock</strong> pump.</p>",
  "gallery": [{"url": "img/pump-42.jpg", "alt": "Pump 42"}],
  "variants": [
    {"id": "p42-a", "name": "0.5 HP", "specifications": [
      {"parameter": "Power", "value": "0.37 kW"},
      {"parameter": "Head", "value": "18 m"},
      {"parameter": "Flow", "value": "2400 LPH"}
    ]},
    {"id": "p42-b", "name": "1 HP", "specifications": [
      {"parameter": "Power", "value": "0.75 kW"},
      {"parameter": "Head", "value": "24 m"},
      {"parameter": "Flow", "value": "3000 LPH"}
    ]}
  ],
  "features": ["Copper winding", "Thermal overload protection"],
  "brochures": {"company": "brochures/company.pdf"}
}"#;

#[derive(Default)]
struct Outbox {
    sent: Mutex<Vec<MailMessage>>,
}

#[async_trait]
impl MailTransport for Outbox {
    async fn send(&self, message: &MailMessage) -> Result<(), RelayError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

fn fixture_site() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("product.html"), SKELETON).expect("skeleton");
    let products = dir.path().join("assets/data/products");
    std::fs::create_dir_all(&products).expect("products dir");
    std::fs::write(products.join("pump-42.json"), PUMP_42).expect("product json");
    let templates = dir.path().join("assets/Templates");
    std::fs::create_dir_all(&templates).expect("templates dir");
    std::fs::write(
        templates.join("header-template.html"),
        r#"<header><a href="index.html">Home</a><button id="mobile-menu-button">Menu</button></header>"#,
    )
    .expect("header");
    dir
}

async fn start(site: &TempDir, outbox: Arc<Outbox>) -> SocketAddr {
    let showroom = Showroom::new(
        Arc::new(LocalAssetSource::new(site.path())),
        "product.html",
        MarkupTrust::Trusted,
    );
    let relay = ContactRelay::new(outbox, "sales@example.com", "index.html");
    let app = build_router(AppState { showroom, relay });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client")
}

#[tokio::test]
async fn product_page_is_bound_from_json() {
    let site = fixture_site();
    let addr = start(&site, Arc::new(Outbox::default())).await;

    let response = client()
        .get(format!("http://{addr}/product?product=pump-42&variant=p42-b"))
        .send()
        .await
        .expect("product page");
    assert_eq!(response.status().as_u16(), 200);
    let doc = Document::parse(&response.text().await.expect("body"));

    assert_eq!(doc.title(), "Pump 42");
    assert!(doc.get("product-brand").expect("brand").is_hidden());
    assert!(doc.contains("mobile-menu-button"));

    let rows = doc.get("variants-list").expect("variants").child_elements().count();
    assert_eq!(rows, 2);
    let tabs = doc.get("spec-tabs-nav").expect("tabs").child_elements().count();
    assert_eq!(tabs, 2);

    for (id, hidden) in [("tab1", false), ("tab2", true)] {
        let table = doc.get(id).expect("table");
        assert_eq!(table.is_hidden(), hidden, "{id}");
        let body_rows = table.find_tag("tbody").expect("tbody").child_elements().count();
        assert_eq!(body_rows, 3, "{id}");
    }
    assert_eq!(
        doc.get("tab1-btn").expect("tab button").attr("aria-current"),
        Some("true")
    );
    assert!(doc.get("carousel-image-2").expect("second slot").is_hidden());

    let company = doc.get("download-brochure-company").expect("company brochure");
    assert_eq!(company.attr("data-href"), Some("brochures/company.pdf"));
    assert_eq!(company.attr("data-target"), Some("_blank"));
    let product = doc.get("download-brochure-product").expect("product brochure");
    assert_eq!(product.attr("data-href"), None);

    let row = doc.get("variant-p42-b").expect("sidebar row");
    assert_eq!(row.attr("data-tab"), Some("tab2"));
    assert_eq!(
        doc.get("next-btn").expect("next button").attr("data-action"),
        Some("carousel-next")
    );
}

#[tokio::test]
async fn unknown_product_leaves_placeholder() {
    let site = fixture_site();
    let addr = start(&site, Arc::new(Outbox::default())).await;

    for query in ["?product=nope", ""] {
        let body = client()
            .get(format!("http://{addr}/product{query}"))
            .send()
            .await
            .expect("product page")
            .text()
            .await
            .expect("body");
        let doc = Document::parse(&body);
        assert_eq!(
            doc.get("product-title").expect("title").text_content(),
            "Loading product"
        );
    }
}

#[tokio::test]
async fn contact_form_redirects_with_status() {
    let site = fixture_site();
    let outbox = Arc::new(Outbox::default());
    let addr = start(&site, outbox.clone()).await;
    let url = format!("http://{addr}/submit_form");

    let response = client()
        .post(&url)
        .header("content-type", "application/x-www-form-urlencoded")
        .body("name=Asha&phone=98765&products%5B%5D=Monoblock+Pumps")
        .send()
        .await
        .expect("submit without email");
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(
        response.headers()["location"].to_str().unwrap(),
        "index.html?status=error#contact"
    );
    assert!(outbox.sent.lock().unwrap().is_empty());

    let response = client()
        .post(&url)
        .header("content-type", "application/x-www-form-urlencoded")
        .body("name=Asha&email=asha%40example.com&phone=98765&products%5B%5D=Monoblock+Pumps")
        .send()
        .await
        .expect("valid submit");
    assert_eq!(
        response.headers()["location"].to_str().unwrap(),
        "index.html?status=success#contact"
    );
    let sent = outbox.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Contact Form Submission from Asha");
}

#[tokio::test]
async fn contact_form_rejects_other_methods_with_json() {
    let site = fixture_site();
    let addr = start(&site, Arc::new(Outbox::default())).await;

    let response = client()
        .get(format!("http://{addr}/submit_form"))
        .send()
        .await
        .expect("get submit_form");
    assert_eq!(response.status().as_u16(), 405);
    let body: Value = response.json().await.expect("json status");
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["message"], "Invalid request method");
}
