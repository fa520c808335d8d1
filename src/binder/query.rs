//! Page query parameters consumed by the product page

use url::form_urlencoded;

/// The `product` and `variant` parameters of a product page address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub product: Option<String>,
    /// Accepted and threaded through rendering; does not pre-select yet.
    pub variant: Option<String>,
}

impl ProductQuery {
    /// Parses a raw query string, with or without its leading `?`.
    /// Empty values count as absent; the first occurrence of a key wins.
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            let slot = match &*key {
                "product" => &mut parsed.product,
                "variant" => &mut parsed.variant,
                _ => continue,
            };
            if slot.is_none() && !value.is_empty() {
                *slot = Some(value.into_owned());
            }
        }
        parsed
    }
}

/// The product identifier of a page query, if any.
pub fn resolve_product_id(query: &str) -> Option<String> {
    ProductQuery::parse(query).product
}
