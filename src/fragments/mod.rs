//! Shared header and footer fragments
//!
//! Fragments are fetched from the asset source and injected into their
//! container. The header container shows a loading placeholder first; when
//! a fragment cannot be fetched whatever the container holds at that point
//! is kept.

pub mod widgets;

use std::sync::Arc;

use tracing::{error, info};

use crate::dom::{Document, parse_fragment};
use crate::error::FetchError;
use crate::traits::AssetSource;

pub use widgets::{FooterWidgets, HeaderWidgets, Location};

const HEADER_PLACEHOLDER: &str = r#"<header class="bg-white shadow-sm sticky top-0 z-50" style="height: 80px;">
<nav class="w-full flex items-center justify-between px-4 xl:px-12 py-3" style="height: 80px;">
<a href="index.html" class="flex items-center"><span class="h-8 w-24 bg-gray-200 rounded"></span></a>
<div class="hidden md:flex items-center space-x-6"><div class="animate-pulse flex space-x-4">
<div class="h-4 bg-gray-200 rounded w-16"></div><div class="h-4 bg-gray-200 rounded w-20"></div>
<div class="h-4 bg-gray-200 rounded w-16"></div><div class="h-4 bg-gray-200 rounded w-24"></div>
</div></div>
<div class="md:hidden"><div class="animate-pulse h-6 bg-gray-200 rounded w-6"></div></div>
</nav></header>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Header,
    Footer,
}

impl FragmentKind {
    pub fn container_id(self) -> &'static str {
        match self {
            Self::Header => "header-container",
            Self::Footer => "footer-container",
        }
    }

    pub fn resource(self) -> &'static str {
        match self {
            Self::Header => "assets/Templates/header-template.html",
            Self::Footer => "assets/Templates/footer-template.html",
        }
    }

    fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::Header => Some(HEADER_PLACEHOLDER),
            Self::Footer => None,
        }
    }
}

#[derive(Debug)]
pub enum FragmentOutcome {
    Injected,
    /// The page has no container for this fragment.
    NoContainer,
    /// The fetch failed; the container keeps its placeholder.
    Placeholder(FetchError),
}

/// Loads header/footer fragments into a page document
#[derive(Clone)]
pub struct FragmentLoader {
    source: Arc<dyn AssetSource>,
}

impl FragmentLoader {
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        Self { source }
    }

    pub async fn load(&self, document: &mut Document, kind: FragmentKind) -> FragmentOutcome {
        let Some(container) = document.get_mut(kind.container_id()) else {
            return FragmentOutcome::NoContainer;
        };
        if let Some(placeholder) = kind.placeholder() {
            container.clear_children();
            container.append_nodes(parse_fragment(placeholder));
        }

        match self.source.fetch_text(kind.resource()).await {
            Ok(markup) => {
                if let Some(container) = document.get_mut(kind.container_id()) {
                    container.clear_children();
                    container.append_nodes(parse_fragment(&markup));
                }
                info!("Loaded {:?} fragment from {}", kind, self.source.name());
                FragmentOutcome::Injected
            }
            Err(e) => {
                error!("Error loading {:?} fragment: {}", kind, e);
                FragmentOutcome::Placeholder(e)
            }
        }
    }
}
