//! Search results page parsing.
//!
//! Listing nodes are located by class name. Each field is read independently
//! into a [`ListingFields`] so a missing node is visible to the caller rather
//! than silently turning into an empty string.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::types::{Product, SIZE_NOT_AVAILABLE};

lazy_static! {
    static ref LISTING_SELECTOR: Selector = Selector::parse("div.feed-item").unwrap();
    static ref TITLE_SELECTOR: Selector = Selector::parse("div.listing-card__title").unwrap();
    static ref LINK_SELECTOR: Selector = Selector::parse("a.listing-card__link").unwrap();
    static ref PRICE_SELECTOR: Selector = Selector::parse("div.listing-card__price").unwrap();
    static ref SIZE_SELECTOR: Selector = Selector::parse("div.listing-card__size").unwrap();
    static ref NEXT_PAGE_SELECTOR: Selector = Selector::parse("a.pagination__next").unwrap();
}

/// Fields read from one listing node. `None` means the node was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFields {
    pub title: Option<String>,
    /// Raw `href` of the listing link
    pub href: Option<String>,
    pub price: Option<String>,
    pub size: Option<String>,
}

/// Required field that was absent from a listing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Title,
    Link,
    Price,
}

impl ListingFields {
    /// Read the fields of a single `div.feed-item`.
    pub fn from_element(node: ElementRef<'_>) -> Self {
        Self {
            title: first_text(node, &TITLE_SELECTOR),
            href: node
                .select(&LINK_SELECTOR)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string),
            price: first_text(node, &PRICE_SELECTOR),
            size: first_text(node, &SIZE_SELECTOR),
        }
    }

    /// Required fields that are missing, in column order.
    pub fn missing(&self) -> Vec<MissingField> {
        let mut missing = Vec::new();
        if self.title.is_none() {
            missing.push(MissingField::Title);
        }
        if self.href.is_none() {
            missing.push(MissingField::Link);
        }
        if self.price.is_none() {
            missing.push(MissingField::Price);
        }
        missing
    }

    /// Build a product, resolving the link against `base_url`.
    ///
    /// Size falls back to `"N/A"`; any other missing field (or an
    /// unresolvable link) yields the list of missing fields.
    pub fn into_product(self, base_url: &Url) -> Result<Product, Vec<MissingField>> {
        let missing = self.missing();
        let (Some(title), Some(href), Some(price)) = (self.title, self.href, self.price) else {
            return Err(missing);
        };

        let link = base_url
            .join(&href)
            .map_err(|_| vec![MissingField::Link])?;

        Ok(Product {
            title,
            link: link.to_string(),
            price,
            size: self.size.unwrap_or_else(|| SIZE_NOT_AVAILABLE.to_string()),
        })
    }
}

/// Products and bookkeeping extracted from one page.
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    pub products: Vec<Product>,
    /// All listing nodes on the page, including those past the limit
    pub listing_nodes: usize,
    /// Candidates dropped for missing required fields
    pub skipped: usize,
    pub has_next_page: bool,
}

/// Parse a search results page, considering at most `limit` listing nodes.
///
/// Candidates are limited before field checks, so a skipped node still
/// uses up one slot.
pub fn parse_listing_page(html: &str, limit: usize, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    let nodes: Vec<ElementRef<'_>> = document.select(&LISTING_SELECTOR).collect();
    let mut page = ParsedPage {
        listing_nodes: nodes.len(),
        has_next_page: document.select(&NEXT_PAGE_SELECTOR).next().is_some(),
        ..Default::default()
    };

    for node in nodes.into_iter().take(limit) {
        match ListingFields::from_element(node).into_product(base_url) {
            Ok(product) => page.products.push(product),
            Err(missing) => {
                tracing::debug!(?missing, "Skipping listing with missing fields");
                page.skipped += 1;
            }
        }
    }

    page
}

/// Text of the first match: descendant text pieces trimmed and joined.
fn first_text(node: ElementRef<'_>, selector: &Selector) -> Option<String> {
    node.select(selector).next().map(stripped_text)
}

fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}
