//! HTML fixtures shaped like marketplace search result pages.

/// One listing card. `size` is omitted from the markup when `None`.
pub fn listing_card(id: usize, title: &str, price: &str, size: Option<&str>) -> String {
    let size = size
        .map(|s| format!(r#"<div class="listing-card__size">{s}</div>"#))
        .unwrap_or_default();
    format!(
        r#"<div class="feed-item">
  <a class="listing-card__link" href="/listings/{id}-{slug}">
    <div class="listing-card__title">{title}</div>
    <div class="listing-card__price">{price}</div>
    {size}
  </a>
</div>
"#,
        slug = title.to_lowercase().replace(' ', "-"),
    )
}

/// A results page with `count` listings titled `{prefix} {n}`.
pub fn results_page(prefix: &str, count: usize, has_next: bool) -> String {
    let cards: String = (1..=count)
        .map(|n| listing_card(n, &format!("{prefix} {n}"), &format!("${}", n * 10), Some("L")))
        .collect();
    let next = if has_next {
        r##"<a class="pagination__next" href="#">Next</a>"##
    } else {
        ""
    };
    format!("<html><body><div class=\"feed\">{cards}</div>{next}</body></html>")
}
