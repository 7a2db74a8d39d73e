//! Page markup builders

use scraper::Html;

pub const PAGE_URL: &str = "https://www.farsroid.com/example-app/";

/// One `li.download-link` entry
pub struct Link<'a> {
    pub href: Option<&'a str>,
    pub text: Option<&'a str>,
}

impl<'a> Link<'a> {
    pub fn new(href: &'a str, text: &'a str) -> Self {
        Self {
            href: Some(href),
            text: Some(text),
        }
    }

    fn render(&self) -> String {
        let href = self
            .href
            .map(|h| format!(r#" href="{h}""#))
            .unwrap_or_default();
        let text = self
            .text
            .map(|t| format!(r#"<span class="txt">{t}</span>"#))
            .unwrap_or_default();
        format!(r#"<li class="download-link"><a class="download-btn"{href}>{text}</a></li>"#)
    }
}

/// Markup of a download-box page with `heading` as the post title
pub fn download_page(heading: &str, links: &[Link<'_>]) -> String {
    let items: String = links.iter().map(Link::render).collect();
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{heading} - Farsroid</title></head>
<body>
  <h1 class="post-title">{heading}</h1>
  <section class="downloadbox">
    <ul class="download-links">{items}</ul>
  </section>
</body>
</html>"#
    )
}

/// Markup of a page that has a title but no download section
pub fn page_without_downloads(heading: &str) -> String {
    format!(
        r#"<html><head><title>{heading}</title></head>
<body><h1 class="post-title">{heading}</h1><p>Coming soon</p></body></html>"#
    )
}

pub fn parse(markup: &str) -> Html {
    Html::parse_document(markup)
}
