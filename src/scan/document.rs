//! Selector matching over parsed HTML

use scraper::{Html, Selector};

use crate::scan::error::ScanError;

/// Parse a CSS selector, keeping the parser's message on failure.
pub fn parse_selector(selector: &str) -> Result<Selector, ScanError> {
    Selector::parse(selector).map_err(|e| ScanError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Link targets of every element matching `selector`, in document order.
///
/// Matching elements without an `href` attribute are skipped.
pub fn hrefs<'a>(
    document: &'a Html,
    selector: &'a Selector,
) -> impl Iterator<Item = &'a str> + 'a {
    document
        .select(selector)
        .filter_map(|element| element.value().attr("href"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE_PAGE: &str = r#"
        <html><body>
          <a href="/about/">About</a>
          <div class="col-row two-col">
            <div class="column">
              <h2>Stable Releases</h2>
              <ul>
                <li><a href="/downloads/release/python-3121/">Python 3.12.1</a></li>
                <li><a href="/downloads/release/python-3117/">Python 3.11.7</a></li>
                <li><a name="anchor">no target</a></li>
              </ul>
            </div>
            <div class="column">
              <h2>Pre-releases</h2>
              <ul>
                <li><a href="/downloads/release/python-3130a2/">Python 3.13.0a2</a></li>
              </ul>
            </div>
          </div>
        </body></html>
    "#;

    #[test]
    fn hrefs_follow_document_order() {
        let document = Html::parse_document(SOURCE_PAGE);
        let selector = parse_selector("a[href]").unwrap();

        let links: Vec<&str> = hrefs(&document, &selector).collect();
        assert_eq!(
            links,
            vec![
                "/about/",
                "/downloads/release/python-3121/",
                "/downloads/release/python-3117/",
                "/downloads/release/python-3130a2/",
            ]
        );
    }

    #[test]
    fn hrefs_limited_to_first_column() {
        let document = Html::parse_document(SOURCE_PAGE);
        let selector = parse_selector(".col-row.two-col .column:first-child a[href]").unwrap();

        let links: Vec<&str> = hrefs(&document, &selector).collect();
        assert_eq!(
            links,
            vec![
                "/downloads/release/python-3121/",
                "/downloads/release/python-3117/",
            ]
        );
    }

    #[test]
    fn hrefs_skip_elements_without_target() {
        let document = Html::parse_document(SOURCE_PAGE);
        let selector = parse_selector("li a").unwrap();

        assert_eq!(hrefs(&document, &selector).count(), 3);
    }

    #[test]
    fn hrefs_of_page_without_links_is_empty() {
        let document = Html::parse_document("<html><body><p>maintenance</p></body></html>");
        let selector = parse_selector("a[href]").unwrap();

        assert_eq!(hrefs(&document, &selector).next(), None);
    }

    #[test]
    fn parse_selector_reports_invalid_selector() {
        let result = parse_selector("a:not-a-pseudo-class");
        assert!(matches!(result, Err(ScanError::Selector { .. })));
    }
}
