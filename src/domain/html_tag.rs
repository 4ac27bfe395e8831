use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::review::is_review_fragment;

const REVIEW_TAGS: &str = "div, p, span, li";
const HIDDEN_TAGS: [&str; 5] = ["header", "nav", "footer", "script", "style"];
const ABOUT_TEXT_HINTS: [&str; 3] = ["about", "company", "who we are"];

#[derive(Debug, PartialEq, Clone)]
pub struct AnchorTag {
    /// Absolute url, resolved against the page it was found on.
    pub href: String,
    /// Lowercased text content.
    pub text: String,
}

/// Walks every block and inline text element in document order and keeps the
/// ones whose text mentions `company` and is longer than `min_len` characters.
///
/// Nested elements are visited independently, so an outer `div` and the `p`
/// inside it can both be returned.
pub fn extract_review_fragments(html: &str, company: &str, min_len: usize) -> Vec<String> {
    let Ok(selector) = Selector::parse(REVIEW_TAGS) else {
        return vec![];
    };
    let document = Html::parse_document(html);

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| is_review_fragment(text, company, min_len))
        .collect()
}

pub fn extract_anchor_tags(html: &str, page_url: &str) -> Vec<AnchorTag> {
    let Ok(selector) = Selector::parse("a") else {
        return vec![];
    };
    let base = Url::parse(page_url).ok();
    let document = Html::parse_document(html);

    document
        .select(&selector)
        .filter_map(|tag| {
            let href = tag.value().attr("href")?;
            let href = match base {
                Some(ref base) => base.join(href).ok()?.to_string(),
                None => href.to_string(),
            };
            Some(AnchorTag {
                href,
                text: tag.text().collect::<String>().to_lowercase(),
            })
        })
        .collect()
}

/// First anchor that looks like it leads to an "about" page, falling back to
/// the homepage itself.
pub fn find_about_page(anchors: &[AnchorTag], homepage: &str) -> String {
    anchors
        .iter()
        .find(|a| {
            a.href.contains("about") || ABOUT_TEXT_HINTS.iter().any(|hint| a.text.contains(hint))
        })
        .map(|a| a.href.clone())
        .unwrap_or_else(|| homepage.to_string())
}

/// Text of `element` with header, navigation, footer, script and style
/// subtrees left out. Text nodes are concatenated as they appear.
pub fn visible_text(element: ElementRef) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .filter_map(|a| a.value().as_element())
                .any(|e| HIDDEN_TAGS.contains(&e.name()));
            (!hidden).then_some(&**text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::{
        extract_anchor_tags, extract_review_fragments, find_about_page, visible_text, AnchorTag,
    };

    #[test]
    fn review_fragments_follow_document_order() {
        let html = r#"
            <html><body>
                <p>Acme has a really supportive management team overall.</p>
                <span>Short Acme note</span>
                <li>Work life balance at acme is poor during release weeks.</li>
                <p>This paragraph does not name the employer at all, sadly.</p>
            </body></html>
        "#;

        let fragments = extract_review_fragments(html, "Acme", 30);

        assert_eq!(
            fragments,
            vec![
                "Acme has a really supportive management team overall.",
                "Work life balance at acme is poor during release weeks.",
            ]
        );
    }

    #[test]
    fn nested_review_elements_are_each_returned() {
        let html = r#"<div><p>Acme pays on time and the benefits are generous.</p></div>"#;

        let fragments = extract_review_fragments(html, "Acme", 30);

        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], fragments[1]);
    }

    #[test]
    fn no_fragments_on_unrelated_page() {
        let html = "<html><body><p>Nothing to see here, move along please.</p></body></html>";
        assert!(extract_review_fragments(html, "Acme", 30).is_empty());
    }

    #[test]
    fn anchors_are_resolved_against_page_url() {
        let html = r#"
            <a href="/about-us">About Us</a>
            <a href="https://other.com/x">Elsewhere</a>
            <a>No href</a>
        "#;

        let anchors = extract_anchor_tags(html, "https://www.acme.com/");

        assert_eq!(
            anchors,
            vec![
                AnchorTag {
                    href: "https://www.acme.com/about-us".to_string(),
                    text: "about us".to_string(),
                },
                AnchorTag {
                    href: "https://other.com/x".to_string(),
                    text: "elsewhere".to_string(),
                },
            ]
        );
    }

    #[test]
    fn about_page_matches_on_href_or_text() {
        let anchors = vec![
            AnchorTag {
                href: "https://acme.com/careers".to_string(),
                text: "careers".to_string(),
            },
            AnchorTag {
                href: "https://acme.com/team".to_string(),
                text: "who we are".to_string(),
            },
            AnchorTag {
                href: "https://acme.com/about".to_string(),
                text: "about".to_string(),
            },
        ];

        assert_eq!(
            find_about_page(&anchors, "https://acme.com"),
            "https://acme.com/team"
        );
    }

    #[test]
    fn about_page_falls_back_to_homepage() {
        let anchors = vec![AnchorTag {
            href: "https://acme.com/careers".to_string(),
            text: "jobs".to_string(),
        }];

        assert_eq!(
            find_about_page(&anchors, "https://acme.com"),
            "https://acme.com"
        );
    }

    #[test]
    fn visible_text_skips_chrome_and_scripts() {
        let html = r#"
            <html><body>
                <header>Menu</header>
                <nav>Home</nav>
                <main>Acme builds rockets<script>var x = 1;</script></main>
                <footer>Copyright</footer>
            </body></html>
        "#;
        let document = Html::parse_document(html);

        let text = visible_text(document.root_element());

        assert!(text.contains("Acme builds rockets"));
        assert!(!text.contains("Menu"));
        assert!(!text.contains("Home"));
        assert!(!text.contains("var x"));
        assert!(!text.contains("Copyright"));
    }

    #[test]
    fn visible_text_adds_no_separators() {
        let document = Html::parse_document("<p>Acme<b>Corp</b> builds rockets</p>");

        assert_eq!(
            visible_text(document.root_element()),
            "AcmeCorp builds rockets"
        );
    }
}
