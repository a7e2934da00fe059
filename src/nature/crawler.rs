use crate::{utils, NewArticle, ScraperError};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

const E: &str = "Invalid selector";

lazy_static! {
    static ref ITEM: Selector = Selector::parse("li.app-article-list-row__item").expect(E);
    static ref CARD_LINK: Selector = Selector::parse("a.c-card__link").expect(E);
    static ref AUTHORS: Vec<Selector> = parse_all(&[
        "ul.c-author-list",
        ".c-author-list",
        "[data-testid='author-list']",
        ".c-meta__item.c-meta__item--authors",
        ".c-meta__authors",
        "span[data-testid='author']",
        ".author",
    ]);
    static ref DESCRIPTION: Vec<Selector> = parse_all(&[
        "p.c-card__summary",
        ".c-card__summary",
        "[data-testid='article-summary']",
        ".article-summary",
        ".c-meta__item.c-meta__item--summary",
        ".c-meta__summary",
        "p[data-testid='summary']",
        ".summary",
        "p",
    ]);
}

fn parse_all(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .map(|s| Selector::parse(s).expect(E))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: String,
    pub link: String,
    pub authors: String,
    pub description: String,
}

impl ExtractedArticle {
    pub fn into_new_article(self) -> NewArticle {
        NewArticle::new(self.title, self.link, self.description, self.authors)
    }
}

/// Outcome of extracting one listing item. `Ok(None)` means the item has
/// no title anchor and is skipped.
pub type ItemResult = Result<Option<ExtractedArticle>, ScraperError>;

#[derive(Debug, Clone)]
pub struct NatureCrawler {
    site_root: String,
}

impl NatureCrawler {
    pub fn new<S: Into<String>>(site_root: S) -> Self {
        NatureCrawler {
            site_root: site_root.into(),
        }
    }

    /// Parses a listing page and extracts every item independently.
    pub fn extract(&self, html: &str) -> Vec<ItemResult> {
        let doc = Html::parse_document(html);
        doc.select(&ITEM)
            .map(|item| self.extract_item(item))
            .collect()
    }

    pub fn extract_item(&self, item: ElementRef<'_>) -> ItemResult {
        let Some(anchor) = item.select(&CARD_LINK).next() else {
            return Ok(None);
        };

        let title = element_text(anchor);
        let href = anchor.value().attr("href").ok_or_else(|| {
            ScraperError::Extraction(format!("title anchor without href: '{}'", title))
        })?;
        let link = format!("{}{}", self.site_root, href.trim());

        let authors = first_text(item, &AUTHORS).unwrap_or_default();
        let description = first_text(item, &DESCRIPTION).unwrap_or_default();

        Ok(Some(ExtractedArticle {
            title,
            link,
            authors,
            description,
        }))
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    utils::normalize_text(&el.text().collect::<String>())
}

/// Runs the strategies in order and returns the first non-empty text.
fn first_text(item: ElementRef<'_>, strategies: &[Selector]) -> Option<String> {
    strategies.iter().find_map(|selector| {
        item.select(selector)
            .next()
            .map(element_text)
            .filter(|text| !text.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SITE_ROOT;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn crawler() -> NatureCrawler {
        NatureCrawler::new(SITE_ROOT)
    }

    fn single_item(inner: &str) -> ItemResult {
        let html = format!(
            r#"<ul><li class="app-article-list-row__item">{}</li></ul>"#,
            inner
        );
        let mut results = crawler().extract(&html);
        assert_eq!(results.len(), 1);
        results.remove(0)
    }

    #[test]
    fn test_parsing_listing_fixture() {
        let html = fs::read_to_string("tests/htmls/listing.html").expect("Invalid file path");
        let results = crawler().extract(&html);
        assert_eq!(results.len(), 4);

        let extracted: Vec<Option<ExtractedArticle>> = results
            .into_iter()
            .map(|r| r.expect("no item in the fixture is malformed"))
            .collect();

        assert_eq!(
            extracted,
            vec![
                Some(ExtractedArticle {
                    title: "A deep-sea microbe that breathes arsenic".to_string(),
                    link: "https://www.nature.com/articles/s41586-024-00001-1".to_string(),
                    authors: "Jane Doe, Rahul Mehta & Li Wei".to_string(),
                    description: "Sediment cultures reveal an anaerobic pathway that couples arsenate reduction to growth.".to_string(),
                }),
                Some(ExtractedArticle {
                    title: "Room-temperature superconductivity claims revisited".to_string(),
                    link: "https://www.nature.com/articles/s41586-024-00002-2".to_string(),
                    authors: "Carlos Ruiz".to_string(),
                    description: "Independent replication efforts find no zero-resistance state.".to_string(),
                }),
                None,
                Some(ExtractedArticle {
                    title: "Correction: Glacier retreat in the Andes".to_string(),
                    link: "https://www.nature.com/articles/s41586-024-00004-4".to_string(),
                    authors: String::new(),
                    description: String::new(),
                }),
            ]
        );
    }

    #[test]
    fn test_missing_anchor_is_skipped() {
        let res = single_item(r#"<h3 class="c-card__title">No link here</h3><p>Body</p>"#);
        assert!(matches!(res, Ok(None)));
    }

    #[test]
    fn test_anchor_without_href_is_an_extraction_error() {
        let res = single_item(r#"<a class="c-card__link">Orphan title</a>"#);
        assert!(matches!(res, Err(ScraperError::Extraction(_))));
    }

    #[test]
    fn test_authors_fallback_order() {
        let res = single_item(
            r#"<a class="c-card__link" href="/articles/x">T</a>
               <span class="author">Last Resort</span>
               <div class="c-meta__authors">Meta Authors</div>"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(res.authors, "Meta Authors");
    }

    #[test]
    fn test_empty_match_falls_through_to_next_strategy() {
        let res = single_item(
            r#"<a class="c-card__link" href="/articles/x">T</a>
               <ul class="c-author-list">  </ul>
               <span data-testid="author">Ada Lovelace</span>
               <p class="c-card__summary"></p>
               <div data-testid="article-summary"> A summary </div>"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(res.authors, "Ada Lovelace");
        assert_eq!(res.description, "A summary");
    }

    #[test]
    fn test_generic_paragraph_is_last_description_fallback() {
        let res = single_item(
            r#"<a class="c-card__link" href="/articles/x">T</a>
               <div><p>First paragraph</p><p>Second</p></div>"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(res.description, "First paragraph");
        assert_eq!(res.authors, "");
    }

    #[test]
    fn test_title_whitespace_is_collapsed() {
        let res = single_item(
            "<a class=\"c-card__link\" href=\" /articles/y \">\n  Split\n   title  </a>",
        )
        .unwrap()
        .unwrap();
        assert_eq!(res.title, "Split title");
        assert_eq!(res.link, "https://www.nature.com/articles/y");
    }

    #[test]
    fn test_page_without_items() {
        let results = crawler().extract("<html><body><p>Nothing</p></body></html>");
        assert!(results.is_empty());
    }
}
