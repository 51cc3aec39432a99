//! Readable content extraction
//!
//! Pulls the title, main text and description out of an HTML document.
//! Boilerplate containers (navigation, headers, footers, ads, comments,
//! scripts) are skipped; the longest of several common article containers is
//! taken as the main text, with the whole body as fallback when every
//! container comes up short.

use scraper::{ElementRef, Html, Selector};

/// Elements whose text never contributes to page content
const BOILERPLATE: &str = "script, style, iframe, nav, footer, header, .adsbygoogle, .advertisement, #sidebar, .sidebar, .nav, .menu, .comment";

/// Main-content candidates, tried in order
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".content, .main, #content, #main, .post, .entry",
    "main",
    ".article-content, .post-content",
    ".rich_media_content",
    "#js_content",
];

/// Below this many characters the body text is used instead
const MIN_CONTENT_CHARS: usize = 100;

/// Language reported when the document does not declare one
pub const DEFAULT_LANGUAGE: &str = "zh";

/// Text content extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    pub title: String,
    /// Main text with whitespace runs collapsed to single spaces
    pub content: String,
    /// `# {title}` heading followed by the content
    pub markdown: String,
    pub description: String,
    pub language: String,
}

/// Extracts readable content from an HTML document
///
/// Never fails: markup that yields nothing produces empty strings.
///
/// # Example
///
/// ```
/// use sga_site_crawler::crawler::extract_content;
///
/// let html = "<html><head><title>Guide</title></head><body><nav>Menu</nav><p>Hello  world</p></body></html>";
/// let page = extract_content(html);
/// assert_eq!(page.title, "Guide");
/// assert_eq!(page.content, "Hello world");
/// assert_eq!(page.markdown, "# Guide\n\nHello world");
/// ```
pub fn extract_content(html: &str) -> ExtractedContent {
    let document = Html::parse_document(html);

    let Ok(boilerplate) = Selector::parse(BOILERPLATE) else {
        return ExtractedContent::default();
    };

    let title = select_text(&document, "title", &boilerplate);
    let title = title.trim().to_string();

    let mut main_text = String::new();
    for selector in CONTENT_SELECTORS {
        let text = select_text(&document, selector, &boilerplate);
        let text = text.trim();
        if text.chars().count() > main_text.chars().count() {
            main_text = text.to_string();
        }
    }

    if main_text.chars().count() < MIN_CONTENT_CHARS {
        main_text = select_text(&document, "body", &boilerplate)
            .trim()
            .to_string();
    }

    let content = collapse_whitespace(&main_text);
    let markdown = format!("# {}\n\n{}", title, content);

    ExtractedContent {
        title,
        content,
        markdown,
        description: meta_description(&document),
        language: document_language(&document),
    }
}

/// Concatenated text of every element matching `selector`, skipping boilerplate
fn select_text(document: &Html, selector: &str, boilerplate: &Selector) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };

    let mut text = String::new();
    for element in document.select(&selector) {
        if is_boilerplate(element, boilerplate) {
            continue;
        }
        collect_text(element, boilerplate, &mut text);
    }
    text
}

fn is_boilerplate(element: ElementRef<'_>, boilerplate: &Selector) -> bool {
    boilerplate.matches(&element)
        || element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| boilerplate.matches(&ancestor))
}

fn collect_text(element: ElementRef<'_>, boilerplate: &Selector, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !boilerplate.matches(&child_element) {
                collect_text(child_element, boilerplate, out);
            }
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn meta_description(document: &Html) -> String {
    Selector::parse(r#"meta[name="description"]"#)
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .and_then(|meta| meta.value().attr("content"))
                .map(str::to_string)
        })
        .unwrap_or_default()
}

fn document_language(document: &Html) -> String {
    Selector::parse("html[lang]")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .and_then(|html| html.value().attr("lang"))
                .map(str::trim)
                .filter(|lang| !lang.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

/// Truncates to at most `max_chars` characters on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => text[..index].to_string(),
        None => text.to_string(),
    }
}
