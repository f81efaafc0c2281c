use std::{borrow::Cow, io::BufRead, sync::OnceLock};

use regex::Regex;
use scraper::{ElementRef, Html};

use super::Result;

/// Removes every whitespace character, including the full-width space.
pub fn strip_whitespace(s: &str) -> Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\s+").expect("regex should be valid"));
    re.replace_all(s, "")
}

/// All text nodes under `element` joined together, or `""` for no element.
pub fn element_text(element: Option<ElementRef<'_>>) -> String {
    element.map(|e| e.text().collect()).unwrap_or_default()
}

/// Reads the whole body and builds an HTML document from it.
///
/// Bytes that are not UTF-8 become U+FFFD instead of failing the read.
pub fn read_document(body: &mut dyn BufRead) -> Result<Html> {
    let mut html = Vec::new();
    body.read_to_end(&mut html)?;
    Ok(Html::parse_document(&String::from_utf8_lossy(&html)))
}
