//! Episode container parser
//!
//! Parses the rendered HTML of one `article.pd.pd--h` container into its
//! title, date and audio URL. Entries missing any of the three are
//! discarded by the caller; page structures vary, so each field has a
//! fallback selector.

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Title paragraph inside a container; the title text usually lives in a
/// child anchor.
const TITLE_SELECTOR: &str = "p.pd__tl";

const DATE_SELECTORS: [&str; 2] = [".pd__date time", "time"];

const AUDIO_SELECTORS: [&str; 2] = ["a.mm_boton.mm_boton_descarga", r#"a[href*=".mp3"]"#];

/// Fields of one episode container, before record assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEpisode {
    pub title: String,
    pub date: String,
    pub audio_url: String,
}

/// Parse one container fragment.
///
/// Returns `None` when the title, date or audio URL is missing; such
/// entries are dropped rather than emitted incomplete.
///
/// # Arguments
/// * `html` - Rendered HTML of a single episode container
/// * `base` - Page URL used to absolutize relative audio hrefs
pub fn parse_episode_fragment(html: &str, base: &Url) -> Option<ParsedEpisode> {
    let fragment = Html::parse_fragment(html);

    let title = extract_title(&fragment)?;
    let date = extract_date(&fragment)?;
    let audio_url = extract_audio_url(&fragment, base)?;

    Some(ParsedEpisode {
        title,
        date,
        audio_url,
    })
}

/// Extract the episode title.
///
/// Share/permalink anchors sometimes sit inside the title paragraph next
/// to the plain title text, so link text is stripped first; when nothing
/// remains the title itself is the link and its full text is used.
fn extract_title(fragment: &Html) -> Option<String> {
    let selector = Selector::parse(TITLE_SELECTOR).ok()?;
    let element = fragment.select(&selector).next()?;

    let stripped = text_without_links(&element);
    let raw = if stripped.trim().is_empty() {
        element.text().collect::<String>()
    } else {
        stripped
    };

    let title = normalize_whitespace(&raw);
    (!title.is_empty()).then_some(title)
}

fn extract_date(fragment: &Html) -> Option<String> {
    for selector_str in &DATE_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = fragment.select(&selector).next() {
                let date = element.text().collect::<String>().trim().to_string();
                if !date.is_empty() {
                    return Some(date);
                }
            }
        }
    }

    None
}

fn extract_audio_url(fragment: &Html, base: &Url) -> Option<String> {
    for selector_str in &AUDIO_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = fragment.select(&selector).next() {
                let href = element.value().attr("href").unwrap_or("").trim();
                if href.is_empty() {
                    continue;
                }
                if let Ok(resolved) = base.join(href) {
                    return Some(resolved.to_string());
                }
            }
        }
    }

    None
}

/// Text content of an element, excluding everything inside `<a>` descendants.
fn text_without_links(element: &ElementRef) -> String {
    let mut text = String::new();
    collect_text_without_links(*element, &mut text);
    text
}

fn collect_text_without_links(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() != "a" => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text_without_links(child_element, out);
                }
            }
            _ => {}
        }
    }
}

/// Collapse whitespace runs left behind by stripped markup.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
