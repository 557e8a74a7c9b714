use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use scraper::{Html, Selector};

use crate::FetchOutput;

/// Title and image references pulled out of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: Option<String>,
    /// One entry per matched image element, in document order. An element
    /// without a `src` attribute contributes an empty string; the fetch
    /// layer rejects those before going to the network.
    pub image_srcs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
    #[error("failed to decode page bytes as {encoding}")]
    Decode { encoding: String },
}

pub trait DocumentQuery: Send + Sync {
    fn extract(&self, html: &str) -> ExtractedPage;
}

/// CSS-selector-driven page query:
/// - title is the first match of `title_selector`, text concatenated and
///   trimmed, `None` when unmatched or empty
/// - image sources are the `src` attributes of every `image_selector`
///   match, in document order.
#[derive(Debug)]
pub struct SelectorQuery {
    title_selector: Selector,
    image_selector: Selector,
}

impl SelectorQuery {
    /// Both selectors come from user configuration, so parse failures are
    /// reported here instead of being swallowed per extraction.
    pub fn new(title_selector: &str, image_selector: &str) -> Result<Self, ExtractError> {
        Ok(Self {
            title_selector: parse_selector(title_selector)?,
            image_selector: parse_selector(image_selector)?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|err| ExtractError::Selector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

impl DocumentQuery for SelectorQuery {
    fn extract(&self, html: &str) -> ExtractedPage {
        let doc = Html::parse_document(html);

        let title = doc
            .select(&self.title_selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty());

        let image_srcs = doc
            .select(&self.image_selector)
            .map(|el| el.value().attr("src").unwrap_or_default().to_string())
            .collect();

        ExtractedPage { title, image_srcs }
    }
}

/// Decode fetched page bytes into UTF-8: BOM -> Content-Type charset ->
/// chardetng fallback.
pub fn decode_page(output: &FetchOutput) -> Result<String, ExtractError> {
    let bytes = output.bytes.as_ref();

    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = output.content_type.as_deref().and_then(extract_charset) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, encoding);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        // Labels are matched case-insensitively by encoding_rs, so lowering
        // the whole parameter is harmless.
        let lowered = part.trim().to_ascii_lowercase();
        lowered
            .strip_prefix("charset=")
            .map(|value| value.trim_matches([' ', '"', '\'']).to_string())
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<String, ExtractError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(ExtractError::Decode {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}
