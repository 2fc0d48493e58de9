//! Result field extraction from the search response.

use crate::error::{LookupError, Result};
use scraper::{Html, Selector};

/// Element id of the read-only input the page fills with the syndicate name.
pub const RESULT_ELEMENT_ID: &str = "txtSynd";

/// Extract the trimmed syndicate name from the POST response.
///
/// An absent element and an empty (or whitespace-only) value are both
/// reported as [`LookupError::NotFound`].
pub fn extract_syndicate(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!("input#{RESULT_ELEMENT_ID}"))
        .map_err(|e| LookupError::Internal(format!("invalid result selector: {e}")))?;

    let name = document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(str::trim)
        .unwrap_or_default();

    if name.is_empty() {
        return Err(LookupError::NotFound);
    }

    Ok(name.to_string())
}
