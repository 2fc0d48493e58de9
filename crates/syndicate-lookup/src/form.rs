//! Hidden form state harvesting and search payload construction.
//!
//! The search page is an ASP.NET web form: every GET embeds fresh view-state
//! and event-validation tokens that must be echoed back on the POST. Tokens are
//! harvested per lookup and never cached.

use crate::error::{LookupError, Result};
use scraper::{Html, Selector};
use std::collections::HashMap;
use syndicate_core::NationalId;

/// Hidden fields echoed back verbatim; `txtdat` is the page's date token.
pub const TOKEN_FIELDS: [&str; 4] = [
    "__VIEWSTATE",
    "__VIEWSTATEGENERATOR",
    "__EVENTVALIDATION",
    "txtdat",
];

/// Form field carrying the identifier.
pub const IDENTIFIER_FIELD: &str = "NationalNumber";

/// Submit button name and the value that routes the postback to the search handler.
pub const SEARCH_BUTTON: (&str, &str) = ("btnSearch", "بحث");

/// Token bundle harvested from one GET response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormTokens {
    values: HashMap<&'static str, String>,
}

impl FormTokens {
    /// Extract the hidden token values from the search page.
    ///
    /// A field missing from the page, or missing its `value` attribute, is
    /// harvested as an empty string.
    pub fn harvest(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let mut values = HashMap::with_capacity(TOKEN_FIELDS.len());

        for name in TOKEN_FIELDS {
            let selector = Selector::parse(&format!("input[name=\"{name}\"]"))
                .map_err(|e| LookupError::Internal(format!("invalid token selector: {e}")))?;

            let value = document
                .select(&selector)
                .next()
                .and_then(|el| el.value().attr("value"))
                .unwrap_or_default();

            if value.is_empty() {
                tracing::debug!("Form token {} not present on page", name);
            }
            values.insert(name, value.to_string());
        }

        Ok(Self { values })
    }

    /// Value of a harvested token, empty if absent.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    /// Build the search postback body in the order the page's own form posts it.
    #[must_use]
    pub fn search_payload(&self, national_id: &NationalId) -> Vec<(String, String)> {
        let field = |name: &str, value: &str| (name.to_string(), value.to_string());

        vec![
            field("__EVENTTARGET", ""),
            field("__EVENTARGUMENT", ""),
            field("__LASTFOCUS", ""),
            field("__VIEWSTATE", self.get("__VIEWSTATE")),
            field("__VIEWSTATEGENERATOR", self.get("__VIEWSTATEGENERATOR")),
            field("__EVENTVALIDATION", self.get("__EVENTVALIDATION")),
            field("txtdat", self.get("txtdat")),
            field("TextBox1", ""),
            field("TextBox2", ""),
            field("OldRefID", ""),
            field("TextBox3", ""),
            field(IDENTIFIER_FIELD, national_id.as_str()),
            field(SEARCH_BUTTON.0, SEARCH_BUTTON.1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r#"
        <html><body>
          <form method="post" action="./lastpaid.aspx" id="form1">
            <input type="hidden" name="__EVENTTARGET" id="__EVENTTARGET" value="" />
            <input type="hidden" name="__VIEWSTATE" id="__VIEWSTATE" value="dDwtMTA4NzM0OTk0Mzs7Pg==" />
            <input type="hidden" name="__VIEWSTATEGENERATOR" id="__VIEWSTATEGENERATOR" value="C2EE9ABB" />
            <input type="hidden" name="__EVENTVALIDATION" id="__EVENTVALIDATION" value="/wEdAAf+ev" />
            <input name="txtdat" type="text" value="19/10/2026" id="txtdat" />
            <input name="NationalNumber" type="text" id="NationalNumber" />
            <input type="submit" name="btnSearch" value="بحث" id="btnSearch" />
          </form>
        </body></html>
    "#;

    #[test]
    fn test_harvest_tokens() {
        let tokens = FormTokens::harvest(SEARCH_PAGE).expect("harvest should succeed");

        assert_eq!(tokens.get("__VIEWSTATE"), "dDwtMTA4NzM0OTk0Mzs7Pg==");
        assert_eq!(tokens.get("__VIEWSTATEGENERATOR"), "C2EE9ABB");
        assert_eq!(tokens.get("__EVENTVALIDATION"), "/wEdAAf+ev");
        assert_eq!(tokens.get("txtdat"), "19/10/2026");
    }

    #[test]
    fn test_missing_tokens_are_empty() {
        let html = r#"
            <form>
              <input type="hidden" name="__VIEWSTATE" value="abc" />
              <input type="hidden" name="__EVENTVALIDATION" />
            </form>
        "#;
        let tokens = FormTokens::harvest(html).expect("harvest should succeed");

        assert_eq!(tokens.get("__VIEWSTATE"), "abc");
        assert_eq!(tokens.get("__VIEWSTATEGENERATOR"), "");
        assert_eq!(tokens.get("__EVENTVALIDATION"), "");
        assert_eq!(tokens.get("txtdat"), "");
        assert_eq!(tokens.get("not-a-token"), "");
    }

    #[test]
    fn test_harvest_ignores_non_input_elements() {
        let html = r#"<div name="__VIEWSTATE" value="nope"></div>"#;
        let tokens = FormTokens::harvest(html).expect("harvest should succeed");
        assert_eq!(tokens.get("__VIEWSTATE"), "");
    }

    #[test]
    fn test_search_payload_layout() {
        let tokens = FormTokens::harvest(SEARCH_PAGE).expect("harvest should succeed");
        let id = NationalId::new("29501011234567").expect("valid id");
        let payload = tokens.search_payload(&id);

        let keys: Vec<&str> = payload.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            [
                "__EVENTTARGET",
                "__EVENTARGUMENT",
                "__LASTFOCUS",
                "__VIEWSTATE",
                "__VIEWSTATEGENERATOR",
                "__EVENTVALIDATION",
                "txtdat",
                "TextBox1",
                "TextBox2",
                "OldRefID",
                "TextBox3",
                "NationalNumber",
                "btnSearch",
            ]
        );

        let value = |key: &str| {
            payload
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
                .expect("key present")
        };
        assert_eq!(value("__VIEWSTATE"), "dDwtMTA4NzM0OTk0Mzs7Pg==");
        assert_eq!(value("txtdat"), "19/10/2026");
        assert_eq!(value("NationalNumber"), "29501011234567");
        assert_eq!(value("btnSearch"), "بحث");
        assert_eq!(value("__EVENTTARGET"), "");
        assert_eq!(value("OldRefID"), "");
    }
}
