//! Real-time stock extraction from a public item page.
//!
//! The marketplace API sometimes lags behind the stock shown on the item's
//! public page. The page embeds its state as JSON, which includes an
//! `"availableStock":<n>` pair; this module pulls that number out.

use std::sync::LazyLock;

use regex::Regex;

/// Pattern matching the embedded stock value.
const AVAILABLE_STOCK_PATTERN: &str = r#""availableStock"\s*:\s*(-?\d+)"#;

static AVAILABLE_STOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(AVAILABLE_STOCK_PATTERN).expect("valid regex"));

/// Extract the first `availableStock` value from a page body.
///
/// Returns `Ok(None)` when the page has no stock value and `Err` when the
/// value is present but is not a usable quantity.
pub fn parse_available_stock(page: &str) -> Result<Option<i32>, String> {
    let Some(caps) = AVAILABLE_STOCK_RE.captures(page) else {
        return Ok(None);
    };

    let raw = &caps[1];
    let quantity: i32 = raw
        .parse()
        .map_err(|e| format!("invalid availableStock value '{raw}': {e}"))?;

    if quantity < 0 {
        return Err(format!("negative availableStock value {quantity}"));
    }

    Ok(Some(quantity))
}
