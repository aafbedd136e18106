use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// 2-2-2 digit hyphenated date, the shape shipment dates take in the export.
static SHIPMENT_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}-\d{2}-\d{2}").expect("invalid shipment date pattern"));

/// Order number (5+ digits) followed by a slash-delimited date.
static ORDER_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{5,})\s+(\d{1,2}/\d{1,2}/\d{4})").expect("invalid order header pattern")
});

/// What one `Shipment Date` cell turned out to hold. The column is
/// overloaded in the source: either a customer/batch id or a date string,
/// depending on the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipmentCell {
    Cid(String),
    Date(String),
}

/// Classify one `Shipment Date` cell. Values matching the date shape keep
/// their raw text (parsing happens after propagation); everything else
/// non-empty is a batch id. Empty cells rely on propagation.
pub fn classify_shipment_cell(cell: &str) -> Option<ShipmentCell> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else if SHIPMENT_DATE_RE.is_match(trimmed) {
        Some(ShipmentCell::Date(trimmed.to_string()))
    } else {
        Some(ShipmentCell::Cid(trimmed.to_string()))
    }
}

/// An order header pulled out of a `Description` cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderHeader {
    pub order_no: String,
    /// Raw date text; parsed only after propagation.
    pub order_date: String,
    /// The description with the matched substring removed and end-trimmed.
    pub rest: String,
}

/// Pull the first order header out of a description. Only the first match is
/// consumed; the source data carries at most one header per row.
pub fn extract_order(description: &str) -> Option<OrderHeader> {
    let caps = ORDER_HEADER_RE.captures(description)?;
    let matched = caps.get(0)?;

    let mut rest = String::with_capacity(description.len() - matched.len());
    rest.push_str(&description[..matched.start()]);
    rest.push_str(&description[matched.end()..]);

    Some(OrderHeader {
        order_no: caps[1].to_string(),
        order_date: caps[2].to_string(),
        rest: rest.trim().to_string(),
    })
}

/// Day-first `DD-MM-YY` shipment date. Already-normalized ISO dates are
/// accepted too, so the pipeline's own output re-parses cleanly.
pub fn parse_shipment_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%d-%m-%y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// Day-first `D/M/YYYY` order date, with the same ISO fallback.
pub fn parse_order_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// Lenient numeric parse for the passthrough columns. Thousands separators
/// are tolerated; anything else non-numeric reads as absent.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse()
        .ok()
        .or_else(|| trimmed.replace(',', "").parse().ok())
}
