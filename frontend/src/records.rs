use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;

/// Substituted for missing text and missing or unparseable dates.
pub const PLACEHOLDER: &str = "—";

pub const DEFAULT_CATEGORY: &str = "Other";

/// Output format of [`format_date`], e.g. `01-02-24`.
pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%y";

#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseRecord {
    pub expense: String,
    pub amount: f64,
    pub date: String,
    pub category: String,
}

impl ExpenseRecord {
    pub fn new(expense: &str, amount: f64, date: &str, category: &str) -> Self {
        Self {
            expense: expense.to_string(),
            amount,
            date: date.to_string(),
            category: category.to_string(),
        }
    }

    pub fn has_date(&self) -> bool {
        self.date != PLACEHOLDER
    }
}

/// One page of raw records as served by a data endpoint.
///
/// Entries stay untyped so that one malformed record cannot fail the page.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawPage {
    pub results: Vec<Value>,
}

impl RawPage {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

const EXPENSE_PATH: &str = "/properties/Expense/title/0/text/content";
const AMOUNT_PATH: &str = "/properties/Amount/number";
const DATE_PATH: &str = "/properties/Date/date/start";
const CATEGORY_PATH: &str = "/properties/Category/select/name";

pub fn normalize(page: &RawPage) -> Vec<ExpenseRecord> {
    page.results.iter().map(normalize_record).collect()
}

pub fn normalize_record(raw: &Value) -> ExpenseRecord {
    ExpenseRecord {
        expense: coerce_text(raw.pointer(EXPENSE_PATH), PLACEHOLDER),
        amount: coerce_amount(raw.pointer(AMOUNT_PATH)),
        date: format_date(raw.pointer(DATE_PATH).and_then(Value::as_str)),
        category: coerce_text(raw.pointer(CATEGORY_PATH), DEFAULT_CATEGORY),
    }
}

/// Non-empty string value, or `default` for anything else.
pub fn coerce_text(value: Option<&Value>, default: &str) -> String {
    match value.and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

/// Finite, non-negative number, or `0`.
pub fn coerce_amount(value: Option<&Value>) -> f64 {
    match value.and_then(Value::as_f64) {
        Some(n) if n.is_finite() && n >= 0.0 => n,
        _ => 0.0,
    }
}

/// Converts an ISO-like date (`2024-02-01`, RFC 3339, or a naive date-time)
/// to `dd-mm-yy`. Anything else yields [`PLACEHOLDER`].
pub fn format_date(raw: Option<&str>) -> String {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() && s != PLACEHOLDER => s,
        _ => return PLACEHOLDER.to_string(),
    };

    match parse_iso_date(raw) {
        Some(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        None => {
            log::debug!("Unparseable date {:?}", raw);
            PLACEHOLDER.to_string()
        }
    }
}

fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Rebuilds a calendar date from a `dd-mm-yy` display string, reading the
/// year as `2000 + yy`.
pub fn parse_display_date(display: &str) -> Option<NaiveDate> {
    let mut parts = display.split('-');
    let day = parts.next()?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() || !(0..100).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}
