use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::records::{parse_display_date, ExpenseRecord};

/// Category filter value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Date,
    Amount,
    Category,
    Expense,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Expense,
        SortField::Category,
        SortField::Amount,
        SortField::Date,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Expense => "Expense",
        }
    }
}

/// `Desc` is each field's natural order: newest date, largest amount, A to Z
/// for text. `Asc` inverts it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Desc => "↓",
            Self::Asc => "↑",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Clicking the active field flips its direction; any other field starts
    /// in `Desc`.
    pub fn toggle(&self, requested: SortField) -> Self {
        if self.field == requested {
            Self::new(requested, self.direction.toggle())
        } else {
            Self::new(requested, SortDirection::Desc)
        }
    }

    /// Arrow shown next to a field's header, empty when it is not active.
    pub fn indicator(&self, field: SortField) -> &'static str {
        if self.field == field {
            self.direction.arrow()
        } else {
            ""
        }
    }
}

/// Everything the user can change about what is displayed.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewQuery {
    pub category: String,
    pub search: String,
    pub sort: SortSpec,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
            sort: SortSpec::new(SortField::Date, SortDirection::Asc),
        }
    }
}

pub fn filter(records: &[ExpenseRecord], category: &str, search: &str) -> Vec<ExpenseRecord> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|r| category == ALL_CATEGORIES || r.category == category)
        .filter(|r| needle.is_empty() || r.expense.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Stable sort. Records without a usable date always come last when sorting
/// by date, whatever the direction.
pub fn sort(
    records: &[ExpenseRecord],
    field: SortField,
    direction: SortDirection,
) -> Vec<ExpenseRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare(a, b, field, direction));
    sorted
}

fn compare(
    a: &ExpenseRecord,
    b: &ExpenseRecord,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    let natural = match field {
        SortField::Date => {
            match (parse_display_date(&a.date), parse_display_date(&b.date)) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Greater,
                (Some(_), None) => return Ordering::Less,
                (Some(da), Some(db)) => db.cmp(&da),
            }
        }
        SortField::Amount => b.amount.total_cmp(&a.amount),
        SortField::Category => locale_compare(&a.category, &b.category),
        SortField::Expense => locale_compare(&a.expense, &b.expense),
    };

    match direction {
        SortDirection::Desc => natural,
        SortDirection::Asc => natural.reverse(),
    }
}

/// Caseless comparison first, so "apple" sorts next to "Apple" rather than
/// after "Zebra"; exact comparison breaks the tie.
fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

pub fn compute_view(original: &[ExpenseRecord], query: &ViewQuery) -> Vec<ExpenseRecord> {
    let filtered = filter(original, &query.category, &query.search);
    sort(&filtered, query.sort.field, query.sort.direction)
}

pub fn aggregate_total(records: &[ExpenseRecord]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CategoryTotals {
    pub total: f64,
    pub count: usize,
}

pub fn aggregate_by_category(records: &[ExpenseRecord]) -> BTreeMap<String, CategoryTotals> {
    let mut breakdown: BTreeMap<String, CategoryTotals> = BTreeMap::new();
    for record in records {
        let entry = breakdown.entry(record.category.clone()).or_default();
        entry.total += record.amount;
        entry.count += 1;
    }
    breakdown
}

/// `"All"` followed by each category in order of first appearance.
pub fn distinct_categories(records: &[ExpenseRecord]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for record in records {
        if !categories[1..].contains(&record.category) {
            categories.push(record.category.clone());
        }
    }
    categories
}

/// What the expense list area should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    NoData,
    NoMatches,
    Ready,
}

impl ViewStatus {
    pub fn resolve(loading: bool, original_len: usize, displayed_len: usize) -> Self {
        if loading {
            Self::Loading
        } else if original_len == 0 {
            Self::NoData
        } else if displayed_len == 0 {
            Self::NoMatches
        } else {
            Self::Ready
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some("Loading your expenses..."),
            Self::NoData => Some("No expense data available right now."),
            Self::NoMatches => Some("No expenses match your filters"),
            Self::Ready => None,
        }
    }
}
