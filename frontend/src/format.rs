use crate::config::CURRENCY_SYMBOL;

/// Whole amounts print without decimals, anything else with two.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{:.2}", amount)
    }
}

pub fn format_total(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn format_currency(amount: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_amount(amount))
}

pub fn expense_count_label(count: usize) -> String {
    if count == 1 {
        "1 expense".to_string()
    } else {
        format!("{} expenses", count)
    }
}

pub fn category_color(category: &str) -> &'static str {
    match category {
        "Food" => "#FF6B35",
        "Travel" => "#4A90E2",
        "Groceries" => "#2ECC71",
        "Medicine" => "#E74C3C",
        "Housing" => "#8E44AD",
        "Utilities" => "#F39C12",
        "Entertainment" => "#E91E63",
        "Shopping" => "#9C27B0",
        _ => "#6C757D",
    }
}

pub fn category_icon(category: &str) -> &'static str {
    match category {
        "Food" | "Groceries" => "🛒",
        "Travel" => "🚗",
        "Medicine" => "💊",
        "Housing" => "🏠",
        "Utilities" => "⚡",
        "Entertainment" => "🎬",
        "Shopping" => "🛍️",
        _ => "📦",
    }
}
