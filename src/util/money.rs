//! Colombian peso formatting.

#[cfg(test)]
#[path = "money_test.rs"]
mod money_test;

/// Whole Colombian pesos. The airline never prices in cents.
pub type Cop = u64;

/// Largest single price accepted from the backend.
pub const MAX_COP: Cop = 1_000_000_000_000;

/// `180000` → `"$180.000"` (dot as thousands separator, no decimals).
pub fn format_cop(amount: Cop) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

/// `"$180.000 COP"`.
pub fn format_cop_label(amount: Cop) -> String {
    format!("{} COP", format_cop(amount))
}

/// Free services read `"Gratis"` instead of `$0`.
pub fn format_service_price(amount: Cop) -> String {
    if amount == 0 {
        "Gratis".to_owned()
    } else {
        format_cop_label(amount)
    }
}
