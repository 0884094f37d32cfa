const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

/// Formats rupees the way the advisor reports them: crores and lakhs with one
/// decimal, smaller sums as whole rupees with comma separators.
pub fn format_inr(amount: f64) -> String {
    if amount >= CRORE {
        format!("₹{:.1}Cr", amount / CRORE)
    } else if amount >= LAKH {
        format!("₹{:.1}L", amount / LAKH)
    } else {
        format!("₹{}", group_thousands(amount.round() as i64))
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
