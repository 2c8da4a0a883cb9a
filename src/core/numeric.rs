/// Half-up rounding to `decimals` fractional digits. `f64::EPSILON` is added
/// before scaling so values such as `1.005` land on the intended side.
pub fn round(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    ((value + f64::EPSILON) * factor + 0.5).floor() / factor
}

pub fn round2(value: f64) -> f64 {
    round(value, 2)
}

/// Nearest integer, halves away from zero. NaN maps to 0 and infinities
/// saturate at the `i64` bounds.
pub fn round_int(value: f64) -> i64 {
    value.round() as i64
}

/// Rupee amount with Indian digit grouping, e.g. `₹11,61,695`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}₹{}", group_indian(rounded.abs() as u64))
}

/// Short form used in summaries: crore, lakh and thousand suffixes.
pub fn format_compact(amount: f64) -> String {
    let magnitude = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };
    if magnitude >= 10_000_000.0 {
        format!("{sign}₹{:.2} Cr", magnitude / 10_000_000.0)
    } else if magnitude >= 100_000.0 {
        format!("{sign}₹{:.2} L", magnitude / 100_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{sign}₹{:.1}K", magnitude / 1_000.0)
    } else {
        format_currency(amount)
    }
}

// Last three digits form one group, every two digits before that another.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}
