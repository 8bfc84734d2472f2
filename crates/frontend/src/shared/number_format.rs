//! Number formatting for cards, tooltips and lists

/// Money with two decimals and a space between thousands
///
/// # Examples
///
/// ```
/// use frontend::shared::number_format::format_money;
/// assert_eq!(format_money(1234567.891), "1 234 567.89");
/// ```
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let (integer_part, decimal_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    format!("{}.{}", group_thousands(integer_part), decimal_part)
}

/// Whole count with thousands separator
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(' ');
        }
        result.push(ch);
    }
    format!("{}{}", sign, result)
}
