//! Number formatting for the tables and the entry form

/// Rates always carry 5 fraction digits
pub fn format_rate(rate: f64) -> String {
    format!("{:.5}", rate)
}

/// Round a rate the way the form stores it
pub fn round_rate(rate: f64) -> f64 {
    format_rate(rate).parse().unwrap_or(rate)
}

/// Amount with thousands grouping and up to 3 fraction digits, e.g. `1,234.5`
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.3}", amount);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    group(trimmed)
}

/// Amount with thousands grouping and exactly 2 fraction digits, e.g. `1,234.50`
pub fn format_money(amount: f64) -> String {
    group(&format!("{:.2}", amount))
}

/// Insert `,` between thousands in the integer part of a plain decimal string
fn group(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0" after rounding reads as plain zero
    let sign = if grouped.chars().all(|c| c == '0' || c == ',')
        && frac_part.map_or(true, |f| f.chars().all(|c| c == '0'))
    {
        ""
    } else {
        sign
    };

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
