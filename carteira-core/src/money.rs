//! Display formatting: pt-BR currency, percentages, bounded bars.
//!
//! Rounding to cents happens here and nowhere else.

/// Format `value` as Brazilian reais: `R$ 1.234,56`, negatives as `-R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let negative = value < 0.0 && cents > 0;

    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!(
        "{}R$ {},{:02}",
        if negative { "-" } else { "" },
        grouped,
        cents % 100
    )
}

/// One decimal, decimal comma: `150,0%`.
pub fn format_percent(pct: f64) -> String {
    let pct = if pct.is_finite() { pct } else { 0.0 };
    format!("{:.1}%", pct).replace('.', ",")
}

/// Bar of `width` cells filled to `fraction`, clamped into `[0, 1]`.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width - filled));
    bar
}
