// ---------------------------------------------------------------------------
// Number formatting for KPI rows
// ---------------------------------------------------------------------------

/// How a KPI value is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// Whole number: `17`.
    Count,
    /// Two decimals: `26.41`.
    Decimal,
    /// Share as percent with one decimal: `0.645` → `64.5%`.
    Percent,
    /// Whole number with thousands separators: `1,250,000`.
    Thousands,
}

impl NumberFormat {
    /// Formatted value, or `-` when missing.
    pub fn show(self, value: Option<f64>) -> String {
        let Some(v) = value.filter(|v| !v.is_nan()) else {
            return "-".to_string();
        };
        match self {
            NumberFormat::Count => format!("{v:.0}"),
            NumberFormat::Decimal => format!("{v:.2}"),
            NumberFormat::Percent => format!("{:.1}%", v * 100.0),
            NumberFormat::Thousands => group_thousands(v),
        }
    }
}

fn group_thousands(v: f64) -> String {
    let rounded = format!("{:.0}", v.abs());
    let digits = rounded.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if v < 0.0 && rounded != "0" {
        out.push('-');
    }
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*d as char);
    }
    out
}

/// Clamp a share to `[0, 1]`; missing or NaN becomes 0.
pub fn clamp01(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v.clamp(0.0, 1.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_match_the_kpi_rows() {
        assert_eq!(NumberFormat::Count.show(Some(17.0)), "17");
        assert_eq!(NumberFormat::Decimal.show(Some(26.406)), "26.41");
        assert_eq!(NumberFormat::Percent.show(Some(0.645)), "64.5%");
        assert_eq!(NumberFormat::Thousands.show(Some(1_250_000.4)), "1,250,000");
        assert_eq!(NumberFormat::Thousands.show(Some(-999.0)), "-999");
        assert_eq!(NumberFormat::Thousands.show(Some(100_000.0)), "100,000");
    }

    #[test]
    fn missing_values_render_as_dash() {
        assert_eq!(NumberFormat::Decimal.show(None), "-");
        assert_eq!(NumberFormat::Count.show(Some(f64::NAN)), "-");
    }

    #[test]
    fn shares_are_clamped() {
        assert_eq!(clamp01(Some(1.4)), 1.0);
        assert_eq!(clamp01(Some(-0.2)), 0.0);
        assert_eq!(clamp01(Some(0.3)), 0.3);
        assert_eq!(clamp01(None), 0.0);
        assert_eq!(clamp01(Some(f64::NAN)), 0.0);
    }
}
