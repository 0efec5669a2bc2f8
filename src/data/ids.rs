use super::model::Value;

/// Canonical string form of an identifier cell.
///
/// Numeric ids that went through a float column come back as `"123.0"`;
/// the trailing `.0` is dropped when what remains is all digits.
pub fn normalize_id(raw: &str) -> String {
    let s = raw.trim();
    match s.strip_suffix(".0") {
        Some(head) if !head.is_empty() && head.bytes().all(|b| b.is_ascii_digit()) => {
            head.to_string()
        }
        _ => s.to_string(),
    }
}

/// [`normalize_id`] for a table cell; nulls become the empty string.
pub fn id_from_value(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_text)
        .map(|s| normalize_id(&s))
        .unwrap_or_default()
}

/// Trimmed display text of a cell; nulls and literal `nan` become empty.
pub fn clean_text(value: Option<&Value>) -> String {
    let Some(text) = value.and_then(Value::as_text) else {
        return String::new();
    };
    let text = text.trim();
    if text.eq_ignore_ascii_case("nan") {
        String::new()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_float_artifact_from_numeric_ids() {
        assert_eq!(normalize_id("123.0"), "123");
        assert_eq!(normalize_id(" 418 "), "418");
        assert_eq!(normalize_id("12.5"), "12.5");
        assert_eq!(normalize_id("abc.0"), "abc.0");
        assert_eq!(normalize_id(".0"), ".0");
    }

    #[test]
    fn id_cells_of_any_type_normalize() {
        assert_eq!(id_from_value(Some(&Value::Float(131.0))), "131");
        assert_eq!(id_from_value(Some(&Value::Integer(131))), "131");
        assert_eq!(id_from_value(Some(&Value::Null)), "");
        assert_eq!(id_from_value(None), "");
    }

    #[test]
    fn clean_text_hides_nan() {
        assert_eq!(clean_text(Some(&Value::String(" NaN ".into()))), "");
        assert_eq!(clean_text(Some(&Value::Float(f64::NAN))), "");
        assert_eq!(clean_text(Some(&Value::String(" 2:1 ".into()))), "2:1");
    }
}
