//! Coercions for numeric fields that existing clients send as strings.
//!
//! The web frontend submits form values verbatim, so `STOCK` may arrive as
//! `120` or `"120"`. Both shapes must bind as numbers.

use eyre::eyre;
use serde_json::Value;

/// Reads an integer field that may arrive as a JSON number or string.
pub fn as_int(field: &'static str, value: &Value) -> Result<i64, eyre::Report> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| eyre!("{field} is not an integer")),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| eyre!("{field} is not an integer")),
        _ => Err(eyre!("{field} is not an integer")),
    }
}

/// Reads a float field that may arrive as a JSON number or string.
pub fn as_float(field: &'static str, value: &Value) -> Result<f64, eyre::Report> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| eyre!("{field} is not a number")),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| eyre!("{field} is not a number")),
        _ => Err(eyre!("{field} is not a number")),
    }
}

/// Reads an identifier that may arrive as a JSON string or number.
pub fn as_text(field: &'static str, value: &Value) -> Result<String, eyre::Report> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(eyre!("{field} is not an id")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn int_accepts_numbers_and_strings() {
        assert_eq!(as_int("STOCK", &json!(120)).unwrap(), 120);
        assert_eq!(as_int("STOCK", &json!("120")).unwrap(), 120);
        assert_eq!(as_int("STOCK", &json!(" 7 ")).unwrap(), 7);
    }

    #[test]
    fn int_rejects_everything_else() {
        assert!(as_int("STOCK", &json!(1.5)).is_err());
        assert!(as_int("STOCK", &json!("a lot")).is_err());
        assert!(as_int("STOCK", &json!(null)).is_err());
    }

    #[test]
    fn float_accepts_numbers_and_strings() {
        assert_eq!(as_float("PRICE", &json!(4.5)).unwrap(), 4.5);
        assert_eq!(as_float("PRICE", &json!("4.50")).unwrap(), 4.5);
        assert_eq!(as_float("PRICE", &json!(3)).unwrap(), 3.0);
    }

    #[test]
    fn text_accepts_strings_and_numbers() {
        assert_eq!(as_text("ids", &json!("RX1")).unwrap(), "RX1");
        assert_eq!(as_text("ids", &json!(17)).unwrap(), "17");
        assert!(as_text("ids", &json!([])).is_err());
    }
}
