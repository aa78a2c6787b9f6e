//!
//! # Value Coercion
//!
//! Maps leaf [LibExpr]s to JSON scalars.
//!

// Crates.io Imports
use log::{debug, trace};
use serde_json::Value;

// Local Imports
use crate::data::{LibExpr, LibExprValue};

/// `valtype` for defines which declare none
pub const UNDEFINED_VALUETYPE: &str = "undefined_valuetype";

/// Coerce expression `expr` to a JSON scalar.
///
/// * Images of exactly `true` or `false` become integers `1` and `0`, regardless of kind.
/// * Integers and reals become JSON numbers of their typed values.
/// * Strings become their string-value, sans quotes.
/// * Everything else becomes its image, as a JSON string.
///
/// Returns `None` for expressions with no image, which contribute nothing.
pub fn coerce(expr: &LibExpr) -> Option<Value> {
    let image = match expr.image {
        Some(ref image) => image,
        None => {
            trace!("Skipping image-less {} expression", expr.kind());
            return None;
        }
    };
    match image.as_str() {
        "true" => return Some(Value::from(1)),
        "false" => return Some(Value::from(0)),
        _ => (),
    }
    let val = match expr.value {
        LibExprValue::Int(i) => Value::from(i),
        LibExprValue::Real(f) if f.is_finite() => Value::from(f),
        LibExprValue::Real(_) => {
            // No JSON representation for NaN and infinities
            debug!("Non-finite real `{}` projected as its image", image);
            Value::from(image.as_str())
        }
        LibExprValue::Str(ref s) => Value::from(s.as_str()),
        LibExprValue::Generic => Value::from(image.as_str()),
        LibExprValue::Unknown(ref kind) => {
            debug!("Unknown expression kind `{}` projected as its image", kind);
            Value::from(image.as_str())
        }
    };
    Some(val)
}

/// Rewrite Liberty value-type tokens to their projected names:
/// `integer` to `int32` and `float` to `float64`. All others pass through.
pub fn normalize_type_name(name: &str) -> String {
    match name {
        "integer" => String::from("int32"),
        "float" => String::from("float64"),
        other => other.to_string(),
    }
}

/// Text of a projected scalar, for use as a name or type-token.
/// Strings yield their content, other values their JSON text.
pub(crate) fn scalar_text(val: &Value) -> String {
    match val {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_typed_values() {
        assert_eq!(coerce(&LibExpr::int(42)), Some(json!(42)));
        assert_eq!(coerce(&LibExpr::int(-7)), Some(json!(-7)));
        assert_eq!(coerce(&LibExpr::real(0.0035)), Some(json!(0.0035)));
        assert!(coerce(&LibExpr::real(1.5)).unwrap().is_f64());
        assert_eq!(coerce(&LibExpr::string("A & B")), Some(json!("A & B")));
        assert_eq!(coerce(&LibExpr::generic("input")), Some(json!("input")));
        assert_eq!(coerce(&LibExpr::generic("1ns")), Some(json!("1ns")));
    }
    #[test]
    fn numbers_follow_typed_accessors_not_images() {
        // Image and typed value disagree: the typed value wins
        let e = LibExpr {
            image: Some(String::from("1.000")),
            value: LibExprValue::Real(1.0),
        };
        assert_eq!(coerce(&e), Some(json!(1.0)));
        let e = LibExpr {
            image: Some(String::from("+0012")),
            value: LibExprValue::Int(12),
        };
        assert_eq!(coerce(&e), Some(json!(12)));
    }
    #[test]
    fn coerces_booleans_first() {
        assert_eq!(coerce(&LibExpr::generic("true")), Some(json!(1)));
        assert_eq!(coerce(&LibExpr::generic("false")), Some(json!(0)));
        // String-kind carrying literal `true` as its image
        let e = LibExpr {
            image: Some(String::from("true")),
            value: LibExprValue::Str(String::from("true")),
        };
        assert_eq!(coerce(&e), Some(json!(1)));
        // Only exact matches
        assert_eq!(coerce(&LibExpr::generic("True")), Some(json!("True")));
        assert_eq!(coerce(&LibExpr::generic("falsey")), Some(json!("falsey")));
    }
    #[test]
    fn skips_absent_images() {
        let e = LibExpr {
            image: None,
            value: LibExprValue::Int(3),
        };
        assert_eq!(coerce(&e), None);
        let e = LibExpr {
            image: None,
            value: LibExprValue::Generic,
        };
        assert_eq!(coerce(&e), None);
    }
    #[test]
    fn unknown_kinds_fall_back_to_images() {
        let e = LibExpr::unknown("bus_range", "A[0:3]");
        assert_eq!(coerce(&e), Some(json!("A[0:3]")));
    }
    #[test]
    fn non_finite_reals_fall_back_to_images() {
        let e = LibExpr {
            image: Some(String::from("inf")),
            value: LibExprValue::Real(f64::INFINITY),
        };
        assert_eq!(coerce(&e), Some(json!("inf")));
    }
    #[test]
    fn normalizes_type_names() {
        assert_eq!(normalize_type_name("integer"), "int32");
        assert_eq!(normalize_type_name("float"), "float64");
        assert_eq!(normalize_type_name("string"), "string");
        assert_eq!(normalize_type_name("boolean"), "boolean");
        assert_eq!(normalize_type_name("Integer"), "Integer");
    }
}
