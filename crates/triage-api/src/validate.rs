//! Boundary validation for request bodies and path parameters.
//!
//! Form front-ends send numbers as strings, so numeric fields accept either a
//! JSON number or a string that parses as one.

use serde_json::Value;
use triage_core::patient::{PainLevel, PatientId, PriorityClass};

use crate::ApiError;

/// `Some` only for a string with non-whitespace content.
pub fn present(s: Option<String>) -> Option<String> {
  s.filter(|s| !s.trim().is_empty())
}

fn number(field: &str, value: &Value) -> Result<f64, ApiError> {
  let n = match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  };
  n.filter(|n| n.is_finite())
    .ok_or_else(|| ApiError::BadRequest(format!("{field} must be a number")))
}

/// Pain level: whole number in 1..=10.
pub fn pain_level(value: &Value) -> Result<i64, ApiError> {
  let n = number("pain_level", value)?;
  let pain = PainLevel::try_from(n)
    .map_err(|_| ApiError::BadRequest("pain level must be 1–10".into()))?;
  Ok(i64::from(pain))
}

/// Age: positive whole number.
pub fn age(value: &Value) -> Result<u32, ApiError> {
  let n = number("age", value)?;
  if n.fract() != 0.0 || n < 1.0 || n > f64::from(u32::MAX) {
    return Err(ApiError::BadRequest("age must be a positive whole number".into()));
  }
  Ok(n as u32)
}

/// Staff-set priority: positive whole number that fits the class range.
pub fn priority_class(value: &Value) -> Result<PriorityClass, ApiError> {
  let n = number("priority_class", value)?;
  if n.fract() != 0.0 || n < 1.0 || n > f64::from(i32::MAX) {
    return Err(ApiError::BadRequest(format!(
      "priority_class must be a positive integer, got {value}"
    )));
  }
  Ok(PriorityClass(n as i32))
}

/// Parse a path segment into the canonical id type.
pub fn patient_id(raw: &str) -> Result<PatientId, ApiError> {
  Ok(raw.parse::<PatientId>()?)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn pain_accepts_numbers_and_numeric_strings() {
    assert_eq!(pain_level(&json!(7)).unwrap(), 7);
    assert_eq!(pain_level(&json!("7")).unwrap(), 7);
    assert_eq!(pain_level(&json!(" 10 ")).unwrap(), 10);
    assert_eq!(pain_level(&json!(8.0)).unwrap(), 8);
  }

  #[test]
  fn pain_rejects_out_of_domain() {
    for bad in [json!(0), json!(11), json!(3.5), json!("3.5"), json!("seven"), json!(null)] {
      assert!(
        matches!(pain_level(&bad), Err(ApiError::BadRequest(_))),
        "{bad} accepted"
      );
    }
  }

  #[test]
  fn age_must_be_positive_whole() {
    assert_eq!(age(&json!("34")).unwrap(), 34);
    assert!(age(&json!(0)).is_err());
    assert!(age(&json!(-4)).is_err());
    assert!(age(&json!(2.5)).is_err());
    assert!(age(&json!(true)).is_err());
  }

  #[test]
  fn priority_must_be_positive_whole() {
    assert_eq!(priority_class(&json!(1)).unwrap(), PriorityClass::URGENT);
    assert_eq!(priority_class(&json!("2")).unwrap(), PriorityClass::SOON);
    assert_eq!(priority_class(&json!(12.0)).unwrap(), PriorityClass(12));
    for bad in [json!(0), json!(-1), json!(1.5), json!("1.5"), json!("urgent"), json!(i64::MAX)] {
      assert!(
        matches!(priority_class(&bad), Err(ApiError::BadRequest(_))),
        "{bad} accepted"
      );
    }
  }

  #[test]
  fn ids_parse_numerically() {
    assert_eq!(patient_id("0042").unwrap(), PatientId(42));
    assert!(matches!(patient_id("abc"), Err(ApiError::BadRequest(_))));
  }
}
