//! Rule evaluation.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};
use uuid::Uuid;

use crate::Attributes;

use super::error::{ValidationError, ValidationReason, ValidationResult};
use super::rules::{BooleanRule, NumberCheck, NumberRule, Rule, StringCheck, StringRule};
use super::types::SchemaDescriptor;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

impl Rule {
    /// Validates a single attribute value.
    ///
    /// `value` is `None` when the attribute is absent. Returns the validated
    /// (possibly converted) value, or `None` for an absent optional one.
    pub fn validate(&self, path: &str, value: Option<&Value>) -> ValidationResult<Option<Value>> {
        let common = self.common();
        let path = common.label.as_deref().unwrap_or(path);

        let Some(value) = value else {
            if common.required {
                return Err(ValidationError::new(path, ValidationReason::Required));
            }
            return Ok(None);
        };

        let validated = match self {
            Rule::Any(_) => Ok(value.clone()),
            Rule::String(rule) => validate_string(rule, value),
            Rule::Number(rule) => validate_number(rule, value),
            Rule::Boolean(rule) => validate_boolean(rule, value),
        }
        .map_err(|reason| ValidationError::new(path, reason))?;

        // The allow-list sees the converted value.
        if !common.allowed.is_empty() && !common.allowed.contains(&validated) {
            let allowed = common
                .allowed
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ValidationError::new(
                path,
                ValidationReason::NotAllowed(allowed),
            ));
        }

        Ok(Some(validated))
    }
}

fn validate_string(rule: &StringRule, value: &Value) -> Result<Value, ValidationReason> {
    let Value::String(raw) = value else {
        return Err(ValidationReason::NotAString);
    };
    let convert = rule.common.convert;
    let mut s = raw.clone();

    // Normalising modifiers run before any check sees the value.
    for check in &rule.checks {
        match check {
            StringCheck::Trim if convert => s = s.trim().to_string(),
            StringCheck::Trim if s.trim() != s => return Err(ValidationReason::NotTrimmed),
            StringCheck::Lowercase if convert => s = s.to_lowercase(),
            StringCheck::Lowercase if s.to_lowercase() != s => {
                return Err(ValidationReason::NotLowercase)
            }
            StringCheck::Uppercase if convert => s = s.to_uppercase(),
            StringCheck::Uppercase if s.to_uppercase() != s => {
                return Err(ValidationReason::NotUppercase)
            }
            _ => {}
        }
    }

    if s.is_empty() {
        return Err(ValidationReason::Empty);
    }

    for check in &rule.checks {
        match check {
            StringCheck::Guid if Uuid::try_parse(&s).is_err() => {
                return Err(ValidationReason::InvalidGuid)
            }
            StringCheck::Alphanum if !s.chars().all(|c| c.is_ascii_alphanumeric()) => {
                return Err(ValidationReason::NotAlphanumeric)
            }
            StringCheck::Email if !EMAIL.is_match(&s) => return Err(ValidationReason::InvalidEmail),
            StringCheck::Min(limit) if s.chars().count() < *limit => {
                return Err(ValidationReason::TooShort(*limit))
            }
            StringCheck::Max(limit) if s.chars().count() > *limit => {
                return Err(ValidationReason::TooLong(*limit))
            }
            StringCheck::Length(limit) if s.chars().count() != *limit => {
                return Err(ValidationReason::WrongLength(*limit))
            }
            StringCheck::Pattern(pattern) if !pattern.is_match(&s) => {
                return Err(ValidationReason::PatternMismatch {
                    value: s,
                    pattern: pattern.as_str().to_string(),
                })
            }
            _ => {}
        }
    }

    Ok(Value::String(s))
}

fn validate_number(rule: &NumberRule, value: &Value) -> Result<Value, ValidationReason> {
    let converted = match value {
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) if rule.common.convert => {
            parse_number(s.trim()).ok_or(ValidationReason::NotANumber)?
        }
        _ => return Err(ValidationReason::NotANumber),
    };
    let n = converted.as_f64().ok_or(ValidationReason::NotANumber)?;

    for check in &rule.checks {
        match *check {
            NumberCheck::Integer if n.fract() != 0.0 => return Err(ValidationReason::NotAnInteger),
            NumberCheck::Min(limit) if n < limit => {
                return Err(ValidationReason::BelowMinimum(limit))
            }
            NumberCheck::Max(limit) if n > limit => {
                return Err(ValidationReason::AboveMaximum(limit))
            }
            NumberCheck::Positive if n <= 0.0 => return Err(ValidationReason::NotPositive),
            _ => {}
        }
    }

    Ok(converted)
}

fn parse_number(s: &str) -> Option<Value> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::from(i));
    }
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn validate_boolean(rule: &BooleanRule, value: &Value) -> Result<Value, ValidationReason> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::String(s) if rule.common.convert => match s.to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(ValidationReason::NotABoolean),
        },
        _ => Err(ValidationReason::NotABoolean),
    }
}

/// Validates an item against every attribute rule of a schema.
///
/// Attributes are checked in declaration order and the first failure is
/// returned. Attributes the schema does not declare are rejected after the
/// declared ones pass. On success the validated value set is returned.
pub fn validate_attributes(
    schema: &SchemaDescriptor,
    attributes: &Attributes,
) -> ValidationResult<Attributes> {
    let mut validated = Attributes::new();

    for (name, descriptor) in schema.iter() {
        if let Some(value) = descriptor.validator().validate(name, attributes.get(name))? {
            validated.insert(name.to_string(), value);
        }
    }

    if let Some(undeclared) = attributes.keys().find(|k| !schema.contains(k)) {
        return Err(ValidationError::new(
            undeclared.as_str(),
            ValidationReason::NotDeclared,
        ));
    }

    Ok(validated)
}
