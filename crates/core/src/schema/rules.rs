//! Strongly typed validation-rule builder.
//!
//! A [`Rules`] handle is passed to a schema-builder function, which uses it
//! to create one rule per attribute. Each typed rule only exposes the
//! modifiers that make sense for its value type, so `guid()` exists on a
//! string rule but not on a number rule.

use regex::Regex;
use serde_json::Value;

/// Handle that creates validation rules.
///
/// When `convert` is on (the default), rules may normalise the value they
/// validate: numeric strings become numbers, `trim()` strips whitespace and
/// so on. [`Rules::strict`] turns conversion off so modifiers only check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    convert: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

impl Rules {
    pub fn new() -> Self {
        Self { convert: true }
    }

    pub fn strict() -> Self {
        Self { convert: false }
    }

    pub fn converts(&self) -> bool {
        self.convert
    }

    /// A rule that accepts any value, including `null`.
    pub fn any(&self) -> AnyRule {
        AnyRule {
            common: Common::new(self.convert),
        }
    }

    pub fn string(&self) -> StringRule {
        StringRule {
            common: Common::new(self.convert),
            checks: Vec::new(),
        }
    }

    pub fn number(&self) -> NumberRule {
        NumberRule {
            common: Common::new(self.convert),
            checks: Vec::new(),
        }
    }

    pub fn boolean(&self) -> BooleanRule {
        BooleanRule {
            common: Common::new(self.convert),
        }
    }
}

/// Settings shared by every rule type.
#[derive(Debug, Clone)]
pub(crate) struct Common {
    pub(crate) convert: bool,
    pub(crate) required: bool,
    pub(crate) allowed: Vec<Value>,
    pub(crate) label: Option<String>,
}

impl Common {
    fn new(convert: bool) -> Self {
        Self {
            convert,
            required: false,
            allowed: Vec::new(),
            label: None,
        }
    }
}

macro_rules! common_modifiers {
    ($rule:ty) => {
        impl $rule {
            /// The attribute must be present.
            pub fn required(mut self) -> Self {
                self.common.required = true;
                self
            }

            /// The attribute may be absent (the default).
            pub fn optional(mut self) -> Self {
                self.common.required = false;
                self
            }

            /// Restricts the attribute to the given values.
            pub fn valid<I, V>(mut self, values: I) -> Self
            where
                I: IntoIterator<Item = V>,
                V: Into<Value>,
            {
                self.common.allowed.extend(values.into_iter().map(Into::into));
                self
            }

            /// Name used for the attribute in error messages.
            pub fn label(mut self, label: impl Into<String>) -> Self {
                self.common.label = Some(label.into());
                self
            }
        }
    };
}

#[derive(Debug, Clone)]
pub struct AnyRule {
    pub(crate) common: Common,
}

common_modifiers!(AnyRule);

#[derive(Debug, Clone)]
pub(crate) enum StringCheck {
    Guid,
    Alphanum,
    Email,
    Min(usize),
    Max(usize),
    Length(usize),
    Pattern(Regex),
    Lowercase,
    Uppercase,
    Trim,
}

#[derive(Debug, Clone)]
pub struct StringRule {
    pub(crate) common: Common,
    pub(crate) checks: Vec<StringCheck>,
}

common_modifiers!(StringRule);

impl StringRule {
    /// Value must parse as a UUID/GUID.
    pub fn guid(mut self) -> Self {
        self.checks.push(StringCheck::Guid);
        self
    }

    /// Value may only contain ASCII letters and digits.
    pub fn alphanum(mut self) -> Self {
        self.checks.push(StringCheck::Alphanum);
        self
    }

    pub fn email(mut self) -> Self {
        self.checks.push(StringCheck::Email);
        self
    }

    /// Minimum length in characters.
    pub fn min(mut self, limit: usize) -> Self {
        self.checks.push(StringCheck::Min(limit));
        self
    }

    /// Maximum length in characters.
    pub fn max(mut self, limit: usize) -> Self {
        self.checks.push(StringCheck::Max(limit));
        self
    }

    /// Exact length in characters.
    pub fn length(mut self, limit: usize) -> Self {
        self.checks.push(StringCheck::Length(limit));
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.checks.push(StringCheck::Pattern(pattern));
        self
    }

    pub fn lowercase(mut self) -> Self {
        self.checks.push(StringCheck::Lowercase);
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.checks.push(StringCheck::Uppercase);
        self
    }

    pub fn trim(mut self) -> Self {
        self.checks.push(StringCheck::Trim);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum NumberCheck {
    Integer,
    Min(f64),
    Max(f64),
    Positive,
}

#[derive(Debug, Clone)]
pub struct NumberRule {
    pub(crate) common: Common,
    pub(crate) checks: Vec<NumberCheck>,
}

common_modifiers!(NumberRule);

impl NumberRule {
    pub fn integer(mut self) -> Self {
        self.checks.push(NumberCheck::Integer);
        self
    }

    pub fn min(mut self, limit: f64) -> Self {
        self.checks.push(NumberCheck::Min(limit));
        self
    }

    pub fn max(mut self, limit: f64) -> Self {
        self.checks.push(NumberCheck::Max(limit));
        self
    }

    pub fn positive(mut self) -> Self {
        self.checks.push(NumberCheck::Positive);
        self
    }
}

#[derive(Debug, Clone)]
pub struct BooleanRule {
    pub(crate) common: Common,
}

common_modifiers!(BooleanRule);

/// Any validation rule, as stored in an attribute descriptor.
#[derive(Debug, Clone)]
pub enum Rule {
    Any(AnyRule),
    String(StringRule),
    Number(NumberRule),
    Boolean(BooleanRule),
}

impl Rule {
    pub(crate) fn common(&self) -> &Common {
        match self {
            Rule::Any(rule) => &rule.common,
            Rule::String(rule) => &rule.common,
            Rule::Number(rule) => &rule.common,
            Rule::Boolean(rule) => &rule.common,
        }
    }

    pub fn is_required(&self) -> bool {
        self.common().required
    }

    pub fn label(&self) -> Option<&str> {
        self.common().label.as_deref()
    }
}

impl From<AnyRule> for Rule {
    fn from(rule: AnyRule) -> Self {
        Rule::Any(rule)
    }
}

impl From<StringRule> for Rule {
    fn from(rule: StringRule) -> Self {
        Rule::String(rule)
    }
}

impl From<NumberRule> for Rule {
    fn from(rule: NumberRule) -> Self {
        Rule::Number(rule)
    }
}

impl From<BooleanRule> for Rule {
    fn from(rule: BooleanRule) -> Self {
        Rule::Boolean(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_default_to_converting() {
        assert!(Rules::new().converts());
        assert!(Rules::default().converts());
        assert!(!Rules::strict().converts());
    }

    #[test]
    fn test_required_and_optional_toggle() {
        let rules = Rules::new();
        let rule: Rule = rules.string().required().into();
        assert!(rule.is_required());

        let rule: Rule = rules.string().required().optional().into();
        assert!(!rule.is_required());
    }

    #[test]
    fn test_rules_inherit_convert_flag() {
        let rule = Rules::strict().number();
        assert!(!rule.common.convert);
    }

    #[test]
    fn test_label_is_exposed() {
        let rule: Rule = Rules::new().any().label("Account name").into();
        assert_eq!(rule.label(), Some("Account name"));
    }

    #[test]
    fn test_string_modifiers_accumulate_in_order() {
        let rule = Rules::new().string().alphanum().min(3).max(50);
        assert_eq!(rule.checks.len(), 3);
        assert!(matches!(rule.checks[1], StringCheck::Min(3)));
    }
}
