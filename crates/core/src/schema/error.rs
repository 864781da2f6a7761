use thiserror::Error;

/// Why a value failed its rule.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationReason {
    #[error("is required")]
    Required,
    #[error("is not allowed")]
    NotDeclared,
    #[error("must be one of [{0}]")]
    NotAllowed(String),
    #[error("must be a string")]
    NotAString,
    #[error("is not allowed to be empty")]
    Empty,
    #[error("must be a valid GUID")]
    InvalidGuid,
    #[error("must only contain alpha-numeric characters")]
    NotAlphanumeric,
    #[error("must be a valid email")]
    InvalidEmail,
    #[error("length must be at least {0} characters long")]
    TooShort(usize),
    #[error("length must be less than or equal to {0} characters long")]
    TooLong(usize),
    #[error("length must be {0} characters long")]
    WrongLength(usize),
    #[error("with value \"{value}\" fails to match the required pattern: {pattern}")]
    PatternMismatch { value: String, pattern: String },
    #[error("must only contain lowercase characters")]
    NotLowercase,
    #[error("must only contain uppercase characters")]
    NotUppercase,
    #[error("must not have leading or trailing whitespace")]
    NotTrimmed,
    #[error("must be a number")]
    NotANumber,
    #[error("must be an integer")]
    NotAnInteger,
    #[error("must be greater than or equal to {0}")]
    BelowMinimum(f64),
    #[error("must be less than or equal to {0}")]
    AboveMaximum(f64),
    #[error("must be a positive number")]
    NotPositive,
    #[error("must be a boolean")]
    NotABoolean,
}

/// First rule failure found while validating an item.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("\"{path}\" {reason}")]
pub struct ValidationError {
    pub path: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, reason: ValidationReason) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
