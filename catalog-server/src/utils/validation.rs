//! Input validation helpers
//!
//! Centralized text length constants and field checks. Every check records
//! its failure into a [`ValidationErrors`] collector instead of returning
//! early, so a single response lists all failing fields.

use std::fmt;

use rust_decimal::Decimal;
use shared::error::FieldError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, category
pub const MAX_NAME_LEN: usize = 200;

/// Product names shorter than this are rejected
pub const MIN_PRODUCT_NAME_LEN: usize = 2;

/// Category names must not be empty
pub const MIN_CATEGORY_NAME_LEN: usize = 1;

/// Descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Monetary limits ─────────────────────────────────────────────────

/// Highest accepted unit price
///
/// `MAX_PRICE * u32::MAX` stays far below `Decimal::MAX`, so stock values
/// and their totals cannot overflow for any realistic catalog size.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

// ── Collector ───────────────────────────────────────────────────────

/// Ordered list of failing fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<FieldError> {
        self.fields
    }

    /// `Ok(())` when nothing failed
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ── Field checks ────────────────────────────────────────────────────

/// Validate a name and return it trimmed.
///
/// `None` input means the field was absent, which fails only when `required`.
pub fn check_name(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    min_len: usize,
    required: bool,
) -> Option<String> {
    let Some(value) = value else {
        if required {
            errors.add(field, "is required");
        }
        return None;
    };

    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min_len {
        if min_len <= 1 {
            errors.add(field, "must not be empty");
        } else {
            errors.add(field, format!("must be at least {min_len} characters"));
        }
        return None;
    }
    if len > MAX_NAME_LEN {
        errors.add(
            field,
            format!("is too long ({len} chars, max {MAX_NAME_LEN})"),
        );
        return None;
    }
    Some(trimmed.to_string())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn check_optional_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max_len: usize,
) {
    if let Some(v) = value {
        let len = v.chars().count();
        if len > max_len {
            errors.add(field, format!("is too long ({len} chars, max {max_len})"));
        }
    }
}

pub fn check_price(
    errors: &mut ValidationErrors,
    value: Option<Decimal>,
    required: bool,
) -> Option<Decimal> {
    match value {
        None => {
            if required {
                errors.add("price", "is required");
            }
            None
        }
        Some(price) if price.is_sign_negative() && !price.is_zero() => {
            errors.add("price", "must be >= 0");
            None
        }
        Some(price) if price > MAX_PRICE => {
            errors.add("price", format!("must be at most {MAX_PRICE}"));
            None
        }
        Some(price) => Some(price.normalize()),
    }
}

pub fn check_quantity(
    errors: &mut ValidationErrors,
    value: Option<i64>,
    required: bool,
) -> Option<u32> {
    match value {
        None => {
            if required {
                errors.add("quantity", "is required");
            }
            None
        }
        Some(q) if q < 0 => {
            errors.add("quantity", "must be a non-negative integer");
            None
        }
        Some(q) => match u32::try_from(q) {
            Ok(q) => Some(q),
            Err(_) => {
                errors.add("quantity", format!("must be at most {}", u32::MAX));
                None
            }
        },
    }
}
