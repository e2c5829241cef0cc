//! Conversion of raw table cells into typed field values.
//!
//! A blank cell means "leave the field unset" and is distinct from a cell
//! that fails to parse. Parse failures are logged and returned as
//! [`CoercionError`], which still carries the raw text.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

/// Semantic type a capability accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Int,
    Long,
    Double,
    Float,
    Short,
    Byte,
    Bool,
    Decimal,
    /// Type without a dedicated rule (dates, codes); receives the raw text.
    Other(&'static str),
}

impl FieldType {
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Text => "String",
            FieldType::Int => "Integer",
            FieldType::Long => "Long",
            FieldType::Double => "Double",
            FieldType::Float => "Float",
            FieldType::Short => "Short",
            FieldType::Byte => "Byte",
            FieldType::Bool => "Boolean",
            FieldType::Decimal => "BigDecimal",
            FieldType::Other(name) => *name,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A converted cell.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i32),
    Long(i64),
    Double(f64),
    Float(f32),
    Short(i16),
    Byte(i8),
    Bool(bool),
    Decimal(Decimal),
}

impl FieldValue {
    /// Type this value satisfies. `Other` targets convert to `Text`.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Int(_) => FieldType::Int,
            FieldValue::Long(_) => FieldType::Long,
            FieldValue::Double(_) => FieldType::Double,
            FieldValue::Float(_) => FieldType::Float,
            FieldValue::Short(_) => FieldType::Short,
            FieldValue::Byte(_) => FieldType::Byte,
            FieldValue::Bool(_) => FieldType::Bool,
            FieldValue::Decimal(_) => FieldType::Decimal,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Long(v) => write!(f, "{}", v),
            FieldValue::Double(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Short(v) => write!(f, "{}", v),
            FieldValue::Byte(v) => write!(f, "{}", v),
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Decimal(v) => write!(f, "{}", v),
        }
    }
}

/// A non-blank cell that does not parse as its target type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unable to convert '{raw}' to {target}: {reason}")]
pub struct CoercionError {
    raw: String,
    target: FieldType,
    reason: String,
}

impl CoercionError {
    pub fn new(raw: impl Into<String>, target: FieldType, reason: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            target,
            reason: reason.into(),
        }
    }

    /// The unconverted cell text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn target(&self) -> FieldType {
        self.target
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// True for cells that carry no value.
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Convert `raw` to `target`.
///
/// - `Ok(None)`: blank cell, the field must not be set.
/// - `Ok(Some(v))`: converted value.
/// - `Err(e)`: numeric parse failure; `e.raw()` is the fallback text.
///
/// Booleans are lenient: only a case-insensitive `"true"` is `true`, every
/// other text (including typos) is `false`.
pub fn convert(raw: &str, target: FieldType) -> Result<Option<FieldValue>, CoercionError> {
    if is_blank(raw) {
        return Ok(None);
    }

    let converted = match target {
        FieldType::Text | FieldType::Other(_) => Ok(FieldValue::Text(raw.to_string())),
        FieldType::Int => parse(raw, target).map(FieldValue::Int),
        FieldType::Long => parse(raw, target).map(FieldValue::Long),
        FieldType::Double => parse_float(raw, target).map(FieldValue::Double),
        FieldType::Float => parse_float(raw, target).map(FieldValue::Float),
        FieldType::Short => parse(raw, target).map(FieldValue::Short),
        FieldType::Byte => parse(raw, target).map(FieldValue::Byte),
        FieldType::Bool => Ok(FieldValue::Bool(raw.eq_ignore_ascii_case("true"))),
        FieldType::Decimal => parse_decimal(raw).map(FieldValue::Decimal),
    };

    match converted {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            debug!(
                raw = %raw,
                field_type = %target,
                reason = %e.reason(),
                "Unable to convert value"
            );
            Err(e)
        }
    }
}

fn parse<T>(raw: &str, target: FieldType) -> Result<T, CoercionError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| CoercionError::new(raw, target, e.to_string()))
}

/// Surrounding whitespace is ignored. Of the special values only `NaN` and
/// `Infinity` (optionally signed) are accepted, spelled exactly so.
fn parse_float<T>(raw: &str, target: FieldType) -> Result<T, CoercionError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic())
        && !matches!(unsigned, "NaN" | "Infinity")
    {
        return Err(CoercionError::new(raw, target, "invalid float literal"));
    }

    parse(trimmed, target).map_err(|e| CoercionError::new(raw, target, e.reason()))
}

/// Plain notation keeps its scale ("1.50" stays 2 dp); exponents are accepted too.
///
/// Input that `Decimal` cannot hold exactly is rejected rather than rounded.
fn parse_decimal(raw: &str) -> Result<Decimal, CoercionError> {
    let error = |reason: String| CoercionError::new(raw, FieldType::Decimal, reason);

    if raw.contains('_') {
        return Err(error("digit separators are not allowed".to_string()));
    }

    let scientific = raw.contains(['e', 'E']);
    let value = if scientific {
        Decimal::from_scientific(raw)
    } else {
        Decimal::from_str(raw)
    }
    .map_err(|e| error(e.to_string()))?;

    let mantissa = raw.split_once(['e', 'E']).map_or(raw, |(m, _)| m);
    let digits_kept =
        significant_digits(mantissa) == significant_digits(&value.mantissa().to_string());
    let scale_kept = scientific
        || mantissa.split_once('.').map_or(0, |(_, frac)| frac.len()) == value.scale() as usize;

    if digits_kept && scale_kept {
        Ok(value)
    } else {
        Err(error(format!(
            "exceeds decimal precision (scale at most {})",
            Decimal::MAX_SCALE
        )))
    }
}

/// Digits with leading and trailing zeros removed.
fn significant_digits(text: &str) -> String {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits
        .trim_start_matches('0')
        .trim_end_matches('0')
        .to_string()
}
