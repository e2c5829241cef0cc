//! Gherkin data table parsing and value resolution.
//!
//! Step tables arrive as rows of cells. Row 0 holds field names, row 1 the
//! values. Older feature files use a fixed column order without meaningful
//! headers, so every mandatory field is resolved by name first and by
//! position second.

use std::str::FromStr;

use indexmap::IndexMap;

/// Errors for mandatory table input. These abort the step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("data table has no values row (found {0} row(s))")]
    MissingValuesRow(usize),

    #[error("mandatory field '{field}' not found by name or at column {index}")]
    MissingField { field: String, index: usize },

    #[error("mandatory field '{field}' has invalid value '{value}': {reason}")]
    InvalidField {
        field: String,
        value: String,
        reason: String,
    },
}

/// Header and values rows of a two-row data table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTable {
    header: Vec<String>,
    values: Vec<String>,
}

impl RowTable {
    /// Take the first two rows of a table. Extra rows are ignored.
    pub fn from_rows(rows: &[Vec<String>]) -> Result<Self, TableError> {
        match rows {
            [header, values, ..] => Ok(Self {
                header: header.clone(),
                values: values.clone(),
            }),
            _ => Err(TableError::MissingValuesRow(rows.len())),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Zip header and values into a [`FieldMap`].
    pub fn field_map(&self) -> FieldMap {
        FieldMap::from_columns(&self.header, &self.values)
    }
}

/// Field name to raw cell value, in header order.
///
/// Columns are zipped up to the shorter of the two rows. A repeated header
/// name keeps its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: IndexMap<String, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(header: &[String], values: &[String]) -> Self {
        let entries = header
            .iter()
            .zip(values.iter())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Which strategy produced a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Found under its header name.
    Named,
    /// Taken from the values row by column index.
    Positional,
}

/// A resolved cell and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub value: &'a str,
    pub source: Lookup,
}

/// Named-first, positional-fallback lookup over one table row.
#[derive(Debug, Clone, Copy)]
pub struct ValueResolver<'a> {
    fields: Option<&'a FieldMap>,
    positional: &'a [String],
}

impl<'a> ValueResolver<'a> {
    pub fn new(fields: &'a FieldMap, positional: &'a [String]) -> Self {
        Self {
            fields: Some(fields),
            positional,
        }
    }

    /// Resolver for fixed-column tables; header names are ignored.
    pub fn positional(positional: &'a [String]) -> Self {
        Self {
            fields: None,
            positional,
        }
    }

    pub fn by_name(&self, name: &str) -> Option<&'a str> {
        self.fields.and_then(|fields| fields.get(name))
    }

    pub fn by_position(&self, index: usize) -> Option<&'a str> {
        self.positional.get(index).map(String::as_str)
    }

    pub fn resolve_with_source(&self, index: usize, name: &str) -> Option<Resolved<'a>> {
        if let Some(value) = self.by_name(name) {
            return Some(Resolved {
                value,
                source: Lookup::Named,
            });
        }
        self.by_position(index).map(|value| Resolved {
            value,
            source: Lookup::Positional,
        })
    }

    pub fn resolve(&self, index: usize, name: &str) -> Option<&'a str> {
        self.resolve_with_source(index, name).map(|r| r.value)
    }

    /// Resolve a mandatory field; absence fails the step.
    pub fn require(&self, index: usize, name: &str) -> Result<&'a str, TableError> {
        self.resolve(index, name).ok_or_else(|| TableError::MissingField {
            field: name.to_string(),
            index,
        })
    }

    /// Resolve and parse a mandatory field; absence or a bad value fails the step.
    pub fn require_parsed<T>(&self, index: usize, name: &str) -> Result<T, TableError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.require(index, name)?;
        raw.parse::<T>().map_err(|e| TableError::InvalidField {
            field: name.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Named lookup in `fields`, else `positional[index]`, else `None`.
pub fn resolve<'a>(
    fields: &'a FieldMap,
    positional: &'a [String],
    index: usize,
    name: &str,
) -> Option<&'a str> {
    ValueResolver::new(fields, positional).resolve(index, name)
}
