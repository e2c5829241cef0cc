//! Applies loosely described table columns onto a request payload.
//!
//! Columns a step already consumed are excluded up front. Every other
//! column is looked up in the payload's [`FieldRegistry`], coerced and
//! stored. Unknown names, blank cells and bad values never fail the step;
//! each column gets a [`FieldOutcome`] in the returned [`MappingReport`].

mod registry;

pub use registry::{ApplyError, Capability, FieldRegistry, FromFieldValue, Settable};

use tracing::{debug, warn};

use crate::coercion::{convert, is_blank, CoercionError, FieldValue};
use crate::table::FieldMap;

/// Why a column was not applied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkipReason {
    #[error("blank field name")]
    BlankName,

    #[error("no setter on {target}")]
    UnknownField { target: &'static str },

    #[error("blank value for non-nullable field on {target}")]
    NullForRequired { target: &'static str },

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error(transparent)]
    Apply(#[from] ApplyError),
}

/// What happened to one column.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldStatus {
    /// Converted and stored.
    Applied(FieldValue),
    /// Consumed by the step as a mandatory field; not touched here.
    Excluded,
    /// Blank cell for a nullable field; left as it was.
    Unset,
    /// Not applied; the payload is unchanged for this field.
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldOutcome {
    pub field: String,
    pub status: FieldStatus,
}

impl FieldOutcome {
    fn new(field: &str, status: FieldStatus) -> Self {
        Self {
            field: field.to_string(),
            status,
        }
    }

    fn skipped(field: &str, reason: SkipReason) -> Self {
        Self::new(field, FieldStatus::Skipped(reason))
    }

    pub fn is_applied(&self) -> bool {
        matches!(self.status, FieldStatus::Applied(_))
    }
}

/// Per-column outcomes of one mapper run, in table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingReport {
    outcomes: Vec<FieldOutcome>,
}

impl MappingReport {
    pub fn outcomes(&self) -> &[FieldOutcome] {
        &self.outcomes
    }

    pub fn status(&self, field: &str) -> Option<&FieldStatus> {
        self.outcomes
            .iter()
            .find(|o| o.field == field)
            .map(|o| &o.status)
    }

    pub fn applied(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_applied())
            .map(|o| o.field.as_str())
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            FieldStatus::Skipped(reason) => Some((o.field.as_str(), reason)),
            _ => None,
        })
    }

    /// True when no column was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Apply every column of `fields` not named in `excluded` onto `target`.
pub fn apply_additional_fields<T: Settable>(
    target: &mut T,
    fields: &FieldMap,
    excluded: &[&str],
) -> MappingReport {
    let outcomes = fields
        .iter()
        .map(|(name, raw)| {
            if excluded.iter().any(|key| *key == name) {
                FieldOutcome::new(name, FieldStatus::Excluded)
            } else {
                set_field(target, name, raw)
            }
        })
        .collect();

    MappingReport { outcomes }
}

/// Set one field by name from its raw cell text.
pub fn set_field<T: Settable>(target: &mut T, field: &str, raw: &str) -> FieldOutcome {
    if is_blank(field) {
        return FieldOutcome::skipped(field, SkipReason::BlankName);
    }

    let registry = T::registry();
    let type_name = registry.type_name();

    let Some(capability) = registry.get(field) else {
        warn!(field, payload = type_name, "No setter found for field");
        return FieldOutcome::skipped(
            field,
            SkipReason::UnknownField { target: type_name },
        );
    };

    let value = match convert(raw, capability.field_type()) {
        Ok(Some(value)) => value,
        Ok(None) if capability.nullable() => {
            debug!(field, payload = type_name, "Blank value, leaving field unset");
            return FieldOutcome::new(field, FieldStatus::Unset);
        }
        Ok(None) => {
            warn!(
                field,
                payload = type_name,
                "Cannot assign blank value to non-nullable field"
            );
            return FieldOutcome::skipped(
                field,
                SkipReason::NullForRequired { target: type_name },
            );
        }
        Err(e) => {
            warn!(field, payload = type_name, error = %e, "Failed to set additional field");
            return FieldOutcome::skipped(field, e.into());
        }
    };

    match capability.apply(target, value.clone()) {
        Ok(()) => FieldOutcome::new(field, FieldStatus::Applied(value)),
        Err(e) => {
            warn!(field, payload = type_name, error = %e, "Failed to set additional field");
            FieldOutcome::skipped(field, e.into())
        }
    }
}

#[cfg(test)]
mod tests;
