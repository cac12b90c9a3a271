//! Validation of form-encoded mutation bodies.
//!
//! Handlers never assign request fields onto entities directly. Each mutation
//! has an explicit payload type whose `from_fields` constructor enumerates the
//! accepted keys and reports every rejected field at once.

use indexmap::IndexMap;

use crate::error::{CoreError, FieldError};
use crate::id::{HeroId, PowerId};

/// Decoded form body, in submission order.
pub type FormFields = IndexMap<String, String>;

/// Collect key/value pairs into [`FormFields`]. A repeated key keeps its
/// first position and takes its last value.
pub fn collect_fields<I>(pairs: I) -> FormFields
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut fields = FormFields::new();
    for (key, value) in pairs {
        fields.insert(key, value);
    }
    fields
}

/// Partial update for a power. Only `name` and `description` are mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl PowerPatch {
    /// Build a patch from a form body.
    ///
    /// # Errors
    /// Returns [`CoreError::Validation`] listing every key other than `name`
    /// or `description`.
    pub fn from_fields(fields: &FormFields) -> Result<Self, CoreError> {
        let mut patch = Self::default();
        let mut errors = Vec::new();

        for (key, value) in fields {
            match key.as_str() {
                "name" => patch.name = Some(value.clone()),
                "description" => patch.description = Some(value.clone()),
                other => errors.push(FieldError::new(other, "is not an updatable field")),
            }
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(CoreError::Validation { errors })
        }
    }

    /// `true` when the patch would not change any column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// A validated request to associate a hero with a power.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHeroPower {
    pub hero_id: HeroId,
    pub power_id: PowerId,
    pub strength: String,
}

impl NewHeroPower {
    /// Build an association from a form body carrying `hero_id`, `power_id`
    /// and `strength`. Unrelated keys are ignored.
    ///
    /// # Errors
    /// Returns [`CoreError::Validation`] if either id is missing or not an
    /// integer, or if `strength` is missing or blank.
    pub fn from_fields(fields: &FormFields) -> Result<Self, CoreError> {
        let mut errors = Vec::new();

        let hero_id = parse_id(fields, "hero_id", &mut errors).map(HeroId::new);
        let power_id = parse_id(fields, "power_id", &mut errors).map(PowerId::new);
        let strength = match fields.get("strength").map(|s| s.trim()) {
            Some(s) if !s.is_empty() => Some(s.to_owned()),
            Some(_) => {
                errors.push(FieldError::new("strength", "must not be blank"));
                None
            }
            None => {
                errors.push(FieldError::new("strength", "is required"));
                None
            }
        };

        match (hero_id, power_id, strength) {
            (Some(hero_id), Some(power_id), Some(strength)) if errors.is_empty() => {
                Ok(Self { hero_id, power_id, strength })
            }
            _ => Err(CoreError::Validation { errors }),
        }
    }
}

fn parse_id(fields: &FormFields, key: &str, errors: &mut Vec<FieldError>) -> Option<i64> {
    let Some(raw) = fields.get(key) else {
        errors.push(FieldError::new(key, "is required"));
        return None;
    };
    match raw.trim().parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(FieldError::new(key, "must be an integer"));
            None
        }
    }
}
