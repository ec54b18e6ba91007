//! Partial-update marker type.
//!
//! Patch payloads need three states per field: absent (leave the stored value
//! alone), explicit `null` (clear a nullable field), and a value (overwrite).
//! A plain `Option<T>` collapses the first two, so patch DTOs use `Patch<T>`
//! with `#[serde(default)]` on every field.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Patch<T> {
    /// Field was not present in the payload.
    #[default]
    Missing,
    /// Field was present as an explicit `null`.
    Null,
    /// Field was present with a value.
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// Apply to a nullable field: `Null` clears it, `Value` overwrites it.
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            Patch::Missing => {}
            Patch::Null => *field = None,
            Patch::Value(v) => *field = Some(v),
        }
    }

    /// Apply to a required field: only `Value` overwrites; `Null` is ignored
    /// because the field cannot be cleared.
    pub fn overwrite(self, field: &mut T) {
        if let Patch::Value(v) = self {
            *field = v;
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Missing => Patch::Missing,
            Patch::Null => Patch::Null,
            Patch::Value(v) => Patch::Value(v),
        }
    }
}

// Present-as-null and present-with-value both reach this impl; an absent
// field never does, which is why patch structs must mark every Patch field
// with #[serde(default)].
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct TestPatch {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        phone: Patch<String>,
        #[serde(default)]
        rating: Patch<i32>,
    }

    #[test]
    fn absent_fields_deserialize_as_missing() {
        let p: TestPatch = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.name, Patch::Missing);
        assert_eq!(p.phone, Patch::Missing);
        assert_eq!(p.rating, Patch::Missing);
    }

    #[test]
    fn null_and_value_are_distinguished() {
        let p: TestPatch =
            serde_json::from_str(r#"{"name":"Acme","phone":null,"rating":5}"#).unwrap();
        assert_eq!(p.name, Patch::Value("Acme".to_string()));
        assert_eq!(p.phone, Patch::Null);
        assert_eq!(p.rating, Patch::Value(5));
    }

    #[test]
    fn apply_to_clears_on_null_and_keeps_on_missing() {
        let mut phone = Some("123".to_string());
        Patch::<String>::Missing.apply_to(&mut phone);
        assert_eq!(phone, Some("123".to_string()));

        Patch::<String>::Null.apply_to(&mut phone);
        assert_eq!(phone, None);

        Patch::Value("456".to_string()).apply_to(&mut phone);
        assert_eq!(phone, Some("456".to_string()));
    }

    #[test]
    fn overwrite_ignores_null_on_required_field() {
        let mut name = "Acme".to_string();
        Patch::<String>::Null.overwrite(&mut name);
        assert_eq!(name, "Acme");

        Patch::Value("Apex".to_string()).overwrite(&mut name);
        assert_eq!(name, "Apex");
    }
}
