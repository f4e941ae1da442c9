//! Tri-state field for partial updates.
//!
//! JSON partial updates must distinguish "field omitted" (keep the
//! stored value) from "field explicitly null" (clear the stored value).
//! A plain `Option<T>` collapses both into `None`, so update DTOs wrap
//! nullable fields in [`Patch<T>`] instead.
//!
//! Deserialization relies on `#[serde(default)]`: an omitted field keeps
//! the `Missing` default, while a present field (null or value) goes
//! through `Deserialize` and becomes `Null` or `Value`.

use serde::{Deserialize, Deserializer};

/// One field of a partial-update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field absent from the request body; keep the stored value.
    Missing,
    /// Field present as JSON `null`; clear the stored value.
    Null,
    /// Field present with a value; replace the stored value.
    Value(T),
}

// Manual impl: the derive would demand `T: Default`, which rules out
// types like `chrono::DateTime`.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Missing
    }
}

impl<T> Patch<T> {
    /// True when the request did not mention this field.
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// True when the request mentioned this field (null or value).
    pub fn is_set(&self) -> bool {
        !self.is_missing()
    }

    /// The new value to store, for a set field. `None` means clear.
    ///
    /// Only meaningful when [`is_set`](Self::is_set) is true; a missing
    /// field also returns `None`, so check presence first when binding.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Consume into the value to store, for a set field.
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Resolve against the currently stored value.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Missing => current,
            Patch::Null => None,
            Patch::Value(v) => Some(v),
        }
    }
}

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

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        parent_id: Patch<i64>,
        #[serde(default)]
        title: Patch<String>,
    }

    #[test]
    fn omitted_field_is_missing() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert!(body.parent_id.is_missing());
        assert!(body.title.is_missing());
    }

    #[test]
    fn explicit_null_is_null() {
        let body: Body = serde_json::from_str(r#"{"parent_id": null}"#).unwrap();
        assert_eq!(body.parent_id, Patch::Null);
        assert!(body.parent_id.is_set());
        assert_eq!(body.parent_id.as_option(), None);
    }

    #[test]
    fn value_is_value() {
        let body: Body = serde_json::from_str(r#"{"parent_id": 7, "title": "x"}"#).unwrap();
        assert_eq!(body.parent_id, Patch::Value(7));
        assert_eq!(body.title.as_option().map(String::as_str), Some("x"));
    }

    #[test]
    fn apply_resolves_against_current() {
        assert_eq!(Patch::<i64>::Missing.apply(Some(1)), Some(1));
        assert_eq!(Patch::<i64>::Null.apply(Some(1)), None);
        assert_eq!(Patch::Value(2).apply(Some(1)), Some(2));
        assert_eq!(Patch::<i64>::Missing.apply(None), None);
    }
}
