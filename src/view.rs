//! Search and ordering over an in-memory contact list.

use std::cmp::Ordering;

use serde::{
    de::{self, DeserializeOwned, IntoDeserializer},
    Deserialize, Deserializer, Serialize,
};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::contact::{Contact, SortKey, SortOrder};

/// Search and sort state for the contact list. Unknown `sort` or `order`
/// values fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub q: String,
    #[serde(deserialize_with = "unknown_as_default")]
    pub sort: SortKey,
    #[serde(deserialize_with = "unknown_as_default")]
    pub order: SortOrder,
}

/// Reads a string parameter as `T`, treating a value `T` doesn't know as absent.
pub(crate) fn unknown_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = String::deserialize(deserializer)?;
    let parsed: Result<T, de::value::Error> = T::deserialize(raw.as_str().into_deserializer());
    Ok(parsed
        .map_err(|e| tracing::debug!(value = %raw, error = %e, "ignoring unknown parameter"))
        .ok())
}

fn unknown_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    unknown_as_none(deserializer).map(Option::unwrap_or_default)
}

impl ListQuery {
    /// Clicking the active key flips its direction; a new key starts ascending.
    pub fn toggle_sort(&self, key: SortKey) -> ListQuery {
        let order = if self.sort == key {
            self.order.flip()
        } else {
            SortOrder::Asc
        };
        ListQuery {
            q: self.q.clone(),
            sort: key,
            order,
        }
    }

    pub fn derive<'a>(&self, records: &'a [Contact]) -> Vec<&'a Contact> {
        derive_view(records, &self.q, self.sort, self.order)
    }
}

/// Filters `records` by `query` and orders the result. The input is left untouched
/// and equal keys keep their input order.
///
/// A blank query keeps everything. Otherwise the query is matched as typed,
/// surrounding spaces included, so `" pond"` finds "Amy Pond" but not "Pondering".
pub fn derive_view<'a>(
    records: &'a [Contact],
    query: &str,
    key: SortKey,
    order: SortOrder,
) -> Vec<&'a Contact> {
    let mut view: Vec<&Contact> = if query.trim().is_empty() {
        records.iter().collect()
    } else {
        let needle = query.to_lowercase();
        records.iter().filter(|c| matches(c, &needle)).collect()
    };

    view.sort_by(|a, b| {
        let cmp = match key {
            SortKey::Name => compare_names(&a.name, &b.name),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        match order {
            SortOrder::Asc => cmp,
            SortOrder::Desc => cmp.reverse(),
        }
    });

    tracing::debug!(total = records.len(), shown = view.len(), ?key, ?order, "derived contact view");
    view
}

// `needle` is already lowercased. Phone is matched literally.
fn matches(contact: &Contact, needle: &str) -> bool {
    contact.name.to_lowercase().contains(needle)
        || contact.email.to_lowercase().contains(needle)
        || contact.phone.contains(needle)
}

fn collation_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Approximates a dictionary ordering: base letters first, then accents,
/// then case with lowercase ahead of uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}
