//! Two-level geographic reference data (City containing Talukas).
//!
//! City display names are inconsistent in the wild ("Ahmedabad (City)", "ahmedabad"),
//! so every city comparison goes through [`normalize_city`]. Taluka names never carry
//! the decorative suffix but are compared case-insensitively through
//! [`normalize_taluka`]. The same taluka name may appear under more than one city.

use std::collections::BTreeMap;

use geoscope_core::{AppError, AppResult, NonEmptyString};

const CITY_SUFFIX: &str = "(city)";

/// Returns the matching identity of a city name.
///
/// Lowercases, strips every trailing `(City)` suffix (any casing, surrounding
/// whitespace included) and trims, so the result is a fixed point.
#[must_use]
pub fn normalize_city(value: &str) -> String {
    let mut normalized = value.trim().to_lowercase();
    while let Some(stripped) = normalized.strip_suffix(CITY_SUFFIX) {
        normalized = stripped.trim_end().to_owned();
    }
    normalized
}

/// Returns the matching identity of a taluka name.
#[must_use]
pub fn normalize_taluka(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Returns whether two city names denote the same city.
#[must_use]
pub fn same_city(left: &str, right: &str) -> bool {
    normalize_city(left) == normalize_city(right)
}

/// Returns whether two taluka names denote the same taluka name.
#[must_use]
pub fn same_taluka(left: &str, right: &str) -> bool {
    normalize_taluka(left) == normalize_taluka(right)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CityEntry {
    name: String,
    talukas: Vec<String>,
}

/// Immutable City -> ordered set of Taluka reference mapping.
///
/// Lookups never fail: unknown input yields an empty result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeographicCatalog {
    cities: Vec<CityEntry>,
    index: BTreeMap<String, usize>,
}

impl GeographicCatalog {
    /// Builds a catalog from `(city, talukas)` pairs.
    ///
    /// City order and taluka order are preserved. Blank names are rejected, two cities
    /// that normalize to the same identity are rejected, and repeated talukas within
    /// one city are collapsed to their first spelling.
    pub fn from_entries<I, C, T>(entries: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (C, Vec<T>)>,
        C: Into<String>,
        T: Into<String>,
    {
        let mut catalog = Self::default();

        for (city, talukas) in entries {
            let city = city.into().trim().to_owned();
            let key = normalize_city(city.as_str());
            if key.is_empty() {
                return Err(AppError::Validation(
                    "catalog city name must not be blank".to_owned(),
                ));
            }
            if catalog.index.contains_key(&key) {
                return Err(AppError::Validation(format!(
                    "catalog city '{city}' is listed more than once"
                )));
            }

            let mut unique_talukas: Vec<String> = Vec::new();
            for taluka in talukas {
                let taluka = NonEmptyString::new(taluka).map_err(|_| {
                    AppError::Validation(format!("catalog city '{city}' contains a blank taluka"))
                })?;
                if !unique_talukas
                    .iter()
                    .any(|existing| same_taluka(existing, taluka.as_str()))
                {
                    unique_talukas.push(taluka.into());
                }
            }

            catalog.index.insert(key, catalog.cities.len());
            catalog.cities.push(CityEntry {
                name: city,
                talukas: unique_talukas,
            });
        }

        Ok(catalog)
    }

    /// Returns every city in catalog order, with canonical spelling.
    #[must_use]
    pub fn all_cities(&self) -> Vec<&str> {
        self.cities.iter().map(|entry| entry.name.as_str()).collect()
    }

    /// Returns the talukas of a city, or an empty slice for an unknown city.
    #[must_use]
    pub fn talukas_of(&self, city: &str) -> &[String] {
        self.entry(city)
            .map(|entry| entry.talukas.as_slice())
            .unwrap_or_default()
    }

    /// Returns the canonical spelling of a city, if it is a catalog key.
    #[must_use]
    pub fn resolve_city(&self, city: &str) -> Option<&str> {
        self.entry(city).map(|entry| entry.name.as_str())
    }

    /// Returns the canonical spelling of a taluka inside one city.
    #[must_use]
    pub fn resolve_taluka_in(&self, city: &str, taluka: &str) -> Option<&str> {
        self.talukas_of(city)
            .iter()
            .find(|candidate| same_taluka(candidate, taluka))
            .map(String::as_str)
    }

    /// Returns every city listing the taluka name, in catalog order.
    #[must_use]
    pub fn cities_containing(&self, taluka: &str) -> Vec<&str> {
        self.cities
            .iter()
            .filter(|entry| {
                entry
                    .talukas
                    .iter()
                    .any(|candidate| same_taluka(candidate, taluka))
            })
            .map(|entry| entry.name.as_str())
            .collect()
    }

    /// Returns whether the taluka exists under any city.
    #[must_use]
    pub fn contains_taluka(&self, taluka: &str) -> bool {
        !self.cities_containing(taluka).is_empty()
    }

    /// Returns the number of cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns whether the catalog has no cities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    fn entry(&self, city: &str) -> Option<&CityEntry> {
        self.index
            .get(&normalize_city(city))
            .and_then(|position| self.cities.get(*position))
    }
}
