//! Loads the geographic catalog from a JSON document.
//!
//! Two shapes are accepted: an object `{ "City": ["Taluka", ...] }` or a list
//! `[{ "city": "City", "talukas": [...] }]`. Both keep file order, and a city listed
//! twice is rejected by the catalog builder in either shape.

use std::fmt;
use std::path::Path;

use geoscope_core::{AppError, AppResult};
use geoscope_domain::GeographicCatalog;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::info;

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    city: String,
    #[serde(default)]
    talukas: Vec<String>,
}

/// Object-form catalog kept as ordered pairs, repeated keys included.
#[derive(Debug)]
struct CityMap(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for CityMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CityMapVisitor)
    }
}

struct CityMapVisitor;

impl<'de> Visitor<'de> for CityMapVisitor {
    type Value = CityMap;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object mapping city names to taluka lists")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or_default());
        while let Some((city, talukas)) = map.next_entry::<String, Vec<String>>()? {
            entries.push((city, talukas));
        }

        Ok(CityMap(entries))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Entries(Vec<CatalogEntry>),
    Map(CityMap),
}

/// Parses a catalog from JSON text.
pub fn parse_catalog_json(json: &str) -> AppResult<GeographicCatalog> {
    let document: CatalogDocument = serde_json::from_str(json)
        .map_err(|error| AppError::Validation(format!("invalid catalog document: {error}")))?;

    match document {
        CatalogDocument::Entries(entries) => GeographicCatalog::from_entries(
            entries
                .into_iter()
                .map(|entry| (entry.city, entry.talukas)),
        ),
        CatalogDocument::Map(CityMap(entries)) => GeographicCatalog::from_entries(entries),
    }
}

/// Reads and parses a catalog file.
pub fn load_catalog_from_path(path: impl AsRef<Path>) -> AppResult<GeographicCatalog> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|error| {
        AppError::Internal(format!(
            "failed to read catalog '{}': {error}",
            path.display()
        ))
    })?;

    let catalog = parse_catalog_json(json.as_str())?;
    info!(
        path = %path.display(),
        cities = catalog.len(),
        "geographic catalog loaded"
    );

    Ok(catalog)
}
