//! Catalog validation of incoming selections.
//!
//! Every function returns catalog spelling so stored values are exact catalog members.

use geoscope_core::SelectionError;
use geoscope_domain::{GeographicCatalog, normalize_city, normalize_taluka};

/// Validated Salesman grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SalesmanGrant {
    pub(super) taluka: String,
    pub(super) city: Option<String>,
}

/// Trims, drops blanks and removes duplicates by `identity`, keeping first spelling.
fn clean_selection(values: &[String], identity: fn(&str) -> String) -> Vec<&str> {
    let mut seen: Vec<String> = Vec::new();
    let mut cleaned = Vec::new();
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = identity(trimmed);
        if !seen.contains(&key) {
            seen.push(key);
            cleaned.push(trimmed);
        }
    }

    cleaned
}

pub(super) fn validate_cities(
    catalog: &GeographicCatalog,
    cities: &[String],
) -> Result<Vec<String>, SelectionError> {
    let cleaned = clean_selection(cities, normalize_city);
    if cleaned.is_empty() {
        return Err(SelectionError::EmptySelection);
    }

    cleaned
        .into_iter()
        .map(|city| {
            catalog
                .resolve_city(city)
                .map(str::to_owned)
                .ok_or_else(|| SelectionError::UnknownCity(city.to_owned()))
        })
        .collect()
}

pub(super) fn validate_city_talukas(
    catalog: &GeographicCatalog,
    talukas: &[String],
    city_context: &str,
) -> Result<(String, Vec<String>), SelectionError> {
    let cleaned = clean_selection(talukas, normalize_taluka);
    if cleaned.is_empty() {
        return Err(SelectionError::EmptySelection);
    }

    let city = catalog
        .resolve_city(city_context)
        .ok_or_else(|| SelectionError::UnknownCity(city_context.trim().to_owned()))?;

    let talukas = cleaned
        .into_iter()
        .map(|taluka| {
            catalog
                .resolve_taluka_in(city, taluka)
                .map(str::to_owned)
                .ok_or_else(|| SelectionError::TalukaCityMismatch {
                    taluka: taluka.to_owned(),
                    city: city.to_owned(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((city.to_owned(), talukas))
}

pub(super) fn validate_salesman_taluka(
    catalog: &GeographicCatalog,
    taluka: &str,
    city_hint: Option<&str>,
) -> Result<SalesmanGrant, SelectionError> {
    let taluka = taluka.trim();
    if taluka.is_empty() {
        return Err(SelectionError::EmptySelection);
    }

    let owners = catalog.cities_containing(taluka);
    if owners.is_empty() {
        return Err(SelectionError::UnknownTaluka(taluka.to_owned()));
    }

    let city = match city_hint.map(str::trim).filter(|hint| !hint.is_empty()) {
        Some(hint) => {
            let city = catalog
                .resolve_city(hint)
                .ok_or_else(|| SelectionError::UnknownCity(hint.to_owned()))?;
            if !owners.contains(&city) {
                return Err(SelectionError::TalukaCityMismatch {
                    taluka: taluka.to_owned(),
                    city: city.to_owned(),
                });
            }
            Some(city)
        }
        None => match owners.as_slice() {
            [only] => Some(*only),
            _ => None,
        },
    };

    let owner = city.or_else(|| owners.first().copied()).unwrap_or_default();
    let canonical = catalog
        .resolve_taluka_in(owner, taluka)
        .unwrap_or(taluka)
        .to_owned();

    Ok(SalesmanGrant {
        taluka: canonical,
        city: city.map(str::to_owned),
    })
}
