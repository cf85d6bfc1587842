use super::normalize::normalize;
use crate::models::Property;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Whether an autocomplete entry came from the city or the neighborhood column
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LocationKind {
    City,
    Neighborhood,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationSuggestion {
    pub name: String,
    pub kind: LocationKind,
}

/// Accent- and case-insensitive ordering, ties broken by the raw spelling
pub fn compare_pt(a: &str, b: &str) -> Ordering {
    normalize(a).cmp(&normalize(b)).then_with(|| a.cmp(b))
}

/// City dropdown options: one entry per spelling-insensitive name
pub fn unique_cities(properties: &[Property]) -> Vec<String> {
    unique_sorted(properties.iter().map(|p| p.city.as_str()))
}

pub fn unique_neighborhoods(properties: &[Property]) -> Vec<String> {
    unique_sorted(properties.iter().map(|p| p.neighborhood.as_str()))
}

/// Keeps the first-seen spelling for each normalized key, then sorts
fn unique_sorted<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = names
        .filter(|name| !name.trim().is_empty())
        .filter(|name| seen.insert(normalize(name)))
        .map(str::to_string)
        .collect();
    unique.sort_by(|a, b| compare_pt(a, b));
    unique
}

/// Search-bar suggestions: cities first, then neighborhoods, matching `input`
pub fn location_suggestions(properties: &[Property], input: &str) -> Vec<LocationSuggestion> {
    let needle = normalize(input);
    if needle.is_empty() {
        return Vec::new();
    }

    let cities = unique_cities(properties)
        .into_iter()
        .map(|name| LocationSuggestion { name, kind: LocationKind::City });
    let neighborhoods = unique_neighborhoods(properties)
        .into_iter()
        .map(|name| LocationSuggestion { name, kind: LocationKind::Neighborhood });

    cities
        .chain(neighborhoods)
        .filter(|s| normalize(&s.name).contains(&needle))
        .collect()
}
