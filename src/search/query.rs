//! Moving filters in and out of the listing page URL.

use super::currency::mask_currency_brl;
use super::filter::{Category, FilterState, RoomCount};
use super::options::{LocationKind, LocationSuggestion};
use url::Url;

/// Removable badge for an active filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Category,
    Kind,
    Status,
    City,
    Neighborhood,
    Rooms,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub key: FilterKey,
    pub label: String,
}

impl FilterState {
    /// Reads the query string the search bar produces. Prices are re-masked.
    pub fn from_query<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = FilterState::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "purpose" => state.category = Category::from_param(value),
                "type" => state.kind = value.to_string(),
                "status" => state.status = value.to_string(),
                "city" => state.city = value.to_string(),
                "neighborhood" => state.neighborhood = value.to_string(),
                "rooms" => state.rooms = RoomCount::from_param(value),
                "minPrice" => state.min_price = mask_currency_brl(value),
                "maxPrice" => state.max_price = mask_currency_brl(value),
                _ => {}
            }
        }
        state
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query_pairs())
    }

    /// Only filters that are set are emitted
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("purpose", category.as_param().to_string()));
        }
        if let Some(kind) = self.kind_filter() {
            pairs.push(("type", kind.to_string()));
        }
        if let Some(status) = self.status_filter() {
            pairs.push(("status", status.to_string()));
        }
        if !self.city.trim().is_empty() {
            pairs.push(("city", self.city.clone()));
        }
        if !self.neighborhood.trim().is_empty() {
            pairs.push(("neighborhood", self.neighborhood.clone()));
        }
        if self.rooms != RoomCount::Any {
            pairs.push(("rooms", self.rooms.as_param()));
        }
        if !self.min_price.trim().is_empty() {
            pairs.push(("minPrice", self.min_price.clone()));
        }
        if !self.max_price.trim().is_empty() {
            pairs.push(("maxPrice", self.max_price.clone()));
        }
        pairs
    }

    pub fn active_chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if let Some(category) = self.category {
            chips.push(FilterChip { key: FilterKey::Category, label: category.label().to_string() });
        }
        if let Some(kind) = self.kind_filter() {
            chips.push(FilterChip { key: FilterKey::Kind, label: kind.to_string() });
        }
        if let Some(status) = self.status_filter() {
            chips.push(FilterChip { key: FilterKey::Status, label: status.to_string() });
        }
        if !self.city.trim().is_empty() {
            chips.push(FilterChip { key: FilterKey::City, label: self.city.clone() });
        }
        if !self.neighborhood.trim().is_empty() {
            chips.push(FilterChip { key: FilterKey::Neighborhood, label: self.neighborhood.clone() });
        }
        if let Some(label) = self.rooms.label() {
            chips.push(FilterChip { key: FilterKey::Rooms, label });
        }
        chips
    }

    pub fn clear(&mut self, key: FilterKey) {
        match key {
            FilterKey::Category => self.category = None,
            FilterKey::Kind => self.kind.clear(),
            FilterKey::Status => self.status.clear(),
            FilterKey::City => self.city.clear(),
            FilterKey::Neighborhood => self.neighborhood.clear(),
            FilterKey::Rooms => self.rooms = RoomCount::Any,
        }
    }

    pub fn clear_all(&mut self) {
        *self = FilterState::default();
    }
}

/// State of the homepage search bar before it hands off to the listing page
#[derive(Debug, Clone, PartialEq)]
pub struct SearchForm {
    pub purpose: Category,
    /// "0" means any type
    pub property_type: String,
    pub location: String,
    pub location_kind: Option<LocationKind>,
    pub rooms: RoomCount,
    pub min_price: String,
    pub max_price: String,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            purpose: Category::Buy,
            property_type: "0".to_string(),
            location: String::new(),
            location_kind: None,
            rooms: RoomCount::Any,
            min_price: String::new(),
            max_price: String::new(),
        }
    }
}

impl SearchForm {
    /// Typing forgets which column a previously picked suggestion came from
    pub fn set_location(&mut self, text: &str) {
        self.location = text.to_string();
        self.location_kind = None;
    }

    pub fn select_suggestion(&mut self, suggestion: &LocationSuggestion) {
        self.location = suggestion.name.clone();
        self.location_kind = Some(suggestion.kind);
    }

    pub fn set_min_price(&mut self, raw: &str) {
        self.min_price = mask_currency_brl(raw);
    }

    pub fn set_max_price(&mut self, raw: &str) {
        self.max_price = mask_currency_brl(raw);
    }

    /// A free-typed location is sent as both city and neighborhood
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("purpose", self.purpose.as_param().to_string())];
        if self.property_type != "0" && !self.property_type.is_empty() {
            pairs.push(("type", self.property_type.clone()));
        }
        let location = self.location.trim();
        if !location.is_empty() {
            match self.location_kind {
                Some(LocationKind::City) => pairs.push(("city", location.to_string())),
                Some(LocationKind::Neighborhood) => {
                    pairs.push(("neighborhood", location.to_string()))
                }
                None => {
                    pairs.push(("city", location.to_string()));
                    pairs.push(("neighborhood", location.to_string()));
                }
            }
        }
        if self.rooms != RoomCount::Any {
            pairs.push(("rooms", self.rooms.as_param()));
        }
        if !self.min_price.is_empty() {
            pairs.push(("minPrice", self.min_price.clone()));
        }
        if !self.max_price.is_empty() {
            pairs.push(("maxPrice", self.max_price.clone()));
        }
        pairs
    }

    /// Listing page URL under `site`, e.g. `https://site/properties?purpose=comprar`
    pub fn search_url(&self, site: &Url) -> Result<Url, url::ParseError> {
        let mut url = site.join("properties")?;
        url.query_pairs_mut().extend_pairs(self.query_pairs());
        Ok(url)
    }
}
