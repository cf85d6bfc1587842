use super::currency::currency_to_number;
use super::normalize::{contains_normalized, normalize};
use crate::models::{Condition, Property, Purpose};
use serde::{Deserialize, Serialize};

/// Number of featured listings shown on the homepage
pub const SHOWCASE_LIMIT: usize = 12;

/// Homepage tab / search-bar purpose selector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Buy,
    Rent,
    Launches,
}

impl Category {
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "comprar" | "venda" => Some(Category::Buy),
            "alugar" | "aluguel" => Some(Category::Rent),
            "lancamentos" | "lancamento" => Some(Category::Launches),
            _ => None,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            Category::Buy => "comprar",
            Category::Rent => "alugar",
            Category::Launches => "lancamentos",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Buy => "COMPRAR",
            Category::Rent => "ALUGUEL",
            Category::Launches => "LANÇAMENTOS",
        }
    }

    /// Launches are recognized by condition, the other tabs by purpose
    pub fn matches(&self, property: &Property) -> bool {
        match self {
            Category::Buy => property.purpose == Some(Purpose::Sale),
            Category::Rent => property.purpose == Some(Purpose::Rent),
            Category::Launches => property.condition == Some(Condition::OffPlan),
        }
    }
}

/// Bedroom filter. `FourOrMore` is the "4+" option.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RoomCount {
    #[default]
    Any,
    Exactly(u32),
    FourOrMore,
}

impl RoomCount {
    /// "0" (or anything unparsable) is any, "4" is four or more
    pub fn from_param(value: &str) -> Self {
        match value.trim().parse::<u32>() {
            Ok(0) | Err(_) => RoomCount::Any,
            Ok(4) => RoomCount::FourOrMore,
            Ok(n) => RoomCount::Exactly(n),
        }
    }

    pub fn as_param(&self) -> String {
        match self {
            RoomCount::Any => "0".to_string(),
            RoomCount::Exactly(n) => n.to_string(),
            RoomCount::FourOrMore => "4".to_string(),
        }
    }

    pub fn matches(&self, bedrooms: u32) -> bool {
        match self {
            RoomCount::Any => true,
            RoomCount::Exactly(n) => bedrooms == *n,
            RoomCount::FourOrMore => bedrooms >= 4,
        }
    }

    pub fn label(&self) -> Option<String> {
        match self {
            RoomCount::Any => None,
            RoomCount::FourOrMore => Some("4+ quartos".to_string()),
            RoomCount::Exactly(1) => Some("1 quarto".to_string()),
            RoomCount::Exactly(n) => Some(format!("{n} quartos")),
        }
    }
}

/// Filters held by the listing page for the length of a session.
///
/// Prices are kept as masked display strings and only converted when a
/// property is evaluated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: Option<Category>,
    /// Unit type, e.g. "apartamento". Empty or "todos" means any.
    pub kind: String,
    /// Condition in backend spelling. Empty or "todas" means any.
    pub status: String,
    pub rooms: RoomCount,
    pub min_price: String,
    pub max_price: String,
    pub city: String,
    pub neighborhood: String,
}

impl FilterState {
    pub fn kind_filter(&self) -> Option<&str> {
        let kind = self.kind.trim();
        (!kind.is_empty() && kind != "todos" && kind != "0").then_some(kind)
    }

    pub fn status_filter(&self) -> Option<&str> {
        let status = self.status.trim();
        (!status.is_empty() && status != "todas").then_some(status)
    }

    /// True when no filter would exclude anything
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.kind_filter().is_none()
            && self.status_filter().is_none()
            && self.rooms == RoomCount::Any
            && self.min_price.trim().is_empty()
            && self.max_price.trim().is_empty()
            && self.city.trim().is_empty()
            && self.neighborhood.trim().is_empty()
    }

    /// Every active filter must hold for the property to be kept
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(category) = self.category {
            if !category.matches(property) {
                return false;
            }
        }

        if let Some(kind) = self.kind_filter() {
            if normalize(&property.kind) != normalize(kind) {
                return false;
            }
        }

        if let Some(status) = self.status_filter() {
            match Condition::from_wire(status) {
                Some(wanted) if property.condition == Some(wanted) => {}
                _ => return false,
            }
        }

        if !self.city.trim().is_empty() && !contains_normalized(&property.city, &self.city) {
            return false;
        }

        if !self.neighborhood.trim().is_empty()
            && !contains_normalized(&property.neighborhood, &self.neighborhood)
        {
            return false;
        }

        if !self.min_price.trim().is_empty() {
            let min = currency_to_number(&self.min_price);
            if property.price_on_request || property.resolved_price() < min {
                return false;
            }
        }

        if !self.max_price.trim().is_empty() {
            let max = currency_to_number(&self.max_price);
            if property.price_on_request || property.resolved_price() > max {
                return false;
            }
        }

        self.rooms.matches(property.bedrooms)
    }
}

/// Applies every active filter; the input is left untouched.
pub fn filter_properties(properties: &[Property], filters: &FilterState) -> Vec<Property> {
    properties
        .iter()
        .filter(|p| filters.matches(p))
        .cloned()
        .collect()
}

/// Listings for one homepage tab
pub fn filter_by_category(properties: &[Property], category: Category) -> Vec<Property> {
    properties
        .iter()
        .filter(|p| category.matches(p))
        .cloned()
        .collect()
}

/// Featured listings for the homepage, in backend order
pub fn featured_showcase(properties: &[Property], limit: usize) -> Vec<Property> {
    properties
        .iter()
        .filter(|p| p.is_featured)
        .take(limit)
        .cloned()
        .collect()
}
