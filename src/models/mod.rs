pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

pub use wire::{PropertyPayload, WireMedia, WireProperty};

/// What the listing is offered for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    #[default]
    Sale,
    Rent,
    Launch,
}

impl Purpose {
    /// Canonical backend spelling
    pub fn as_wire(&self) -> &'static str {
        match self {
            Purpose::Sale => "venda",
            Purpose::Rent => "aluguel",
            Purpose::Launch => "lancamento",
        }
    }

    /// Accepts every spelling the backend has ever stored
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "venda" | "comprar" => Some(Purpose::Sale),
            "aluguel" | "alugar" => Some(Purpose::Rent),
            "lancamento" | "lancamentos" => Some(Purpose::Launch),
            _ => None,
        }
    }

    /// Conditions a listing with this purpose may carry, preferred first
    pub fn valid_conditions(&self) -> &'static [Condition] {
        match self {
            Purpose::Sale => &[Condition::New, Condition::Used],
            Purpose::Rent => &[Condition::Furnished, Condition::Unfurnished],
            Purpose::Launch => &[Condition::OffPlan],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Purpose::Sale => "Venda",
            Purpose::Rent => "Aluguel",
            Purpose::Launch => "Lançamento",
        }
    }
}

/// Physical or contractual state of the unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    New,
    Used,
    OffPlan,
    Furnished,
    Unfurnished,
}

impl Condition {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Condition::New => "novo",
            Condition::Used => "usado",
            Condition::OffPlan => "na_planta",
            Condition::Furnished => "mobiliado",
            Condition::Unfurnished => "nao_mobiliado",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "novo" => Some(Condition::New),
            "usado" => Some(Condition::Used),
            "na_planta" => Some(Condition::OffPlan),
            "mobiliado" => Some(Condition::Furnished),
            "nao_mobiliado" => Some(Condition::Unfurnished),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "Novo",
            Condition::Used => "Usado",
            Condition::OffPlan => "Na Planta",
            Condition::Furnished => "Mobiliado",
            Condition::Unfurnished => "Não Mobiliado",
        }
    }
}

/// Lifecycle of a listing record.
///
/// A wizard opened for a new property creates a `Draft` right away so media
/// can be attached to a real id; it becomes `Published` once it has media.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingState {
    #[default]
    Draft,
    Published,
}

impl ListingState {
    pub fn is_published(&self) -> bool {
        matches!(self, ListingState::Published)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

/// A media item already stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Media {
    pub id: String,
    pub url: String,
    pub kind: MediaKind,
    pub display_order: i32,
}

/// Free-text tags grouped the way the listing page shows them
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Characteristics {
    #[serde(default, rename = "internas")]
    pub interior: BTreeSet<String>,
    #[serde(default, rename = "externas")]
    pub exterior: BTreeSet<String>,
    #[serde(default, rename = "lazer")]
    pub leisure: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacteristicGroup {
    Interior,
    Exterior,
    Leisure,
}

impl Characteristics {
    pub fn group(&self, group: CharacteristicGroup) -> &BTreeSet<String> {
        match group {
            CharacteristicGroup::Interior => &self.interior,
            CharacteristicGroup::Exterior => &self.exterior,
            CharacteristicGroup::Leisure => &self.leisure,
        }
    }

    pub fn group_mut(&mut self, group: CharacteristicGroup) -> &mut BTreeSet<String> {
        match group {
            CharacteristicGroup::Interior => &mut self.interior,
            CharacteristicGroup::Exterior => &mut self.exterior,
            CharacteristicGroup::Leisure => &mut self.leisure,
        }
    }

    /// Adds the tag if missing, removes it otherwise. Returns whether it is now selected.
    pub fn toggle(&mut self, group: CharacteristicGroup, tag: &str) -> bool {
        let set = self.group_mut(group);
        if set.remove(tag) {
            false
        } else {
            set.insert(tag.to_string());
            true
        }
    }
}

/// Core listing data model, normalized from the backend payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Property {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub city: String,
    pub neighborhood: String,
    pub address: String,
    pub purpose: Option<Purpose>,
    pub condition: Option<Condition>,
    /// Unit type, e.g. "apartamento" or "casa"
    pub kind: String,
    pub price: Option<f64>,
    pub rent_price: Option<f64>,
    pub price_on_request: bool,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub garages: u32,
    pub area: f64,
    pub is_featured: bool,
    pub state: ListingState,
    pub characteristics: Characteristics,
    pub media: Vec<Media>,
    pub videos: Vec<Media>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Property {
    /// The placeholder record created when the wizard opens for a new listing
    pub fn placeholder() -> Self {
        Self {
            title: "Novo Imóvel".to_string(),
            description: "Descrição pendente".to_string(),
            city: "Brasília".to_string(),
            purpose: Some(Purpose::Sale),
            condition: Some(Condition::New),
            kind: "apartamento".to_string(),
            price: Some(0.0),
            ..Self::default()
        }
    }

    /// Price used for range filtering: sale price, then rent price, then zero
    pub fn resolved_price(&self) -> f64 {
        self.price
            .filter(|p| *p != 0.0)
            .or(self.rent_price)
            .unwrap_or(0.0)
    }

    pub fn is_active(&self) -> bool {
        self.state.is_published()
    }
}

/// Neighborhood highlight shown on the homepage
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Neighborhood {
    #[serde(
        default,
        deserialize_with = "wire::lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub order_index: i32,
}

fn default_true() -> bool {
    true
}

/// Value stored under a settings key, e.g. `hero-image`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SettingValue {
    #[serde(default)]
    pub url: Option<String>,
}

pub type SiteSettings = HashMap<String, SettingValue>;

/// Returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(default, deserialize_with = "wire::lenient_id")]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}
