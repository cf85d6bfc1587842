//! Dashboard counts, listing badges and the smaller admin actions.

use crate::api::{ListingBackend, RestClient};
use crate::error::{DeskError, Result};
use crate::models::{Condition, ListingState, Property, Purpose, SettingValue, SiteSettings};
use tracing::info;
use url::form_urlencoded;

pub const WHATSAPP_NUMBER: &str = "5561993336757";

pub const HERO_IMAGE_KEY: &str = "hero-image";

pub const DEFAULT_HERO_IMAGE: &str =
    "https://images.unsplash.com/photo-1625426242633-3be4b3379dfb?crop=entropy&cs=srgb&fm=jpg&q=85";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
}

pub fn dashboard_stats(properties: &[Property]) -> DashboardStats {
    DashboardStats {
        total: properties.len(),
        active: properties.iter().filter(|p| p.is_active()).count(),
    }
}

pub fn purpose_badge(purpose: Purpose) -> &'static str {
    match purpose {
        Purpose::Sale => "COMPRAR",
        Purpose::Rent => "ALUGUEL",
        Purpose::Launch => "LANÇAMENTO",
    }
}

/// Unfurnished rentals carry no badge
pub fn condition_badge(condition: Condition) -> Option<&'static str> {
    match condition {
        Condition::New => Some("NOVO"),
        Condition::Used => Some("USADO"),
        Condition::OffPlan => Some("NA PLANTA"),
        Condition::Furnished => Some("MOBILIADO"),
        Condition::Unfurnished => None,
    }
}

/// Contact link with a prefilled message, about one listing or the agency in general
pub fn whatsapp_link(property: Option<&Property>) -> String {
    let message = match property {
        Some(property) => format!(
            "Olá! Tenho interesse no imóvel: {}. Gostaria de agendar uma visita.",
            property.title
        ),
        None => "Olá! Gostaria de mais informações sobre os imóveis.".to_string(),
    };
    let text: String = form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("https://wa.me/{WHATSAPP_NUMBER}?text={text}")
}

pub fn hero_image_url(settings: &SiteSettings) -> String {
    settings
        .get(HERO_IMAGE_KEY)
        .and_then(|value| value.url.as_deref())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or(DEFAULT_HERO_IMAGE)
        .to_string()
}

pub async fn save_hero_image(client: &RestClient, url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(DeskError::Validation("Por favor, insira uma URL de imagem".to_string()));
    }
    let value = SettingValue { url: Some(url.to_string()) };
    client.update_setting(HERO_IMAGE_KEY, &value).await
}

/// Flips a listing between published and draft, updating the local copy on success
pub async fn toggle_property_active(backend: &dyn ListingBackend, property: &mut Property) -> Result<bool> {
    let id = property
        .id
        .clone()
        .ok_or_else(|| DeskError::Validation("Imóvel sem id".to_string()))?;
    let active = !property.is_active();

    backend.set_property_active(&id, active).await?;
    property.state = if active { ListingState::Published } else { ListingState::Draft };
    info!("Listing {} is now {}", id, if active { "active" } else { "inactive" });
    Ok(active)
}

/// Change-password form
#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<()> {
        if self.current.is_empty() || self.new.is_empty() || self.confirm.is_empty() {
            return Err(DeskError::Validation("Preencha todos os campos".to_string()));
        }
        if self.new != self.confirm {
            return Err(DeskError::Validation("Nova senha e confirmação não conferem".to_string()));
        }
        Ok(())
    }

    pub async fn submit(&self, client: &RestClient) -> Result<()> {
        self.validate()?;
        client.change_password(&self.current, &self.new).await
    }
}
