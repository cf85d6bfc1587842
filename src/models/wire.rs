//! Backend payload shapes.
//!
//! The backend has stored listings under more than one field name over time
//! (`finalidade` or `type` for the purpose, `condicao` or `status` for the
//! condition) and sends numbers as either JSON numbers or strings. Everything
//! is resolved here, once, so the rest of the crate only sees [`Property`].

use super::{
    Characteristics, Condition, ListingState, Media, MediaKind, Property, Purpose,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireProperty {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub neighborhood: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(default)]
    pub finalidade: Option<String>,
    #[serde(default, rename = "type")]
    pub legacy_type: Option<String>,
    #[serde(default)]
    pub condicao: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tipo: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub rent_price: Option<f64>,
    #[serde(default)]
    pub price_on_request: Option<bool>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bedrooms: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bathrooms: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub garages: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub area: Option<f64>,
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub characteristics: Option<Characteristics>,
    #[serde(default)]
    pub media: Vec<WireMedia>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireMedia {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, alias = "url")]
    pub media_url: String,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl From<WireMedia> for Media {
    fn from(wire: WireMedia) -> Self {
        let kind = match wire.media_type.as_deref() {
            Some("video") => MediaKind::Video,
            _ => MediaKind::Image,
        };
        Media {
            id: wire.id.unwrap_or_else(|| wire.media_url.clone()),
            url: wire.media_url,
            kind,
            display_order: wire.display_order.unwrap_or(0),
        }
    }
}

impl From<WireProperty> for Property {
    fn from(wire: WireProperty) -> Self {
        let purpose = wire
            .finalidade
            .as_deref()
            .and_then(Purpose::from_wire)
            .or_else(|| wire.legacy_type.as_deref().and_then(Purpose::from_wire));
        let condition = wire
            .condicao
            .as_deref()
            .and_then(Condition::from_wire)
            .or_else(|| wire.status.as_deref().and_then(Condition::from_wire));

        let mut media: Vec<Media> = wire.media.into_iter().map(Media::from).collect();
        if media.is_empty() {
            media = wire
                .images
                .into_iter()
                .enumerate()
                .map(|(idx, url)| Media {
                    id: url.clone(),
                    url,
                    kind: MediaKind::Image,
                    display_order: idx as i32,
                })
                .collect();
        }
        media.sort_by_key(|m| m.display_order);
        let (videos, media): (Vec<Media>, Vec<Media>) =
            media.into_iter().partition(|m| m.kind == MediaKind::Video);

        Property {
            id: wire.id,
            title: wire.title,
            description: wire.description,
            city: wire.city,
            neighborhood: wire.neighborhood,
            address: wire.address,
            purpose,
            condition,
            kind: wire.tipo,
            price: wire.price,
            rent_price: wire.rent_price,
            price_on_request: wire.price_on_request.unwrap_or(false),
            bedrooms: count(wire.bedrooms),
            bathrooms: count(wire.bathrooms),
            garages: count(wire.garages),
            area: wire.area.unwrap_or(0.0),
            is_featured: wire.is_featured.unwrap_or(false),
            state: if wire.active.unwrap_or(false) {
                ListingState::Published
            } else {
                ListingState::Draft
            },
            characteristics: wire.characteristics.unwrap_or_default(),
            media,
            videos,
            created_at: wire.created_at.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Body sent on create/update, always with the canonical field names
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PropertyPayload {
    pub title: String,
    pub description: String,
    pub finalidade: Option<&'static str>,
    pub condicao: Option<&'static str>,
    pub tipo: String,
    pub price: Option<f64>,
    pub price_on_request: bool,
    pub city: String,
    pub neighborhood: String,
    pub address: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub garages: u32,
    pub area: f64,
    pub is_featured: bool,
    pub active: bool,
    pub characteristics: Characteristics,
    pub images: Vec<String>,
}

impl From<&Property> for PropertyPayload {
    fn from(property: &Property) -> Self {
        PropertyPayload {
            title: property.title.clone(),
            description: property.description.clone(),
            finalidade: property.purpose.map(|p| p.as_wire()),
            condicao: property.condition.map(|c| c.as_wire()),
            tipo: property.kind.clone(),
            price: property.price,
            price_on_request: property.price_on_request,
            city: property.city.clone(),
            neighborhood: property.neighborhood.clone(),
            address: property.address.clone(),
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            garages: property.garages,
            area: property.area,
            is_featured: property.is_featured,
            active: property.state.is_published(),
            characteristics: property.characteristics.clone(),
            images: property.media.iter().map(|m| m.url.clone()).collect(),
        }
    }
}

fn count(value: Option<f64>) -> u32 {
    value.filter(|v| v.is_finite() && *v > 0.0).map(|v| v as u32).unwrap_or(0)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    })
}
