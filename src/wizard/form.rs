use crate::error::{DeskError, Result};
use crate::models::{CharacteristicGroup, Characteristics, Condition, ListingState, Property, Purpose};
use crate::search::{currency_to_number, mask_currency_brl};

pub const INTERIOR_CHARACTERISTICS: &[&str] = &[
    "Ar condicionado",
    "Armário banheiro",
    "Box banheiro",
    "Despensa",
    "Área de serviço",
    "Lavabo",
    "Área privativa",
    "Armário cozinha",
    "Closet",
    "Armário quarto",
    "Rouparia",
    "Varanda gourmet",
    "DCE",
];

pub const EXTERIOR_CHARACTERISTICS: &[&str] = &["Segurança 24 horas", "Interfone", "Portaria 24 horas"];

pub const LEISURE_CHARACTERISTICS: &[&str] = &[
    "Salão de festas",
    "Churrasqueira",
    "Piscina",
    "Espaço Gourmet",
    "Hidromassagem",
    "Playground",
];

pub fn characteristic_catalog(group: CharacteristicGroup) -> &'static [&'static str] {
    match group {
        CharacteristicGroup::Interior => INTERIOR_CHARACTERISTICS,
        CharacteristicGroup::Exterior => EXTERIOR_CHARACTERISTICS,
        CharacteristicGroup::Leisure => LEISURE_CHARACTERISTICS,
    }
}

/// Descriptive and classification fields edited in the info stage.
///
/// Purpose and condition are private so the pair can never become invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyForm {
    pub title: String,
    pub description: String,
    purpose: Purpose,
    condition: Condition,
    pub kind: String,
    /// Masked display string, e.g. "R$ 450.000,00"
    pub price: String,
    pub price_on_request: bool,
    pub city: String,
    pub neighborhood: String,
    pub address: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub garages: u32,
    pub area: f64,
    pub is_featured: bool,
    pub characteristics: Characteristics,
}

impl Default for PropertyForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            purpose: Purpose::Sale,
            condition: Condition::New,
            kind: "apartamento".to_string(),
            price: String::new(),
            price_on_request: false,
            city: String::new(),
            neighborhood: String::new(),
            address: String::new(),
            bedrooms: 0,
            bathrooms: 0,
            garages: 0,
            area: 0.0,
            is_featured: false,
            characteristics: Characteristics::default(),
        }
    }
}

impl PropertyForm {
    pub fn from_property(property: &Property) -> Self {
        let mut form = Self {
            title: property.title.clone(),
            description: property.description.clone(),
            kind: property.kind.clone(),
            price: property
                .price
                .filter(|p| *p > 0.0)
                .map(|p| mask_currency_brl(&format!("{:.0}", p * 100.0)))
                .unwrap_or_default(),
            price_on_request: property.price_on_request,
            city: property.city.clone(),
            neighborhood: property.neighborhood.clone(),
            address: property.address.clone(),
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            garages: property.garages,
            area: property.area,
            is_featured: property.is_featured,
            characteristics: property.characteristics.clone(),
            ..Self::default()
        };
        form.set_purpose(property.purpose.unwrap_or_default());
        if let Some(condition) = property.condition {
            // A stored pair that no longer fits keeps the reset from set_purpose
            let _ = form.set_condition(condition);
        }
        form
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn condition_options(&self) -> &'static [Condition] {
        self.purpose.valid_conditions()
    }

    /// Changes purpose, falling back to its first condition when the current one no longer fits
    pub fn set_purpose(&mut self, purpose: Purpose) {
        self.purpose = purpose;
        let valid = purpose.valid_conditions();
        if !valid.contains(&self.condition) {
            self.condition = valid[0];
        }
    }

    pub fn set_condition(&mut self, condition: Condition) -> Result<()> {
        if !self.condition_options().contains(&condition) {
            return Err(DeskError::Validation(format!(
                "Condição {} não se aplica a {}",
                condition.label(),
                self.purpose.label()
            )));
        }
        self.condition = condition;
        Ok(())
    }

    pub fn set_price(&mut self, raw: &str) {
        self.price = mask_currency_brl(raw);
    }

    pub fn toggle_characteristic(&mut self, group: CharacteristicGroup, tag: &str) -> bool {
        self.characteristics.toggle(group, tag)
    }

    /// Checks required fields and builds the record to save
    pub fn validate(&self) -> Result<Property> {
        if self.title.trim().is_empty() {
            return Err(DeskError::Validation("Título do imóvel é obrigatório".to_string()));
        }
        if self.city.trim().is_empty() {
            return Err(DeskError::Validation("Cidade é obrigatória".to_string()));
        }
        if !self.area.is_finite() || self.area < 0.0 {
            return Err(DeskError::Validation("Área inválida".to_string()));
        }

        let price = if self.price.trim().is_empty() {
            None
        } else {
            Some(currency_to_number(&self.price))
        };

        Ok(Property {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            city: self.city.trim().to_string(),
            neighborhood: self.neighborhood.trim().to_string(),
            address: self.address.trim().to_string(),
            purpose: Some(self.purpose),
            condition: Some(self.condition),
            kind: self.kind.clone(),
            price,
            price_on_request: self.price_on_request,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            garages: self.garages,
            area: self.area,
            is_featured: self.is_featured,
            state: ListingState::Draft,
            characteristics: self.characteristics.clone(),
            ..Property::default()
        })
    }
}
