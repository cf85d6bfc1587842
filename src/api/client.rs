use crate::api::traits::{CredentialProvider, ListingBackend, MemoryCredentials};
use crate::api::types::{
    ChangePasswordRequest, LoginRequest, MediaOrderRequest, PropertyQuery, UploadFile,
    VideoUrlRequest,
};
use crate::config::DeskConfig;
use crate::error::{DeskError, Result};
use crate::models::{
    AdminUser, AuthToken, Media, Neighborhood, Property, PropertyPayload, SettingValue,
    SiteSettings, WireMedia, WireProperty,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// REST client for the listings backend
pub struct RestClient {
    client: Client,
    config: DeskConfig,
    credentials: Arc<dyn CredentialProvider>,
}

impl RestClient {
    /// Client holding its token in memory, seeded from `config.api_token`
    pub fn new(config: DeskConfig) -> Result<Self> {
        let credentials = Arc::new(MemoryCredentials::new(config.api_token.clone()));
        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(config: DeskConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("property-desk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config, credentials })
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// Adds the bearer token when one is known
    fn with_token(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Adds the bearer token, refusing to send without one
    fn authed(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.credentials.token().ok_or(DeskError::NotAuthenticated)?;
        Ok(request.bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder, fallback: &str) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        warn!("Backend returned status: {}", status);
        if status == StatusCode::UNAUTHORIZED {
            return Err(DeskError::NotAuthenticated);
        }
        let body = response.text().await.unwrap_or_default();
        Err(DeskError::from_response(status.as_u16(), &body, fallback))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, fallback: &str) -> Result<T> {
        let response = self.send(request, fallback).await?;
        let body = response.text().await?;
        debug!("Received {} bytes", body.len());
        Ok(serde_json::from_str(&body)?)
    }

    fn file_form(file: &UploadFile) -> Result<Form> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        Ok(Form::new().part("file", part))
    }

    // --- auth ---

    /// Logs in and keeps the returned token for later calls
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken> {
        let request = self
            .client
            .post(self.url("auth/login"))
            .json(&LoginRequest { email, password });
        let token: AuthToken = self.send_json(request, "Erro ao fazer login").await?;
        self.credentials.store(&token.access_token);
        info!("Logged in as {}", email);
        Ok(token)
    }

    pub async fn me(&self) -> Result<AdminUser> {
        let request = self.authed(self.client.get(self.url("auth/me")))?;
        self.send_json(request, "Erro ao carregar usuário").await
    }

    pub async fn change_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        let request = self.authed(self.client.post(self.url("auth/change-password")))?.json(
            &ChangePasswordRequest { current_password, new_password },
        );
        self.send(request, "Erro ao trocar senha").await?;
        Ok(())
    }

    pub fn logout(&self) {
        self.credentials.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.token().is_some()
    }

    // --- neighborhoods ---

    pub async fn list_neighborhoods(&self) -> Result<Vec<Neighborhood>> {
        let request = self.with_token(self.client.get(self.url("neighborhoods")));
        let mut neighborhoods: Vec<Neighborhood> =
            self.send_json(request, "Erro ao buscar destaques").await?;
        neighborhoods.sort_by_key(|n| n.order_index);
        Ok(neighborhoods)
    }

    pub async fn create_neighborhood(&self, neighborhood: &Neighborhood) -> Result<Neighborhood> {
        let request = self.authed(self.client.post(self.url("neighborhoods")))?.json(neighborhood);
        self.send_json(request, "Erro ao salvar destaque").await
    }

    pub async fn update_neighborhood(&self, id: &str, neighborhood: &Neighborhood) -> Result<Neighborhood> {
        let request = self
            .authed(self.client.put(self.url(&format!("neighborhoods/{id}"))))?
            .json(neighborhood);
        self.send_json(request, "Erro ao salvar destaque").await
    }

    pub async fn set_neighborhood_active(&self, id: &str, active: bool) -> Result<()> {
        let request = self
            .authed(self.client.put(self.url(&format!("neighborhoods/{id}"))))?
            .json(&json!({ "active": active }));
        self.send(request, "Erro ao atualizar destaque").await?;
        Ok(())
    }

    pub async fn delete_neighborhood(&self, id: &str) -> Result<()> {
        let request = self.authed(self.client.delete(self.url(&format!("neighborhoods/{id}"))))?;
        self.send(request, "Erro ao deletar destaque").await?;
        Ok(())
    }

    // --- settings ---

    pub async fn settings(&self) -> Result<SiteSettings> {
        let request = self.client.get(self.url("settings"));
        self.send_json(request, "Erro ao carregar configurações").await
    }

    pub async fn update_setting(&self, key: &str, value: &SettingValue) -> Result<()> {
        let request = self
            .authed(self.client.put(self.url(&format!("settings/{key}"))))?
            .json(&json!({ "key": key, "value": value }));
        self.send(request, "Erro ao salvar configuração").await?;
        info!("Updated setting {}", key);
        Ok(())
    }

    pub async fn upload_hero_image(&self, file: &UploadFile) -> Result<SettingValue> {
        let request = self
            .authed(self.client.post(self.url("settings/upload-hero-image")))?
            .multipart(Self::file_form(file)?);
        self.send_json(request, "Erro ao enviar imagem").await
    }
}

#[async_trait]
impl ListingBackend for RestClient {
    async fn list_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>> {
        debug!("Fetching properties with {:?}", query);
        let request = self
            .with_token(self.client.get(self.url("properties")))
            .query(&query.to_pairs());
        let wire: Vec<WireProperty> = self.send_json(request, "Erro ao buscar imóveis").await?;
        Ok(wire.into_iter().map(Property::from).collect())
    }

    async fn get_property(&self, id: &str) -> Result<Property> {
        let request = self.with_token(self.client.get(self.url(&format!("properties/{id}"))));
        let wire: WireProperty = self.send_json(request, "Imóvel não encontrado").await?;
        Ok(wire.into())
    }

    async fn create_property(&self, property: &Property) -> Result<Property> {
        let request = self
            .authed(self.client.post(self.url("properties")))?
            .json(&PropertyPayload::from(property));
        let wire: WireProperty = self.send_json(request, "Erro ao criar imóvel").await?;
        Ok(wire.into())
    }

    async fn update_property(&self, id: &str, property: &Property) -> Result<Property> {
        let request = self
            .authed(self.client.put(self.url(&format!("properties/{id}"))))?
            .json(&PropertyPayload::from(property));
        let wire: WireProperty = self.send_json(request, "Erro ao salvar imóvel").await?;
        Ok(wire.into())
    }

    async fn set_property_active(&self, id: &str, active: bool) -> Result<()> {
        let request = self
            .authed(self.client.put(self.url(&format!("properties/{id}"))))?
            .json(&json!({ "active": active }));
        self.send(request, "Erro ao atualizar imóvel").await?;
        Ok(())
    }

    async fn delete_property(&self, id: &str) -> Result<()> {
        let request = self.authed(self.client.delete(self.url(&format!("properties/{id}"))))?;
        self.send(request, "Erro ao deletar imóvel").await?;
        info!("Deleted property {}", id);
        Ok(())
    }

    async fn list_media(&self, property_id: &str) -> Result<Vec<Media>> {
        let request = self.with_token(
            self.client
                .get(self.url(&format!("properties/{property_id}/media"))),
        );
        let wire: Vec<WireMedia> = self.send_json(request, "Erro ao carregar mídias").await?;
        let mut media: Vec<Media> = wire.into_iter().map(Media::from).collect();
        media.sort_by_key(|m| m.display_order);
        Ok(media)
    }

    async fn upload_media(&self, property_id: &str, file: &UploadFile) -> Result<Media> {
        debug!("Uploading {} ({} bytes)", file.file_name, file.size());
        let request = self
            .authed(
                self.client
                    .post(self.url(&format!("properties/{property_id}/media"))),
            )?
            .multipart(Self::file_form(file)?);
        let wire: WireMedia = self.send_json(request, "Erro ao fazer upload").await?;
        Ok(wire.into())
    }

    async fn delete_media(&self, property_id: &str, media_id: &str) -> Result<()> {
        let request = self.authed(
            self.client
                .delete(self.url(&format!("properties/{property_id}/media/{media_id}"))),
        )?;
        self.send(request, "Erro ao deletar mídia").await?;
        Ok(())
    }

    async fn update_media_order(&self, property_id: &str, media_id: &str, display_order: i32) -> Result<()> {
        let request = self
            .authed(
                self.client
                    .put(self.url(&format!("properties/{property_id}/media/{media_id}/order"))),
            )?
            .json(&MediaOrderRequest { display_order });
        self.send(request, "Erro ao atualizar ordem").await?;
        Ok(())
    }

    async fn add_video_url(&self, property_id: &str, video_url: &str) -> Result<Media> {
        let request = self
            .authed(
                self.client
                    .post(self.url(&format!("properties/{property_id}/media/video-url"))),
            )?
            .json(&VideoUrlRequest { video_url });
        let wire: WireMedia = self.send_json(request, "Erro ao adicionar vídeo").await?;
        Ok(wire.into())
    }
}
