// ABOUTME: HTTP-backed catalog backend
// ABOUTME: Talks to a Project Sleep API server using the `{data: ...}` response envelope

use async_trait::async_trait;
use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sleep_core::{
    ApplicationForm, Device, DeviceInput, Feature, FeatureInput, LoginRequest, LoginResponse,
    ReviewDecision, RomCreateInput, RomWithDevice, TeamApplication, TeamMember, User,
};
use tracing::{debug, warn};
use url::Url;

use crate::error::{StorageError, StorageResult};
use crate::query::RomQuery;
use crate::store::CatalogStore;

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Serialize)]
struct StatusBody {
    status: ReviewDecision,
}

/// Catalog backed by a remote API. Mutating calls need a bearer token.
#[derive(Clone)]
pub struct RemoteStore {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl RemoteStore {
    pub fn new(base_url: &str) -> StorageResult<Self> {
        // Keep the last path segment when joining relative paths
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> StorageResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn request<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> StorageResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("{} {}", method, url);

        let mut builder = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json");

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(status, &text);
            warn!(status = %status, "Remote call failed: {}", message);
            return Err(match status {
                StatusCode::UNAUTHORIZED => StorageError::Unauthorized,
                _ => StorageError::Remote {
                    status: Some(status.as_u16()),
                    message,
                },
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn get_data<T: DeserializeOwned>(&self, url: Url) -> StorageResult<T> {
        let envelope: Envelope<T> = self.request::<(), _>(Method::GET, url, None).await?;
        Ok(envelope.data)
    }

    async fn send_data<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> StorageResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let envelope: Envelope<T> = self.request(method, self.url(path)?, body).await?;
        Ok(envelope.data)
    }

    /// Exchange credentials for a session. Wrong credentials map to
    /// `InvalidCredentials` without further detail.
    pub async fn login(&self, email: &str, password: &str) -> StorageResult<User> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self
            .request(Method::POST, self.url("login")?, Some(&body))
            .await
            .map_err(|e| match e {
                StorageError::Unauthorized => StorageError::InvalidCredentials,
                other => other,
            })?;

        Ok(response.into())
    }
}

/// Message for a failed call: the body's `message` (top level or under
/// `error`), or a generic status line.
fn error_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    parsed
        .as_ref()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error").and_then(|e| e.get("message")))
                .or_else(|| v.get("error"))
        })
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("API Error: {}", status.as_u16()))
}

#[async_trait]
impl CatalogStore for RemoteStore {
    async fn list_features(&self) -> StorageResult<Vec<Feature>> {
        self.get_data(self.url("features")?).await
    }

    async fn create_feature(&self, input: FeatureInput) -> StorageResult<Feature> {
        self.send_data(Method::POST, "features", Some(&input)).await
    }

    async fn update_feature(&self, feature: Feature) -> StorageResult<Feature> {
        let id = feature.id;
        let _: bool = self
            .send_data(Method::PUT, &format!("features/{}", id), Some(&feature))
            .await
            .map_err(|e| e.or_not_found("Feature", id))?;
        Ok(feature)
    }

    async fn delete_feature(&self, id: u32) -> StorageResult<()> {
        let _: bool = self
            .send_data::<(), _>(Method::DELETE, &format!("features/{}", id), None)
            .await
            .map_err(|e| e.or_not_found("Feature", id))?;
        Ok(())
    }

    async fn list_devices(&self) -> StorageResult<Vec<Device>> {
        self.get_data(self.url("devices")?).await
    }

    async fn create_device(&self, input: DeviceInput) -> StorageResult<Device> {
        self.send_data(Method::POST, "devices", Some(&input)).await
    }

    async fn update_device(&self, device: Device) -> StorageResult<Device> {
        let id = device.id;
        self.send_data(Method::PUT, &format!("devices/{}", id), Some(&device))
            .await
            .map_err(|e| e.or_not_found("Device", id))
    }

    async fn delete_device(&self, id: u32) -> StorageResult<()> {
        let _: bool = self
            .send_data::<(), _>(Method::DELETE, &format!("devices/{}", id), None)
            .await
            .map_err(|e| e.or_not_found("Device", id))?;
        Ok(())
    }

    async fn query_roms(&self, query: &RomQuery) -> StorageResult<Vec<RomWithDevice>> {
        let mut url = self.url("roms")?;
        {
            let mut pairs = url.query_pairs_mut();
            if !query.search_term().is_empty() {
                pairs.append_pair("q", query.search_term());
            }
            if let Some(types) = query.types_param() {
                pairs.append_pair("types", &types);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }

        self.get_data(url).await
    }

    async fn create_rom(&self, input: RomCreateInput) -> StorageResult<()> {
        let _: bool = self.send_data(Method::POST, "roms", Some(&input)).await?;
        Ok(())
    }

    async fn update_rom(&self, rom: RomWithDevice) -> StorageResult<()> {
        let id = rom.rom.id;
        let payload = RomWithDevice {
            rom: rom.clone().into_rom(),
            device: rom.device,
        };

        let _: bool = self
            .send_data(Method::PUT, &format!("roms/{}", id), Some(&payload))
            .await
            .map_err(|e| e.or_not_found("Rom", id))?;
        Ok(())
    }

    async fn delete_rom(&self, id: u32) -> StorageResult<()> {
        let _: bool = self
            .send_data::<(), _>(Method::DELETE, &format!("roms/{}", id), None)
            .await
            .map_err(|e| e.or_not_found("Rom", id))?;
        Ok(())
    }

    async fn list_team(&self) -> StorageResult<Vec<TeamMember>> {
        self.get_data(self.url("team")?).await
    }

    async fn submit_application(&self, form: ApplicationForm) -> StorageResult<()> {
        let _: bool = self
            .send_data(Method::POST, "applications", Some(&form))
            .await?;
        Ok(())
    }

    async fn list_applications(&self) -> StorageResult<Vec<TeamApplication>> {
        self.get_data(self.url("admin/applications")?).await
    }

    async fn set_application_status(
        &self,
        id: u32,
        decision: ReviewDecision,
    ) -> StorageResult<TeamApplication> {
        let body = StatusBody { status: decision };
        let _: bool = self
            .send_data(
                Method::PUT,
                &format!("admin/applications/{}/status", id),
                Some(&body),
            )
            .await
            .map_err(|e| e.or_not_found("Application", id))?;

        // The status endpoint only acknowledges; read the record back
        self.list_applications()
            .await?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(StorageError::not_found("Application", id))
    }
}
