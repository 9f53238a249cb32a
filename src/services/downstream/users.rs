use reqwest::Client;
use url::Url;

use crate::ports::users::{LoginRequest, RegistrationRequest, UserDirectory, UserIdentity};
use crate::services::downstream::{DownstreamError, ServiceClient};

pub struct UserServiceHttpAdapter {
    client: ServiceClient,
}

impl UserServiceHttpAdapter {
    pub fn new(base: Url, http: Client) -> Self {
        Self {
            client: ServiceClient::new("users", base, http),
        }
    }
}

#[async_trait::async_trait]
impl UserDirectory for UserServiceHttpAdapter {
    async fn login(&self, request: &LoginRequest) -> Result<UserIdentity, DownstreamError> {
        self.client
            .post_json(&["usuarios", "login"], request)
            .await
    }

    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<UserIdentity, DownstreamError> {
        self.client
            .post_json(&["usuarios", "registro"], request)
            .await
    }

    async fn subscription_plans(&self) -> Result<serde_json::Value, DownstreamError> {
        self.client.get_json(&["planes-suscripcion"]).await
    }
}
