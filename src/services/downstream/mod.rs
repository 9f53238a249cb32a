//! JSON-over-HTTP adapters for the services the gateway depends on.

pub mod catalog;
pub mod interactions;
pub mod users;

use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum DownstreamError {
    #[error("{service} service answered {status} for {endpoint}")]
    Status {
        service: &'static str,
        endpoint: Url,
        status: StatusCode,
    },
    #[error("request to {service} service at {endpoint} failed")]
    Transport {
        service: &'static str,
        endpoint: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} service returned an unreadable body for {endpoint}")]
    Decode {
        service: &'static str,
        endpoint: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} service URL {base} cannot be extended with a path")]
    InvalidBaseUrl { service: &'static str, base: Url },
}

impl DownstreamError {
    /// The dependency was reached and refused the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, DownstreamError::Status { .. })
    }
}

/// One downstream service: a base URL plus the shared HTTP client.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    service: &'static str,
    base: Url,
    http: Client,
}

impl ServiceClient {
    pub fn new(service: &'static str, base: Url, http: Client) -> Self {
        Self {
            service,
            base,
            http,
        }
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, DownstreamError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| DownstreamError::InvalidBaseUrl {
                service: self.service,
                base: self.base.clone(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, DownstreamError> {
        let endpoint = self.endpoint(segments)?;
        log::debug!("GET {}", endpoint);
        let response = self.http.get(endpoint.clone()).send().await;
        self.read_json(endpoint, response).await
    }

    pub async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, DownstreamError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let endpoint = self.endpoint(segments)?;
        log::debug!("POST {}", endpoint);
        let response = self.http.post(endpoint.clone()).json(body).send().await;
        self.read_json(endpoint, response).await
    }

    /// Only `200 OK` counts as success; anything else becomes [`DownstreamError::Status`].
    async fn read_json<T: DeserializeOwned>(
        &self,
        endpoint: Url,
        response: reqwest::Result<reqwest::Response>,
    ) -> Result<T, DownstreamError> {
        let response = match response {
            Ok(response) => response,
            Err(source) => {
                log::warn!("{} service unreachable at {}: {}", self.service, endpoint, source);
                return Err(DownstreamError::Transport {
                    service: self.service,
                    endpoint,
                    source,
                });
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            log::warn!("{} service answered {} for {}", self.service, status, endpoint);
            return Err(DownstreamError::Status {
                service: self.service,
                endpoint,
                status,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| DownstreamError::Decode {
                service: self.service,
                endpoint,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode as AxumStatus, routing::get};
    use serde_json::{Value, json};

    use super::*;
    use crate::test_utils::serve_stub;

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = ServiceClient::new(
            "interactions",
            Url::parse("http://localhost:8002/api/").unwrap(),
            Client::new(),
        );

        let url = client
            .endpoint(&["usuarios", "ana maria/1", "historial"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8002/api/usuarios/ana%20maria%2F1/historial"
        );
    }

    #[test]
    fn test_endpoint_rejects_non_base_url() {
        let client = ServiceClient::new(
            "users",
            Url::parse("mailto:ops@example.com").unwrap(),
            Client::new(),
        );

        assert!(matches!(
            client.endpoint(&["usuarios"]),
            Err(DownstreamError::InvalidBaseUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_json_success_and_rejection() {
        let base = serve_stub(
            Router::new()
                .route("/ok", get(|| async { axum::Json(json!([1, 2, 3])) }))
                .route("/down", get(|| async { AxumStatus::SERVICE_UNAVAILABLE })),
        )
        .await;
        let client = ServiceClient::new("content", base, Client::new());

        let ok: Value = client.get_json(&["ok"]).await.unwrap();
        assert_eq!(ok, json!([1, 2, 3]));

        let err = client.get_json::<Value>(&["down"]).await.unwrap_err();
        assert!(err.is_rejection());
        assert!(matches!(
            err,
            DownstreamError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let base = serve_stub(Router::new().route("/text", get(|| async { "not json" }))).await;
        let client = ServiceClient::new("content", base, Client::new());

        let err = client.get_json::<Value>(&["text"]).await.unwrap_err();
        assert!(matches!(err, DownstreamError::Decode { .. }));
        assert!(!err.is_rejection());
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // Bind then drop a listener so the port is known to be closed
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = Url::parse(&format!("http://{addr}")).unwrap();
        let client = ServiceClient::new("users", base, Client::new());

        let err = client.get_json::<Value>(&["planes-suscripcion"]).await.unwrap_err();
        assert!(matches!(err, DownstreamError::Transport { .. }));
    }
}
