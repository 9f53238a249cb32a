use serde::{Deserialize, Deserializer, Serialize};

use crate::services::downstream::DownstreamError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "idioma")]
    pub language: Option<String>,
    #[serde(rename = "idPlanSuscripcion")]
    pub subscription_plan: String,
}

/// The part of a user record the gateway cares about.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserIdentity {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
}

/// User ids arrive as strings or integers depending on the user service's store.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

/// Port for the user/auth service.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<UserIdentity, DownstreamError>;

    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<UserIdentity, DownstreamError>;

    async fn subscription_plans(&self) -> Result<serde_json::Value, DownstreamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_accepts_numeric_and_text_ids() {
        let numeric: UserIdentity = serde_json::from_str(r#"{"id": 42, "email": "a@b.c"}"#).unwrap();
        assert_eq!(numeric.id.as_deref(), Some("42"));

        let text: UserIdentity = serde_json::from_str(r#"{"id": "u-7"}"#).unwrap();
        assert_eq!(text.id.as_deref(), Some("u-7"));

        let missing: UserIdentity = serde_json::from_str(r#"{"email": "a@b.c"}"#).unwrap();
        assert_eq!(missing.id, None);
    }

    #[test]
    fn test_registration_wire_names() {
        let request = RegistrationRequest {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "secret".into(),
            language: None,
            subscription_plan: "2".into(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nombre": "Ana",
                "email": "ana@example.com",
                "password": "secret",
                "idioma": null,
                "idPlanSuscripcion": "2",
            })
        );
    }
}
