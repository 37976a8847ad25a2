use bistro_engine::traits::InsertUserResult;
use serde::{Deserialize, Serialize};

/// The identity payload a client posts to `/jwt`. Any additional fields the client sends are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceRequest {
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecretResponse {
    pub client_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdminResponse {
    pub admin: bool,
}

/// The response to a registration. When the email is already known, nothing is inserted and `inserted_id` is
/// `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledged: Option<bool>,
    pub inserted_id: Option<i64>,
}

impl From<InsertUserResult> for RegistrationResponse {
    fn from(value: InsertUserResult) -> Self {
        match value {
            InsertUserResult::Inserted(id) => Self { message: None, acknowledged: Some(true), inserted_id: Some(id) },
            InsertUserResult::AlreadyExists(_) => {
                Self { message: Some("user already exists".to_string()), acknowledged: None, inserted_id: None }
            },
        }
    }
}
