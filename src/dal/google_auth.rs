use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::sheet_db::{ensure_success, SheetError};

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a Google service-account key file that the token exchange needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

#[derive(Debug, Clone)]
pub enum GoogleCredentials {
    AccessToken(String),
    ServiceAccount(ServiceAccountKey),
}

#[derive(Deserialize)]
struct CredentialsPayload {
    #[serde(rename = "type")]
    kind: Option<String>,
    access_token: Option<String>,
    token: Option<String>,
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl GoogleCredentials {
    /// Reads `GOOGLE_CREDENTIALS_JSON`: a service-account key file, a JSON
    /// object carrying `access_token` (or `token`), or a raw access token.
    pub fn from_payload(payload: &str) -> Result<Self, SheetError> {
        let payload = payload.trim();
        if payload.is_empty() {
            return Err(SheetError::Credentials("payload is empty".to_string()));
        }

        if !payload.starts_with('{') {
            return Ok(GoogleCredentials::AccessToken(payload.to_string()));
        }

        let parsed: CredentialsPayload = serde_json::from_str(payload)
            .map_err(|e| SheetError::Credentials(format!("not valid json: {}", e)))?;

        if parsed.kind.as_deref() == Some("service_account") {
            let key: ServiceAccountKey = serde_json::from_str(payload).map_err(|e| {
                SheetError::Credentials(format!("incomplete service account key: {}", e))
            })?;
            return Ok(GoogleCredentials::ServiceAccount(key));
        }

        match parsed.access_token.or(parsed.token) {
            Some(token) if !token.trim().is_empty() => {
                Ok(GoogleCredentials::AccessToken(token.trim().to_string()))
            }
            _ => Err(SheetError::Credentials(
                "json payload is neither a service account key nor carries an access_token"
                    .to_string(),
            )),
        }
    }

    /// Bearer token for the Sheets API. Service accounts sign a JWT assertion
    /// and trade it at the key's `token_uri`.
    pub async fn access_token(&self, client: &Client) -> Result<String, SheetError> {
        match self {
            GoogleCredentials::AccessToken(token) => Ok(token.clone()),
            GoogleCredentials::ServiceAccount(key) => {
                let assertion = sign_assertion(key, jsonwebtoken::get_current_timestamp())?;
                exchange_assertion(client, &key.token_uri, &assertion).await
            }
        }
    }
}

pub fn sign_assertion(key: &ServiceAccountKey, issued_at: u64) -> Result<String, SheetError> {
    let claims = AssertionClaims {
        iss: &key.client_email,
        scope: SHEETS_SCOPE,
        aud: &key.token_uri,
        iat: issued_at,
        exp: issued_at + ASSERTION_LIFETIME_SECS,
    };
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;

    Ok(jsonwebtoken::encode(
        &Header::new(Algorithm::RS256),
        &claims,
        &encoding_key,
    )?)
}

async fn exchange_assertion(
    client: &Client,
    token_uri: &str,
    assertion: &str,
) -> Result<String, SheetError> {
    let res = client
        .post(token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
        .send()
        .await?;
    let token = ensure_success(res).await?.json::<TokenResponse>().await?;
    log::info!("Obtained a Sheets access token from {}", token_uri);

    Ok(token.access_token)
}
