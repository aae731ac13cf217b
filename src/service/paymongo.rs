use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

const PAYMONGO_API: &str = "https://api.paymongo.com/v1";

#[derive(Debug, thiserror::Error)]
pub enum PayMongoError {
    #[error("paymongo request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("paymongo rejected the request ({status}): {detail}")]
    Api { status: StatusCode, detail: String },
}

/// A PayMongo payment link. The gateway hosts the checkout page;
/// we only keep the id for later status lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub id: String,
    pub checkout_url: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct LinkEnvelope {
    data: LinkData,
}

#[derive(Debug, Deserialize)]
struct LinkData {
    id: String,
    attributes: LinkAttributes,
}

#[derive(Debug, Deserialize)]
struct LinkAttributes {
    checkout_url: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    detail: String,
}

#[derive(Debug, Clone)]
pub struct PayMongoClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl PayMongoClient {
    pub fn new(secret_key: &str) -> Self {
        Self::with_base_url(secret_key, PAYMONGO_API)
    }

    pub fn with_base_url(secret_key: &str, base_url: impl Into<String>) -> Self {
        let auth_header = format!("Basic {}", STANDARD.encode(format!("{}:", secret_key)));
        PayMongoClient {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            auth_header,
        }
    }

    /// Creates a payment link. `amount_centavos` is the amount in centavos,
    /// as required by the gateway (PHP 1,500.00 is sent as 150000).
    pub async fn create_link(
        &self,
        amount_centavos: i64,
        description: &str,
    ) -> Result<Link, PayMongoError> {
        let body = json!({
            "data": {
                "attributes": {
                    "amount": amount_centavos,
                    "currency": "PHP",
                    "description": description,
                }
            }
        });

        let response = self
            .client
            .post(format!("{}/links", self.base_url))
            .header("Authorization", &self.auth_header)
            .json(&body)
            .send()
            .await?;

        Self::parse_link(response).await
    }

    pub async fn get_link(&self, link_id: &str) -> Result<Link, PayMongoError> {
        let response = self
            .client
            .get(format!("{}/links/{}", self.base_url, link_id))
            .header("Authorization", &self.auth_header)
            .send()
            .await?;

        Self::parse_link(response).await
    }

    async fn parse_link(response: reqwest::Response) -> Result<Link, PayMongoError> {
        let status = response.status();

        if !status.is_success() {
            let detail = match response.json::<ApiErrorEnvelope>().await {
                Ok(envelope) => envelope
                    .errors
                    .into_iter()
                    .next()
                    .map(|err| err.detail)
                    .unwrap_or_else(|| "unknown error".to_string()),
                Err(_) => "unknown error".to_string(),
            };
            return Err(PayMongoError::Api { status, detail });
        }

        let envelope = response.json::<LinkEnvelope>().await?;

        Ok(Link {
            id: envelope.data.id,
            checkout_url: envelope.data.attributes.checkout_url,
            status: envelope.data.attributes.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_link_returns_checkout_url() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/links")
            .match_header("authorization", mockito::Matcher::Regex("^Basic ".into()))
            .with_status(200)
            .with_body(
                r#"{"data":{"id":"link_abc123","attributes":{"checkout_url":"https://pm.link/abc123","status":"unpaid"}}}"#,
            )
            .create_async()
            .await;

        let client = PayMongoClient::with_base_url("sk_test_secret", server.url());
        let link = client.create_link(150000, "Rent for August 2026").await.unwrap();

        mock.assert_async().await;
        assert_eq!(link.id, "link_abc123");
        assert_eq!(link.checkout_url, "https://pm.link/abc123");
        assert_eq!(link.status, "unpaid");
    }

    #[tokio::test]
    async fn test_get_link_reports_paid_status() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/links/link_abc123")
            .with_status(200)
            .with_body(
                r#"{"data":{"id":"link_abc123","attributes":{"checkout_url":"https://pm.link/abc123","status":"paid"}}}"#,
            )
            .create_async()
            .await;

        let client = PayMongoClient::with_base_url("sk_test_secret", server.url());
        let link = client.get_link("link_abc123").await.unwrap();

        assert_eq!(link.status, "paid");
    }

    #[tokio::test]
    async fn test_api_error_surfaces_detail() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/links")
            .with_status(400)
            .with_body(r#"{"errors":[{"detail":"amount must be at least 10000"}]}"#)
            .create_async()
            .await;

        let client = PayMongoClient::with_base_url("sk_test_secret", server.url());
        let err = client.create_link(50, "Rent").await.unwrap_err();

        match err {
            PayMongoError::Api { status, detail } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(detail, "amount must be at least 10000");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
