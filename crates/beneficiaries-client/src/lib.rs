use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::Context;
use beneficiaries_types::domain::beneficiary::{Beneficiary, Sex};
use beneficiaries_types::domain::document_type::DocumentType;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct BeneficiariesClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

#[derive(Clone)]
pub struct BeneficiariesClient {
    base: Url,
    client: reqwest::Client,
}

/// Non-success answer from the API, with the server's message and any field errors.
#[derive(thiserror::Error, Debug)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub errors: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize, Default)]
struct ErrorPayload {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: BTreeMap<String, Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct MessageBody {
    message: String,
}

async fn check(res: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    let payload: ErrorPayload = serde_json::from_str(&body).unwrap_or_default();
    tracing::debug!(%status, message = %payload.message, "api error");
    Err(ApiError {
        status,
        message: payload.message,
        errors: payload.errors,
    }
    .into())
}

impl BeneficiariesClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<BeneficiariesClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(BeneficiariesClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    pub async fn list_beneficiaries(
        &self,
        only_active: Option<bool>,
    ) -> anyhow::Result<Vec<Beneficiary>> {
        let mut req = self.client.get(self.url("beneficiaries")?);
        if let Some(flag) = only_active {
            req = req.query(&[("onlyActive", flag)]);
        }
        let res = check(req.send().await?).await?;
        Ok(res.json().await?)
    }

    pub async fn list_active(&self) -> anyhow::Result<Vec<Beneficiary>> {
        let res = self
            .client
            .get(self.url("beneficiaries/active")?)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn list_inactive(&self) -> anyhow::Result<Vec<Beneficiary>> {
        let res = self
            .client
            .get(self.url("beneficiaries/inactive")?)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn get_beneficiary(&self, id: i32) -> anyhow::Result<Beneficiary> {
        let res = self
            .client
            .get(self.url(&format!("beneficiaries/{id}"))?)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn create_beneficiary(&self, req: &BeneficiaryRequest) -> anyhow::Result<Beneficiary> {
        let res = self
            .client
            .post(self.url("beneficiaries")?)
            .json(req)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn update_beneficiary(
        &self,
        id: i32,
        req: &BeneficiaryRequest,
    ) -> anyhow::Result<Beneficiary> {
        let res = self
            .client
            .put(self.url(&format!("beneficiaries/{id}"))?)
            .json(req)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    /// Soft delete. Returns the server's confirmation message.
    pub async fn delete_beneficiary(&self, id: i32) -> anyhow::Result<String> {
        let res = self
            .client
            .delete(self.url(&format!("beneficiaries/{id}"))?)
            .send()
            .await?;
        let body: MessageBody = check(res).await?.json().await?;
        Ok(body.message)
    }

    pub async fn restore_beneficiary(&self, id: i32) -> anyhow::Result<String> {
        let res = self
            .client
            .patch(self.url(&format!("beneficiaries/{id}/restore"))?)
            .send()
            .await?;
        let body: MessageBody = check(res).await?.json().await?;
        Ok(body.message)
    }

    pub async fn list_document_types(&self) -> anyhow::Result<Vec<DocumentType>> {
        let res = self
            .client
            .get(self.url("document-types")?)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn get_document_type(&self, id: i32) -> anyhow::Result<DocumentType> {
        let res = self
            .client
            .get(self.url(&format!("document-types/{id}"))?)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }
}

impl BeneficiariesClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<BeneficiariesClient> {
        if let Some(client) = self.client {
            return Ok(BeneficiariesClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(BeneficiariesClient {
            base: self.base,
            client,
        })
    }
}

/// Body for create and update calls.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryRequest {
    pub names: String,
    pub surnames: String,
    pub document_type_id: i32,
    pub document_number: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
}
