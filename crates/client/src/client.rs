use std::time::Duration;

use models::{Patch, Payment};
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, Method, Url,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{ApiContext, Exchange, PayRestError, RequestFailed};

const REQUEST_ID_HEADER: &str = "PayPal-Request-Id";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    expires_in: u64,
}

/// Client for the payments resource of the REST API.
pub struct PaymentClient {
    context: ApiContext,
    client: Client,
}

impl PaymentClient {
    pub fn new(context: ApiContext) -> Self {
        Self {
            context,
            client: Client::new(),
        }
    }

    #[inline]
    pub fn context(&self) -> &ApiContext {
        &self.context
    }

    /// Creates a payment. The service deduplicates on the request id, so a
    /// context with a fixed request id creates at most one payment.
    pub async fn create_payment(
        &self,
        payment: &Payment,
    ) -> Result<Exchange<Payment>, RequestFailed> {
        self.send(Method::POST, &["v1", "payments", "payment"], Some(payment))
            .await
    }

    pub async fn get_payment(&self, id: &str) -> Result<Exchange<Payment>, RequestFailed> {
        self.send::<(), _>(Method::GET, &["v1", "payments", "payment", id], None)
            .await
    }

    /// Applies `patches` in order to the payment `id`. The patches are sent
    /// as given; the service reports any it cannot apply.
    pub async fn update_payment(
        &self,
        id: &str,
        patches: &[Patch],
    ) -> Result<Exchange<Payment>, RequestFailed> {
        self.send(
            Method::PATCH,
            &["v1", "payments", "payment", id],
            Some(patches),
        )
        .await
    }

    async fn send<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Exchange<T>, RequestFailed>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| RequestFailed::new(err, None))?;

        match self.execute(method, segments, request.clone()).await {
            Ok((resource, response)) => Ok(Exchange {
                resource,
                request,
                response,
            }),
            Err(err) => {
                tracing::warn!(path = %segments.join("/"), error = %err, "request failed");
                Err(RequestFailed::new(err, request))
            }
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<String>,
    ) -> Result<(T, String), PayRestError> {
        let url = self.resource_url(segments)?;
        let token = self.access_token().await?;
        let request_id = self.context.next_request_id();
        tracing::debug!(
            method = %method,
            url = url.as_str(),
            request_id = request_id.as_str(),
            "send"
        );

        let mut builder = self
            .client
            .request(method, url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id);
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(status = status.as_u16(), "response");

        if !status.is_success() {
            return Err(PayRestError::remote(status, &text));
        }
        Ok((serde_json::from_str(&text)?, text))
    }

    async fn access_token(&self) -> Result<String, PayRestError> {
        if let Some(token) = self.context.cached_token() {
            return Ok(token);
        }

        let resp = self
            .client
            .post(self.resource_url(&["v1", "oauth2", "token"])?)
            .basic_auth(&self.context.client_id, Some(&self.context.client_secret))
            .header(ACCEPT, "application/json")
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(PayRestError::remote(status, &text));
        }

        let token_resp: TokenResponse = serde_json::from_str(&text)?;
        let token = token_resp
            .access_token
            .ok_or(PayRestError::Authentication)?;
        tracing::debug!(expires_in = token_resp.expires_in, "obtained access token");
        self.context
            .store_token(token.clone(), Duration::from_secs(token_resp.expires_in));
        Ok(token)
    }

    /// Appends `segments` to the base url, percent-encoding each one so that
    /// ids containing `/`, `?` or `#` stay a single path segment.
    fn resource_url(&self, segments: &[&str]) -> Result<Url, PayRestError> {
        let base_url = self.context.base_url();
        let invalid = || PayRestError::InvalidEndpoint {
            endpoint: base_url.to_string(),
        };

        let mut url = Url::parse(base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
