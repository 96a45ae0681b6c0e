//! DigitalOcean HTTP request methods

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::DigitalOceanProvider;
use super::types::ErrorResponse;

impl DigitalOceanProvider {
    /// Turn a non-2xx response into a `ProviderError`.
    fn handle_response_error(
        &self,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<()> {
        if HttpUtils::is_success(status) {
            return Ok(());
        }

        let raw = match serde_json::from_str::<ErrorResponse>(response_text) {
            Ok(body) => RawApiError::with_status(
                status,
                body.id,
                body.message.unwrap_or_else(|| format!("HTTP {status}")),
            ),
            Err(_) => RawApiError::with_status(status, None, format!("HTTP {status}")),
        };
        log::error!("[{}] API error: {}", self.provider_name(), raw.message);
        Err(self.map_error(raw, ctx))
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.bearer_auth(&self.api_key)
    }

    /// GET request
    pub(crate) async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let request = self.authorized(self.client.get(&url));

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), "GET", &url).await?;

        self.handle_response_error(status, &response_text, ctx)?;
        HttpUtils::parse_json(&response_text, self.provider_name())
    }

    /// POST request with a JSON body
    pub(crate) async fn post<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let payload = serde_json::to_string(body).map_err(|e| self.serialization_error(e))?;
        log::debug!("[{}] Request Body: {payload}", self.provider_name());

        let request = self
            .authorized(self.client.post(&url))
            .header("Content-Type", "application/json")
            .body(payload);

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), "POST", &url).await?;

        self.handle_response_error(status, &response_text, ctx)?;
        HttpUtils::parse_json(&response_text, self.provider_name())
    }

    /// DELETE request; DigitalOcean answers 204 with an empty body
    pub(crate) async fn delete(&self, path: &str, ctx: ErrorContext) -> Result<()> {
        let url = format!("{}{path}", self.base_url);
        let request = self.authorized(self.client.delete(&url));

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), "DELETE", &url).await?;

        self.handle_response_error(status, &response_text, ctx)
    }
}
