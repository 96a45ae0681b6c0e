//! OVH HTTP request methods

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::mask_secret;

use super::OvhProvider;
use super::types::ErrorResponse;

impl OvhProvider {
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
                body.error_class,
                body.message.unwrap_or_else(|| format!("HTTP {status}")),
            ),
            Err(_) => RawApiError::with_status(status, None, format!("HTTP {status}")),
        };
        log::error!("[{}] API error: {}", self.provider_name(), raw.message);
        Err(self.map_error(raw, ctx))
    }

    /// Build, sign and send one request; returns the body text of a 2xx reply.
    async fn send_signed(
        &self,
        method: reqwest::Method,
        path: &str,
        body: String,
        ctx: ErrorContext,
    ) -> Result<String> {
        let url = format!("{}{path}", self.endpoint);
        let timestamp = chrono::Utc::now().timestamp();
        let signature = self.sign(method.as_str(), &url, &body, timestamp);
        log::debug!(
            "[{}] Signed as application {} at {timestamp}",
            self.provider_name(),
            mask_secret(&self.application_key)
        );

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("X-Ovh-Application", &self.application_key)
            .header("X-Ovh-Consumer", &self.consumer_key)
            .header("X-Ovh-Timestamp", timestamp.to_string())
            .header("X-Ovh-Signature", signature);
        if !body.is_empty() {
            log::debug!("[{}] Request Body: {body}", self.provider_name());
            request = request
                .header("Content-Type", "application/json")
                .body(body);
        }

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), method.as_str(), &url)
                .await?;

        self.handle_response_error(status, &response_text, ctx)?;
        Ok(response_text)
    }

    /// GET request
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, ctx: ErrorContext) -> Result<T> {
        let text = self
            .send_signed(reqwest::Method::GET, path, String::new(), ctx)
            .await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// POST request with a JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = serde_json::to_string(body).map_err(|e| self.serialization_error(e))?;
        let text = self
            .send_signed(reqwest::Method::POST, path, payload, ctx)
            .await?;
        HttpUtils::parse_json(&text, self.provider_name())
    }

    /// PUT request; the response body (usually `null`) is ignored
    pub(crate) async fn put<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<()> {
        let payload = serde_json::to_string(body).map_err(|e| self.serialization_error(e))?;
        self.send_signed(reqwest::Method::PUT, path, payload, ctx)
            .await
            .map(|_| ())
    }

    /// DELETE request
    pub(crate) async fn delete(&self, path: &str, ctx: ErrorContext) -> Result<()> {
        self.send_signed(reqwest::Method::DELETE, path, String::new(), ctx)
            .await
            .map(|_| ())
    }
}
