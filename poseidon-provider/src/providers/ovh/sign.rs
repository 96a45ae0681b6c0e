//! OVH request signature
//!
//! Reference: <https://help.ovhcloud.com/csm/en-api-getting-started-ovhcloud-api>

use sha1::{Digest, Sha1};

use super::OvhProvider;

impl OvhProvider {
    /// Compute `X-Ovh-Signature` for one request.
    ///
    /// `url` is the full URL including the query string and `body` the exact
    /// payload sent (empty for GET and DELETE).
    pub(crate) fn sign(&self, method: &str, url: &str, body: &str, timestamp: i64) -> String {
        let to_sign = format!(
            "{}+{}+{method}+{url}+{body}+{timestamp}",
            self.application_secret, self.consumer_key
        );
        format!("$1${}", hex::encode(Sha1::digest(to_sign.as_bytes())))
    }
}
