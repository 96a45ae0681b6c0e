//! DigitalOcean API types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DropletEnvelope {
    pub droplet: Droplet,
}

#[derive(Debug, Deserialize)]
pub struct Droplet {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub created_at: Option<String>,
    pub size_slug: String,
    pub image: DropletImage,
    pub region: DropletRegion,
    #[serde(default)]
    pub networks: DropletNetworks,
}

#[derive(Debug, Deserialize)]
pub struct DropletImage {
    pub id: Option<u64>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DropletRegion {
    pub slug: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DropletNetworks {
    #[serde(default)]
    pub v4: Vec<NetworkV4>,
}

#[derive(Debug, Deserialize)]
pub struct NetworkV4 {
    pub ip_address: String,
    #[serde(rename = "type")]
    pub network_type: String,
}

/// `POST /droplets` body.
#[derive(Debug, Serialize)]
pub struct CreateDropletBody {
    pub name: String,
    pub region: String,
    pub size: String,
    pub image: String,
    /// Numeric ids or fingerprints.
    pub ssh_keys: Vec<Value>,
}

/// `POST /droplets/{id}/actions` body.
#[derive(Debug, Serialize)]
pub struct DropletActionBody<'a> {
    #[serde(rename = "type")]
    pub action_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct ActionEnvelope {
    pub action: DropletAction,
}

#[derive(Debug, Deserialize)]
pub struct DropletAction {
    pub id: u64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ImagesEnvelope {
    pub images: Vec<DoImage>,
}

#[derive(Debug, Deserialize)]
pub struct DoImage {
    pub id: u64,
    pub slug: Option<String>,
    pub name: String,
    pub distribution: Option<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    pub min_disk_size: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SizesEnvelope {
    pub sizes: Vec<DoSize>,
}

#[derive(Debug, Deserialize)]
pub struct DoSize {
    pub slug: String,
    pub memory: u64,
    pub vcpus: u32,
    pub disk: u64,
    pub price_monthly: f64,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegionsEnvelope {
    pub regions: Vec<DoRegion>,
}

#[derive(Debug, Deserialize)]
pub struct DoRegion {
    pub slug: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub available: bool,
}

#[derive(Debug, Deserialize)]
pub struct SshKeysEnvelope {
    pub ssh_keys: Vec<DoSshKey>,
}

#[derive(Debug, Deserialize)]
pub struct DoSshKey {
    pub id: u64,
    pub name: String,
    pub fingerprint: String,
    pub public_key: Option<String>,
}

fn default_true() -> bool {
    true
}
