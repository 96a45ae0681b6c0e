//! OVH API types

use serde::{Deserialize, Serialize};

/// Error body returned on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error class, e.g. `Client::NotFound`.
    #[serde(rename = "class")]
    pub error_class: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    pub id: String,
    pub name: String,
    pub status: String,
    pub created: Option<String>,
    pub region: String,
    pub flavor_id: Option<String>,
    pub image_id: Option<String>,
    /// Expanded flavor, present on instance detail responses.
    pub flavor: Option<Flavor>,
    /// Expanded image, present on instance detail responses.
    pub image: Option<Image>,
    #[serde(default)]
    pub ip_addresses: Vec<IpAddress>,
}

#[derive(Debug, Deserialize)]
pub struct IpAddress {
    pub ip: String,
    #[serde(rename = "type")]
    pub address_type: String,
    pub version: u8,
}

/// `POST /cloud/project/{project}/instance` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceBody {
    pub name: String,
    pub flavor_id: String,
    pub image_id: String,
    pub region: String,
}

/// `PUT /cloud/project/{project}/instance/{id}` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameInstanceBody<'a> {
    pub instance_name: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flavor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub ram: u64,
    #[serde(default)]
    pub vcpus: u32,
    #[serde(default)]
    pub disk: u64,
    pub os_type: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(rename = "type")]
    pub os_type: Option<String>,
    pub min_disk: Option<u64>,
}

fn default_true() -> bool {
    true
}
