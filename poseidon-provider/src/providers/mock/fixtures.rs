//! Canned catalogues served by the mock provider

use std::collections::BTreeMap;

use crate::types::{InstanceSizeBase, ProviderKind, SshKey};

fn entry(id: &str, name: &str, regions: &[&str], metadata: &[(&str, &str)]) -> InstanceSizeBase {
    InstanceSizeBase {
        id: id.to_string(),
        name: name.to_string(),
        regions: regions.iter().map(ToString::to_string).collect(),
        metadata: metadata
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// OVH catalogue ids are UUIDs, distinct from display names.
pub(super) const OVH_UBUNTU_IMAGE: &str = "b4e0f5c2-6a1d-4e8b-9c3f-2d7a5e1b8c46";
pub(super) const OVH_D2_2_FLAVOR: &str = "0f1e3c5a-2d6b-4c8e-9a71-5b3d2f4e6a80";

pub(super) fn images(kind: ProviderKind) -> Vec<InstanceSizeBase> {
    match kind {
        ProviderKind::DigitalOcean => vec![
            entry(
                "ubuntu-22-04-x64",
                "Ubuntu 22.04 (LTS) x64",
                &["nyc1", "ams3", "fra1"],
                &[("distribution", "Ubuntu")],
            ),
            entry(
                "debian-12-x64",
                "Debian 12 x64",
                &["nyc1", "fra1"],
                &[("distribution", "Debian")],
            ),
            entry(
                "fedora-39-x64",
                "Fedora 39 x64",
                &["ams3"],
                &[("distribution", "Fedora")],
            ),
        ],
        ProviderKind::Ovh => vec![
            entry(
                OVH_UBUNTU_IMAGE,
                "Ubuntu 22.04",
                &["GRA11", "SBG5"],
                &[("osType", "linux")],
            ),
            entry(
                "c5f1a6d3-7b2e-4f9c-8d4a-3e8b6f2c9d57",
                "Debian 12",
                &["GRA11"],
                &[("osType", "linux")],
            ),
            entry(
                "d6a2b7e4-8c3f-4a0d-9e5b-4f9c7a3d0e68",
                "Windows Server 2022",
                &["SBG5"],
                &[("osType", "windows")],
            ),
        ],
    }
}

pub(super) fn sizes(kind: ProviderKind) -> Vec<InstanceSizeBase> {
    match kind {
        ProviderKind::DigitalOcean => vec![
            entry(
                "s-1vcpu-1gb",
                "Basic 1 vCPU / 1 GB",
                &["nyc1", "ams3", "fra1"],
                &[("memory", "1 GB"), ("vcpus", "1"), ("disk", "25 GB")],
            ),
            entry(
                "s-2vcpu-4gb",
                "Basic 2 vCPU / 4 GB",
                &["nyc1", "fra1"],
                &[("memory", "4 GB"), ("vcpus", "2"), ("disk", "80 GB")],
            ),
            entry(
                "c-4",
                "CPU-Optimized 4 vCPU",
                &["ams3"],
                &[("memory", "8 GB"), ("vcpus", "4"), ("disk", "50 GB")],
            ),
        ],
        ProviderKind::Ovh => vec![
            entry(
                OVH_D2_2_FLAVOR,
                "d2-2",
                &["GRA11", "SBG5"],
                &[("memory", "2 GB"), ("vcpus", "1"), ("disk", "25 GB")],
            ),
            entry(
                "7a9c1e3b-5d2f-4a6c-8e0b-1c3d5f7a9b24",
                "b2-7",
                &["GRA11"],
                &[("memory", "7000 MB"), ("vcpus", "2"), ("disk", "50 GB")],
            ),
        ],
    }
}

pub(super) fn regions(kind: ProviderKind) -> Vec<InstanceSizeBase> {
    let slugs: &[(&str, &str)] = match kind {
        ProviderKind::DigitalOcean => &[
            ("nyc1", "New York 1"),
            ("ams3", "Amsterdam 3"),
            ("fra1", "Frankfurt 1"),
        ],
        ProviderKind::Ovh => &[
            ("GRA11", "GRA11"),
            ("SBG5", "SBG5"),
            ("BHS5", "BHS5"),
        ],
    };
    slugs.iter().map(|(id, name)| entry(id, name, &[], &[])).collect()
}

pub(super) fn ssh_keys() -> Vec<SshKey> {
    vec![SshKey {
        id: "512189".to_string(),
        name: "mock deploy key".to_string(),
        fingerprint: "3b:16:bf:e4:8b:00:8b:b8:59:8c:a9:d3:f0:19:45:fa".to_string(),
        public_key: Some("ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIMock mock@poseidon".to_string()),
    }]
}
