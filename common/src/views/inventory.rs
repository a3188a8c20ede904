use serde::{Deserialize, Serialize};

/// An id/name pair referencing another inventory object, as embedded in a
/// host's accessible-datastore and accessible-network lists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InventoryRef {
    pub id: String,
    pub name: String,
}

/// A hypervisor node offering CPU and memory capacity for placement.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Host {
    pub id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,

    pub cpu_total_mhz: f64,
    pub cpu_used_mhz: f64,
    pub cpu_free_mhz: f64,

    pub memory_total_gb: f64,
    pub memory_used_gb: f64,
    pub memory_free_gb: f64,

    /// Hypervisor product version, e.g. "8.0.2".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_state: Option<String>,

    /// Datastores mounted on this host. Placement restricts datastore
    /// choices to this set.
    #[serde(default)]
    pub accessible_datastores: Vec<InventoryRef>,

    /// Networks reachable from this host.
    #[serde(default)]
    pub accessible_networks: Vec<InventoryRef>,
}

/// A storage pool from which virtual disk capacity is allocated.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Datastore {
    pub id: String,
    pub name: String,
    pub capacity_gb: f64,

    /// Free capacity, when the backend reports it. Fit checks fall back to
    /// `capacity_gb` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_space_gb: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessible: Option<bool>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A port group VMs attach NICs to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Network {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub vlan: i32,

    /// "Standard" or "Distributed".
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenter_name: Option<String>,
}

/// An existing virtual machine. Templates are VMs with the `template`
/// flag set; the template picker filters on it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Vm {
    pub id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_state: Option<String>,

    #[serde(default)]
    pub template: bool,
}

/// A logical grouping used to partition compute resources.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResourcePool {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IpPool {
    pub id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Datacenter {
    pub id: String,
    pub name: String,
}

/// Aggregate estate counts and usage for the dashboard landing page.
/// Display-only; nothing in the core validates against it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardOverview {
    #[serde(default)]
    pub summary: OverviewSummary,

    #[serde(default)]
    pub resource_usage: OverviewResourceUsage,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OverviewSummary {
    #[serde(default)]
    pub total_hosts: u32,
    #[serde(default)]
    pub total_datastores: u32,
    #[serde(default)]
    pub total_vms: u32,
    #[serde(default)]
    pub connected_hosts: u32,
    #[serde(default)]
    pub running_vms: u32,
    #[serde(default)]
    pub stopped_vms: u32,
    #[serde(default)]
    pub templates: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OverviewResourceUsage {
    #[serde(default)]
    pub cpu_usage_percent: f64,
    #[serde(default)]
    pub memory_usage_percent: f64,
    #[serde(default)]
    pub storage_usage_percent: f64,
    #[serde(default)]
    pub total_cpu_mhz: f64,
    #[serde(default)]
    pub used_cpu_mhz: f64,
    #[serde(default)]
    pub total_memory_gb: f64,
    #[serde(default)]
    pub used_memory_gb: f64,
    #[serde(default)]
    pub total_storage_gb: f64,
    #[serde(default)]
    pub used_storage_gb: f64,
    #[serde(default)]
    pub free_storage_gb: f64,
}
