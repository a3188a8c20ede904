use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::WorkOrderStatus;

/// A request to provision a virtual machine with the listed compute,
/// storage, and network resources.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkOrder {
    /// The unique identifier for this work order, assigned by the server.
    pub id: i64,

    /// Display name of the VM being requested.
    pub name: String,

    /// Guest operating system identifier (e.g., "ubuntu-20.04").
    pub os: String,

    /// Hypervisor product version the VM targets.
    pub host_version: String,

    /// Requested vCPU count.
    pub cpu: u32,

    /// Requested memory in GB.
    pub ram: u32,

    /// Requested disk size in GB. Legacy single-disk value; orders with a
    /// populated `disks` list carry their per-disk sizes there instead.
    pub disk: f64,

    pub status: WorkOrderStatus,
    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Additional disks beyond the legacy single value, in attach order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disks: Vec<DiskRequest>,

    /// Virtual network interfaces, in attach order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nics: Vec<NicRequest>,

    // Placement references into the live inventory. All optional; a
    // dangling reference is repaired against the loaded inventory rather
    // than rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub datastore_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_pool_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_pool_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub datacenter_name: Option<String>,

    // Guest customization, required only when no template supplies it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scsi_controller_type: Option<String>,

    /// What the backend recorded about the most recent execution attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_execution_log: Option<String>,
}

/// One virtual disk of a work order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DiskRequest {
    /// Disk size in GB.
    #[serde(rename = "size")]
    pub size_gb: f64,

    pub provisioning: DiskProvisioning,
}

/// Disk allocation strategy, trading upfront space commitment against
/// write performance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiskProvisioning {
    #[default]
    Thin,
    ThickLazy,
    ThickEager,
}

/// One virtual NIC of a work order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NicRequest {
    /// The network this NIC attaches to.
    pub network_id: String,

    /// Static address, when not drawing from an IP pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_pool_id: Option<String>,
}
