use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{Priority, VniStatus};

/// A request to provision a virtual network segment (VNI): gateway, CIDR
/// block, and usable address range, independent of any specific VM.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VniWorkOrder {
    /// The unique identifier for this VNI work order, assigned by the
    /// server.
    pub id: i64,

    pub owner: String,
    pub requested_by: String,
    pub requested_date: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub project: String,
    pub description: String,
    pub priority: Priority,

    /// VMs expected to land on the segment once it exists. Informational;
    /// the segment is provisioned regardless.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub virtual_machines: Vec<VniVmRef>,

    /// Tier-0 gateway the segment uplinks through.
    pub t0_gw: String,

    /// Tier-1 gateway the segment attaches to.
    pub t1_gw: String,

    pub vni_name: String,

    /// Network in CIDR notation, e.g. `10.184.36.160/28`.
    pub cidr: String,

    pub subnet_mask: String,
    pub gateway: String,
    pub first_ip: String,
    pub last_ip: String,

    /// Size of the usable range. Derived from `first_ip`/`last_ip`; never
    /// edited independently.
    pub number_of_ips: u32,

    pub status: VniStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_execution_log: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

/// A VM reference attached to a VNI work order for display.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VniVmRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
