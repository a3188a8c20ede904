use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::WorkOrderStatus;
use crate::views::{DiskRequest, NicRequest};

/// Payload of `POST /workorders/`. The creation wizard submits its two
/// validated step groups as-is, so the wire shape is nested rather than
/// flat like the stored record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateWorkOrderParams {
    pub general: WorkOrderGeneral,
    pub resources: WorkOrderResources,

    /// Client-side submission time; the server uses it as `created_at`
    /// when parseable.
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkOrderGeneral {
    pub name: String,
    pub os: String,

    #[serde(rename = "hostVersion")]
    pub host_version: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkOrderResources {
    pub cpu: u32,
    pub ram: u32,
    pub disk: f64,
}

/// Payload of `PUT /workorders/{id}`. Every editable field; `None` leaves
/// the stored value untouched. Status is only present when the edit
/// explicitly changed it through the status select.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateWorkOrderParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disks: Option<Vec<DiskRequest>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nics: Option<Vec<NicRequest>>,

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
}
