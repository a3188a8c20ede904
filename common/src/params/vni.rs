use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{Priority, VniStatus};
use crate::views::VniVmRef;

/// Payload of `POST /vni-workorders/`. Flat, matching the stored record;
/// the wizard flattens its step groups before submission.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateVniWorkOrderParams {
    pub owner: String,
    pub requested_date: DateTime<Utc>,
    pub requested_by: String,

    #[serde(default)]
    pub virtual_machines: Vec<VniVmRef>,

    pub deadline: DateTime<Utc>,
    pub project: String,
    pub t0_gw: String,
    pub t1_gw: String,
    pub description: String,
    pub vni_name: String,
    pub cidr: String,
    pub subnet_mask: String,
    pub gateway: String,
    pub first_ip: String,
    pub last_ip: String,
    pub number_of_ips: u32,
    pub status: VniStatus,
    pub priority: Priority,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub assigned_to: Option<String>,
}

/// Payload of `PUT /vni-workorders/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateVniWorkOrderParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VniStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vni_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub t0_gw: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub t1_gw: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_mask: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_ip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_ips: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

/// Payload of `PUT /vni-workorders/{id}/status`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateVniStatusParams {
    pub status: VniStatus,
}
