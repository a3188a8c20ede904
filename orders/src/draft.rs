//! In-progress (unsaved) state of a VM work order.
//!
//! The draft holds raw field text the way the form collects it; numeric
//! coercion happens in validation, not on entry. Every mutation goes
//! through [`WorkOrderDraft::apply`], so there is exactly one place state
//! changes and nothing else to keep in sync.

use chrono::{DateTime, Utc};
use vantage_common::params::{
    CreateWorkOrderParams, UpdateWorkOrderParams, WorkOrderGeneral, WorkOrderResources,
};
use vantage_common::status::WorkOrderStatus;
use vantage_common::views::{DiskProvisioning, DiskRequest, NicRequest, WorkOrder};

/// A field-level validation failure, surfaced as helper text next to the
/// offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn required(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// One disk row as entered, size still raw text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftDisk {
    pub size_gb: String,
    pub provisioning: DiskProvisioning,
}

/// One NIC row as entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftNic {
    pub network_id: String,
    pub ip: String,
    pub netmask: String,
    pub ip_pool_id: Option<String>,
}

/// Working copy of a work order across the wizard steps or the edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkOrderDraft {
    pub name: String,
    pub description: String,
    pub os: String,
    pub host_version: String,

    pub cpu: String,
    pub ram: String,
    pub disk: String,

    pub status: WorkOrderStatus,

    pub disks: Vec<DraftDisk>,
    pub nics: Vec<DraftNic>,

    pub host_id: Option<String>,
    pub vm_id: Option<String>,
    pub template_id: Option<String>,
    pub datastore_id: Option<String>,
    pub network_id: Option<String>,
    pub resource_pool_id: Option<String>,
    pub ip_pool_id: Option<String>,
    pub folder_id: Option<String>,
    pub datacenter_name: Option<String>,

    pub hostname: String,
    pub ip: String,
    pub netmask: String,
    pub gateway: String,
    pub domain: String,
    pub hardware_version: String,
    pub scsi_controller_type: String,
}

impl Default for WorkOrderDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            os: String::new(),
            host_version: String::new(),
            cpu: "1".into(),
            ram: "1".into(),
            disk: "1".into(),
            status: WorkOrderStatus::Pending,
            disks: vec![],
            nics: vec![],
            host_id: None,
            vm_id: None,
            template_id: None,
            datastore_id: None,
            network_id: None,
            resource_pool_id: None,
            ip_pool_id: None,
            folder_id: None,
            datacenter_name: None,
            hostname: String::new(),
            ip: String::new(),
            netmask: String::new(),
            gateway: String::new(),
            domain: String::new(),
            hardware_version: String::new(),
            scsi_controller_type: String::new(),
        }
    }
}

/// Every mutation the form can make. Indexes out of range are ignored
/// rather than panicking; a stale row index from the UI is not worth
/// crashing the view over.
#[derive(Debug, Clone)]
pub enum DraftAction {
    SetName(String),
    SetDescription(String),
    SetOs(String),
    SetHostVersion(String),
    SetCpu(String),
    SetRam(String),
    SetDisk(String),
    SetStatus(WorkOrderStatus),

    SelectHost(Option<String>),
    SelectVm(Option<String>),
    SelectTemplate(Option<String>),
    SelectDatastore(Option<String>),
    SelectNetwork(Option<String>),
    SelectResourcePool(Option<String>),
    SelectIpPool(Option<String>),
    SelectFolder(Option<String>),
    SetDatacenter(Option<String>),

    SetHostname(String),
    SetIp(String),
    SetNetmask(String),
    SetGateway(String),
    SetDomain(String),
    SetHardwareVersion(String),
    SetScsiControllerType(String),

    AddDisk,
    RemoveDisk(usize),
    SetDiskSize(usize, String),
    SetDiskProvisioning(usize, DiskProvisioning),

    AddNic,
    RemoveNic(usize),
    SetNicNetwork(usize, String),
    SetNicIp(usize, String),
    SetNicNetmask(usize, String),
    SetNicIpPool(usize, Option<String>),
}

impl WorkOrderDraft {
    /// Builds the working copy for the edit view from a fetched record.
    pub fn from_order(order: &WorkOrder) -> Self {
        Self {
            name: order.name.clone(),
            description: order.description.clone().unwrap_or_default(),
            os: order.os.clone(),
            host_version: order.host_version.clone(),
            cpu: order.cpu.to_string(),
            ram: order.ram.to_string(),
            disk: order.disk.to_string(),
            status: order.status,
            disks: order
                .disks
                .iter()
                .map(|d| DraftDisk {
                    size_gb: d.size_gb.to_string(),
                    provisioning: d.provisioning,
                })
                .collect(),
            nics: order
                .nics
                .iter()
                .map(|n| DraftNic {
                    network_id: n.network_id.clone(),
                    ip: n.ip.clone().unwrap_or_default(),
                    netmask: n.netmask.clone().unwrap_or_default(),
                    ip_pool_id: n.ip_pool_id.clone(),
                })
                .collect(),
            host_id: order.host_id.clone(),
            vm_id: order.vm_id.clone(),
            template_id: order.template_id.clone(),
            datastore_id: order.datastore_id.clone(),
            network_id: order.network_id.clone(),
            resource_pool_id: order.resource_pool_id.clone(),
            ip_pool_id: order.ip_pool_id.clone(),
            folder_id: order.folder_id.clone(),
            datacenter_name: order.datacenter_name.clone(),
            hostname: order.hostname.clone().unwrap_or_default(),
            ip: order.ip.clone().unwrap_or_default(),
            netmask: order.netmask.clone().unwrap_or_default(),
            gateway: order.gateway.clone().unwrap_or_default(),
            domain: order.domain.clone().unwrap_or_default(),
            hardware_version: order.hardware_version.clone().unwrap_or_default(),
            scsi_controller_type: order.scsi_controller_type.clone().unwrap_or_default(),
        }
    }

    pub fn apply(&mut self, action: DraftAction) {
        match action {
            DraftAction::SetName(v) => self.name = v,
            DraftAction::SetDescription(v) => self.description = v,
            DraftAction::SetOs(v) => self.os = v,
            DraftAction::SetHostVersion(v) => self.host_version = v,
            DraftAction::SetCpu(v) => self.cpu = v,
            DraftAction::SetRam(v) => self.ram = v,
            DraftAction::SetDisk(v) => self.disk = v,
            DraftAction::SetStatus(v) => self.status = v,

            DraftAction::SelectHost(v) => self.host_id = v,
            DraftAction::SelectVm(v) => self.vm_id = v,
            DraftAction::SelectTemplate(v) => self.template_id = v,
            DraftAction::SelectDatastore(v) => self.datastore_id = v,
            DraftAction::SelectNetwork(v) => self.network_id = v,
            DraftAction::SelectResourcePool(v) => self.resource_pool_id = v,
            DraftAction::SelectIpPool(v) => self.ip_pool_id = v,
            DraftAction::SelectFolder(v) => self.folder_id = v,
            DraftAction::SetDatacenter(v) => self.datacenter_name = v,

            DraftAction::SetHostname(v) => self.hostname = v,
            DraftAction::SetIp(v) => self.ip = v,
            DraftAction::SetNetmask(v) => self.netmask = v,
            DraftAction::SetGateway(v) => self.gateway = v,
            DraftAction::SetDomain(v) => self.domain = v,
            DraftAction::SetHardwareVersion(v) => self.hardware_version = v,
            DraftAction::SetScsiControllerType(v) => self.scsi_controller_type = v,

            DraftAction::AddDisk => self.disks.push(DraftDisk::default()),
            DraftAction::RemoveDisk(i) => {
                if i < self.disks.len() {
                    self.disks.remove(i);
                }
            }
            DraftAction::SetDiskSize(i, v) => {
                if let Some(d) = self.disks.get_mut(i) {
                    d.size_gb = v;
                }
            }
            DraftAction::SetDiskProvisioning(i, v) => {
                if let Some(d) = self.disks.get_mut(i) {
                    d.provisioning = v;
                }
            }

            DraftAction::AddNic => self.nics.push(DraftNic::default()),
            DraftAction::RemoveNic(i) => {
                if i < self.nics.len() {
                    self.nics.remove(i);
                }
            }
            DraftAction::SetNicNetwork(i, v) => {
                if let Some(n) = self.nics.get_mut(i) {
                    n.network_id = v;
                }
            }
            DraftAction::SetNicIp(i, v) => {
                if let Some(n) = self.nics.get_mut(i) {
                    n.ip = v;
                }
            }
            DraftAction::SetNicNetmask(i, v) => {
                if let Some(n) = self.nics.get_mut(i) {
                    n.netmask = v;
                }
            }
            DraftAction::SetNicIpPool(i, v) => {
                if let Some(n) = self.nics.get_mut(i) {
                    n.ip_pool_id = v;
                }
            }
        }
    }

    /// vCPU count, when the field coerces to an integer ≥ 1.
    pub fn cpu_value(&self) -> Option<u32> {
        self.cpu.trim().parse().ok().filter(|v| *v >= 1)
    }

    /// Memory in GB, when the field coerces to an integer ≥ 1.
    pub fn ram_value(&self) -> Option<u32> {
        self.ram.trim().parse().ok().filter(|v| *v >= 1)
    }

    /// Disk in GB; may be fractional but must be ≥ 1.
    pub fn disk_value(&self) -> Option<f64> {
        self.disk.trim().parse().ok().filter(|v| *v >= 1.0)
    }

    pub fn is_template_selected(&self) -> bool {
        self.template_id.as_deref().is_some_and(|t| !t.is_empty())
            || self.vm_id.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Manual-mode fields that are still empty. When a template is
    /// selected these are supplied by the template and the list is not
    /// consulted.
    pub fn missing_manual_fields(&self) -> Vec<&'static str> {
        let mut missing = vec![];
        for (field, value) in [
            ("os", &self.os),
            ("hardware_version", &self.hardware_version),
            ("scsi_controller_type", &self.scsi_controller_type),
            ("hostname", &self.hostname),
            ("ip", &self.ip),
            ("netmask", &self.netmask),
            ("gateway", &self.gateway),
            ("domain", &self.domain),
        ] {
            if value.trim().is_empty() {
                missing.push(field);
            }
        }
        if self.disks.is_empty() {
            missing.push("disks");
        }
        if self.nics.is_empty() {
            missing.push("nics");
        }
        missing
    }

    /// Whether the draft can be submitted without a template: all guest
    /// customization fields present, at least one disk and one NIC.
    pub fn is_manual_valid(&self) -> bool {
        self.missing_manual_fields().is_empty()
    }

    /// Wire form of the disk rows; rows whose size does not parse fall
    /// back to zero and are expected to be caught by validation first.
    pub fn wire_disks(&self) -> Vec<DiskRequest> {
        self.disks
            .iter()
            .map(|d| DiskRequest {
                size_gb: d.size_gb.trim().parse().unwrap_or(0.0),
                provisioning: d.provisioning,
            })
            .collect()
    }

    pub fn wire_nics(&self) -> Vec<NicRequest> {
        fn opt(s: &str) -> Option<String> {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        self.nics
            .iter()
            .map(|n| NicRequest {
                network_id: n.network_id.clone(),
                ip: opt(&n.ip),
                netmask: opt(&n.netmask),
                ip_pool_id: n.ip_pool_id.clone(),
            })
            .collect()
    }

    /// Full-field patch for the general update endpoint. `with_status`
    /// controls whether the (possibly edited) status rides along; plain
    /// field edits leave it out so the stored status is preserved.
    pub fn update_params(&self, with_status: bool) -> UpdateWorkOrderParams {
        fn opt(s: &str) -> Option<String> {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        UpdateWorkOrderParams {
            name: Some(self.name.clone()),
            os: Some(self.os.clone()),
            host_version: Some(self.host_version.clone()),
            cpu: self.cpu_value(),
            ram: self.ram_value(),
            disk: self.disk_value(),
            description: opt(&self.description),
            status: with_status.then_some(self.status),
            disks: Some(self.wire_disks()),
            nics: Some(self.wire_nics()),
            host_id: self.host_id.clone(),
            vm_id: self.vm_id.clone(),
            template_id: self.template_id.clone(),
            datastore_id: self.datastore_id.clone(),
            network_id: self.network_id.clone(),
            resource_pool_id: self.resource_pool_id.clone(),
            ip_pool_id: self.ip_pool_id.clone(),
            folder_id: self.folder_id.clone(),
            datacenter_name: self.datacenter_name.clone(),
            hostname: opt(&self.hostname),
            ip: opt(&self.ip),
            netmask: opt(&self.netmask),
            gateway: opt(&self.gateway),
            domain: opt(&self.domain),
            hardware_version: opt(&self.hardware_version),
            scsi_controller_type: opt(&self.scsi_controller_type),
        }
    }
}

/// Steps of the creation wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    General,
    Resources,
    Review,
}

pub const WIZARD_STEPS: &[WizardStep] = &[WizardStep::General, WizardStep::Resources, WizardStep::Review];

/// Required-field check for one wizard step. A step is advanceable only
/// when this comes back empty.
pub fn validate_step(draft: &WorkOrderDraft, step: WizardStep) -> Vec<FieldError> {
    let mut errors = vec![];
    match step {
        WizardStep::General => {
            if draft.name.trim().is_empty() {
                errors.push(FieldError::required("name", "VM Name is required!"));
            }
            if draft.os.trim().is_empty() {
                errors.push(FieldError::required("os", "OS Type is required!"));
            }
            if draft.host_version.trim().is_empty() {
                errors.push(FieldError::required("hostVersion", "Host Version is required!"));
            }
        }
        WizardStep::Resources => {
            if draft.cpu_value().is_none() {
                errors.push(FieldError::required("cpu", "CPU is required!"));
            }
            if draft.ram_value().is_none() {
                errors.push(FieldError::required("ram", "RAM is required!"));
            }
            if draft.disk_value().is_none() {
                errors.push(FieldError::required("disk", "Disk is required!"));
            }
        }
        WizardStep::Review => {}
    }
    errors
}

/// Drives the multi-step creation flow: step gating on the way forward,
/// free navigation backward, and a completed terminal state after a
/// successful submission.
#[derive(Debug, Clone, Default)]
pub struct WorkOrderWizard {
    pub draft: WorkOrderDraft,
    active_step: usize,
    completed: bool,
}

impl WorkOrderWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_step(&self) -> usize {
        self.active_step
    }

    pub fn current(&self) -> Option<WizardStep> {
        (!self.completed).then(|| WIZARD_STEPS[self.active_step])
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Advances past the current step if its required fields hold up.
    pub fn next(&mut self) -> Result<(), Vec<FieldError>> {
        let step = WIZARD_STEPS[self.active_step];
        let errors = validate_step(&self.draft, step);
        if !errors.is_empty() {
            return Err(errors);
        }
        if self.active_step + 1 < WIZARD_STEPS.len() {
            self.active_step += 1;
        }
        Ok(())
    }

    pub fn back(&mut self) {
        self.active_step = self.active_step.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The creation payload, available once every step validates.
    pub fn creation_params(&self, requested_at: DateTime<Utc>) -> Result<CreateWorkOrderParams, Vec<FieldError>> {
        let mut errors = validate_step(&self.draft, WizardStep::General);
        errors.extend(validate_step(&self.draft, WizardStep::Resources));
        if !errors.is_empty() {
            return Err(errors);
        }
        // The resources step just validated, so the fallbacks are dead.
        Ok(CreateWorkOrderParams {
            general: WorkOrderGeneral {
                name: self.draft.name.trim().to_string(),
                os: self.draft.os.trim().to_string(),
                host_version: self.draft.host_version.trim().to_string(),
            },
            resources: WorkOrderResources {
                cpu: self.draft.cpu_value().unwrap_or(1),
                ram: self.draft.ram_value().unwrap_or(1),
                disk: self.draft.disk_value().unwrap_or(1.0),
            },
            requested_at,
        })
    }

    /// Marks the flow complete after the create call succeeded. Failed
    /// submissions never reach this, so the entered state survives.
    pub fn mark_submitted(&mut self) {
        self.completed = true;
    }
}
