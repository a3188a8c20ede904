//! In-progress state of a VNI work order.
//!
//! Same reducer discipline as the VM work-order draft, with one extra
//! invariant folded into the reducer itself: `number_of_ips` is always
//! `last_ip - first_ip + 1` and cannot be edited on its own. There is no
//! action that sets it.

use chrono::{DateTime, Utc};
use vantage_common::params::{CreateVniWorkOrderParams, UpdateVniWorkOrderParams};
use vantage_common::status::{Priority, VniStatus};
use vantage_common::views::VniWorkOrder;

use crate::draft::FieldError;
use crate::netcfg::{self, NetworkCheck};

/// Working copy of a VNI work order.
#[derive(Debug, Clone, PartialEq)]
pub struct VniDraft {
    pub owner: String,
    pub requested_by: String,
    pub project: String,
    pub description: String,
    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,
    pub status: VniStatus,

    pub t0_gw: String,
    pub t1_gw: String,
    pub vni_name: String,
    pub cidr: String,
    pub subnet_mask: String,
    pub gateway: String,
    pub first_ip: String,
    pub last_ip: String,

    /// Derived from the range bounds; see [`VniDraft::apply`].
    pub number_of_ips: u32,

    pub notes: String,
    pub assigned_to: Option<String>,
}

impl Default for VniDraft {
    fn default() -> Self {
        Self {
            owner: String::new(),
            requested_by: String::new(),
            project: String::new(),
            description: String::new(),
            priority: Priority::Normal,
            deadline: None,
            status: VniStatus::Pending,
            t0_gw: String::new(),
            t1_gw: String::new(),
            vni_name: String::new(),
            cidr: String::new(),
            subnet_mask: String::new(),
            gateway: String::new(),
            first_ip: String::new(),
            last_ip: String::new(),
            number_of_ips: 0,
            notes: String::new(),
            assigned_to: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum VniAction {
    SetOwner(String),
    SetRequestedBy(String),
    SetProject(String),
    SetDescription(String),
    SetPriority(Priority),
    SetDeadline(Option<DateTime<Utc>>),
    SetStatus(VniStatus),

    SetT0Gateway(String),
    SetT1Gateway(String),
    SetVniName(String),
    SetCidr(String),
    SetSubnetMask(String),
    SetGateway(String),
    SetFirstIp(String),
    SetLastIp(String),

    SetNotes(String),
    SetAssignedTo(Option<String>),
}

impl VniDraft {
    pub fn from_order(order: &VniWorkOrder) -> Self {
        Self {
            owner: order.owner.clone(),
            requested_by: order.requested_by.clone(),
            project: order.project.clone(),
            description: order.description.clone(),
            priority: order.priority,
            deadline: Some(order.deadline),
            status: order.status,
            t0_gw: order.t0_gw.clone(),
            t1_gw: order.t1_gw.clone(),
            vni_name: order.vni_name.clone(),
            cidr: order.cidr.clone(),
            subnet_mask: order.subnet_mask.clone(),
            gateway: order.gateway.clone(),
            first_ip: order.first_ip.clone(),
            last_ip: order.last_ip.clone(),
            number_of_ips: order.number_of_ips,
            notes: order.notes.clone().unwrap_or_default(),
            assigned_to: order.assigned_to.clone(),
        }
    }

    pub fn apply(&mut self, action: VniAction) {
        match action {
            VniAction::SetOwner(v) => self.owner = v,
            VniAction::SetRequestedBy(v) => self.requested_by = v,
            VniAction::SetProject(v) => self.project = v,
            VniAction::SetDescription(v) => self.description = v,
            VniAction::SetPriority(v) => self.priority = v,
            VniAction::SetDeadline(v) => self.deadline = v,
            VniAction::SetStatus(v) => self.status = v,

            VniAction::SetT0Gateway(v) => self.t0_gw = v,
            VniAction::SetT1Gateway(v) => self.t1_gw = v,
            VniAction::SetVniName(v) => self.vni_name = v,
            VniAction::SetCidr(v) => self.cidr = v,
            VniAction::SetSubnetMask(v) => self.subnet_mask = v,
            VniAction::SetGateway(v) => self.gateway = v,
            VniAction::SetFirstIp(v) => {
                self.first_ip = v;
                self.number_of_ips = netcfg::ip_count(&self.first_ip, &self.last_ip);
            }
            VniAction::SetLastIp(v) => {
                self.last_ip = v;
                self.number_of_ips = netcfg::ip_count(&self.first_ip, &self.last_ip);
            }

            VniAction::SetNotes(v) => self.notes = v,
            VniAction::SetAssignedTo(v) => self.assigned_to = v,
        }
    }

    /// Current verdict over gateway/range/CIDR. `None` until all four
    /// inputs have been entered.
    pub fn network_check(&self) -> Option<NetworkCheck> {
        netcfg::validate_network_config(&self.gateway, &self.first_ip, &self.last_ip, &self.cidr)
    }

    pub fn update_params(&self, with_status: bool) -> UpdateVniWorkOrderParams {
        UpdateVniWorkOrderParams {
            owner: Some(self.owner.clone()),
            requested_by: Some(self.requested_by.clone()),
            project: Some(self.project.clone()),
            deadline: self.deadline,
            priority: Some(self.priority),
            status: with_status.then_some(self.status),
            vni_name: Some(self.vni_name.clone()),
            description: Some(self.description.clone()),
            t0_gw: Some(self.t0_gw.clone()),
            t1_gw: Some(self.t1_gw.clone()),
            gateway: Some(self.gateway.clone()),
            cidr: Some(self.cidr.clone()),
            subnet_mask: Some(self.subnet_mask.clone()),
            first_ip: Some(self.first_ip.clone()),
            last_ip: Some(self.last_ip.clone()),
            number_of_ips: Some(self.number_of_ips),
            notes: {
                let n = self.notes.trim();
                (!n.is_empty()).then(|| n.to_string())
            },
            assigned_to: self.assigned_to.clone(),
        }
    }
}

/// Steps of the VNI creation wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VniWizardStep {
    General,
    VniConfig,
    Review,
}

pub const VNI_WIZARD_STEPS: &[VniWizardStep] = &[
    VniWizardStep::General,
    VniWizardStep::VniConfig,
    VniWizardStep::Review,
];

pub fn validate_vni_step(draft: &VniDraft, step: VniWizardStep) -> Vec<FieldError> {
    fn required(errors: &mut Vec<FieldError>, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    let mut errors = vec![];
    match step {
        VniWizardStep::General => {
            required(&mut errors, "owner", &draft.owner, "Owner is required!");
            required(&mut errors, "requested_by", &draft.requested_by, "Requested By is required!");
            required(&mut errors, "project", &draft.project, "Project is required!");
            required(&mut errors, "description", &draft.description, "Description is required!");
        }
        VniWizardStep::VniConfig => {
            required(&mut errors, "t0_gw", &draft.t0_gw, "T0 Gateway is required!");
            required(&mut errors, "t1_gw", &draft.t1_gw, "T1 Gateway is required!");
            required(&mut errors, "vni_name", &draft.vni_name, "VNI Name is required!");
            required(&mut errors, "cidr", &draft.cidr, "CIDR is required!");
            required(&mut errors, "subnet_mask", &draft.subnet_mask, "Subnet Mask is required!");
            required(&mut errors, "gateway", &draft.gateway, "Gateway is required!");
            required(&mut errors, "first_ip", &draft.first_ip, "First IP is required!");
            required(&mut errors, "last_ip", &draft.last_ip, "Last IP is required!");
            if draft.number_of_ips < 1 {
                errors.push(FieldError {
                    field: "number_of_ips",
                    message: "Number of IPs is required!".into(),
                });
            }
        }
        VniWizardStep::Review => {}
    }
    errors
}

/// Required-field check for the edit form. The edit form also binds
/// deadline and status, and tolerates an empty range (`number_of_ips`
/// of zero) on records that predate range validation.
pub fn validate_vni_update(draft: &VniDraft) -> Vec<FieldError> {
    fn required(errors: &mut Vec<FieldError>, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    let mut errors = vec![];
    required(&mut errors, "owner", &draft.owner, "Owner is required");
    required(&mut errors, "requested_by", &draft.requested_by, "Requested by is required");
    required(&mut errors, "project", &draft.project, "Project is required");
    if draft.deadline.is_none() {
        errors.push(FieldError {
            field: "deadline",
            message: "Deadline is required".into(),
        });
    }
    required(&mut errors, "vni_name", &draft.vni_name, "VNI Name is required");
    required(&mut errors, "description", &draft.description, "Description is required");
    required(&mut errors, "t0_gw", &draft.t0_gw, "T0 Gateway is required");
    required(&mut errors, "t1_gw", &draft.t1_gw, "T1 Gateway is required");
    required(&mut errors, "gateway", &draft.gateway, "Gateway is required");
    required(&mut errors, "cidr", &draft.cidr, "CIDR is required");
    required(&mut errors, "subnet_mask", &draft.subnet_mask, "Subnet Mask is required");
    required(&mut errors, "first_ip", &draft.first_ip, "First IP is required");
    required(&mut errors, "last_ip", &draft.last_ip, "Last IP is required");
    errors
}

/// Drives the VNI creation flow.
#[derive(Debug, Clone, Default)]
pub struct VniWizard {
    pub draft: VniDraft,
    active_step: usize,
    completed: bool,
}

impl VniWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_step(&self) -> usize {
        self.active_step
    }

    pub fn current(&self) -> Option<VniWizardStep> {
        (!self.completed).then(|| VNI_WIZARD_STEPS[self.active_step])
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn next(&mut self) -> Result<(), Vec<FieldError>> {
        let errors = validate_vni_step(&self.draft, VNI_WIZARD_STEPS[self.active_step]);
        if !errors.is_empty() {
            return Err(errors);
        }
        if self.active_step + 1 < VNI_WIZARD_STEPS.len() {
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

    /// The creation payload. New orders always start pending, with the
    /// submission time as the requested date and no VMs attached yet.
    pub fn creation_params(&self, requested_date: DateTime<Utc>) -> Result<CreateVniWorkOrderParams, Vec<FieldError>> {
        let mut errors = validate_vni_step(&self.draft, VniWizardStep::General);
        errors.extend(validate_vni_step(&self.draft, VniWizardStep::VniConfig));
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CreateVniWorkOrderParams {
            owner: self.draft.owner.trim().to_string(),
            requested_date,
            requested_by: self.draft.requested_by.trim().to_string(),
            virtual_machines: vec![],
            deadline: self.draft.deadline.unwrap_or(requested_date),
            project: self.draft.project.trim().to_string(),
            t0_gw: self.draft.t0_gw.trim().to_string(),
            t1_gw: self.draft.t1_gw.trim().to_string(),
            description: self.draft.description.trim().to_string(),
            vni_name: self.draft.vni_name.trim().to_string(),
            cidr: self.draft.cidr.trim().to_string(),
            subnet_mask: self.draft.subnet_mask.trim().to_string(),
            gateway: self.draft.gateway.trim().to_string(),
            first_ip: self.draft.first_ip.trim().to_string(),
            last_ip: self.draft.last_ip.trim().to_string(),
            number_of_ips: self.draft.number_of_ips,
            status: VniStatus::Pending,
            priority: self.draft.priority,
            notes: None,
            assigned_to: None,
        })
    }

    pub fn mark_submitted(&mut self) {
        self.completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netcfg::Severity;

    fn config_draft() -> VniDraft {
        let mut d = VniDraft::default();
        for action in [
            VniAction::SetT0Gateway("edge-t0-gw".into()),
            VniAction::SetT1Gateway("edge-t1-gw".into()),
            VniAction::SetVniName("vni-app-prod".into()),
            VniAction::SetCidr("10.184.36.160/28".into()),
            VniAction::SetSubnetMask("255.255.255.240".into()),
            VniAction::SetGateway("10.184.36.161".into()),
            VniAction::SetFirstIp("10.184.36.162".into()),
            VniAction::SetLastIp("10.184.36.174".into()),
        ] {
            d.apply(action);
        }
        d
    }

    #[test]
    fn test_number_of_ips_tracks_range_bounds() {
        let mut d = VniDraft::default();
        assert_eq!(d.number_of_ips, 0);

        d.apply(VniAction::SetFirstIp("10.0.0.10".into()));
        assert_eq!(d.number_of_ips, 0);

        d.apply(VniAction::SetLastIp("10.0.0.20".into()));
        assert_eq!(d.number_of_ips, 11);

        d.apply(VniAction::SetFirstIp("10.0.0.20".into()));
        assert_eq!(d.number_of_ips, 1);

        // Reversed range collapses to zero rather than going negative.
        d.apply(VniAction::SetFirstIp("10.0.0.30".into()));
        assert_eq!(d.number_of_ips, 0);

        d.apply(VniAction::SetLastIp("garbage".into()));
        assert_eq!(d.number_of_ips, 0);
    }

    #[test]
    fn test_network_check_follows_current_fields() {
        let mut d = config_draft();
        assert_eq!(d.network_check().unwrap().severity, Severity::Success);

        // Moving the gateway into the range downgrades to a warning.
        d.apply(VniAction::SetGateway("10.184.36.165".into()));
        assert_eq!(d.network_check().unwrap().severity, Severity::Warning);

        d.apply(VniAction::SetCidr(String::new()));
        assert!(d.network_check().is_none());
    }

    #[test]
    fn test_wizard_step_gating() {
        let mut w = VniWizard::new();
        let errors = w.next().unwrap_err();
        assert!(errors.iter().any(|e| e.message == "Owner is required!"));

        w.draft.apply(VniAction::SetOwner("n.haddad".into()));
        w.draft.apply(VniAction::SetRequestedBy("it-ops".into()));
        w.draft.apply(VniAction::SetProject("core-banking".into()));
        w.draft.apply(VniAction::SetDescription("segment for the app tier".into()));
        w.next().unwrap();
        assert_eq!(w.current(), Some(VniWizardStep::VniConfig));

        // An empty range keeps the config step blocked.
        let errors = w.next().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "number_of_ips"));

        w.draft = {
            let mut d = config_draft();
            d.owner = w.draft.owner.clone();
            d.requested_by = w.draft.requested_by.clone();
            d.project = w.draft.project.clone();
            d.description = w.draft.description.clone();
            d
        };
        w.next().unwrap();
        assert_eq!(w.current(), Some(VniWizardStep::Review));
    }

    #[test]
    fn test_creation_params_defaults() {
        let mut w = VniWizard::new();
        w.draft = config_draft();
        w.draft.apply(VniAction::SetOwner("n.haddad".into()));
        w.draft.apply(VniAction::SetRequestedBy("it-ops".into()));
        w.draft.apply(VniAction::SetProject("core-banking".into()));
        w.draft.apply(VniAction::SetDescription("segment for the app tier".into()));

        let now = chrono::Utc::now();
        let params = w.creation_params(now).unwrap();
        assert_eq!(params.status, VniStatus::Pending);
        assert_eq!(params.requested_date, now);
        assert_eq!(params.deadline, now);
        assert!(params.virtual_machines.is_empty());
        assert_eq!(params.number_of_ips, 13);
    }

    #[test]
    fn test_update_validation_uses_edit_messages() {
        let d = VniDraft::default();
        let errors = validate_vni_update(&d);
        assert!(errors.iter().any(|e| e.message == "Owner is required"));
        assert!(errors.iter().any(|e| e.field == "deadline"));

        let mut d = config_draft();
        d.owner = "n.haddad".into();
        d.requested_by = "it-ops".into();
        d.project = "core-banking".into();
        d.description = "segment".into();
        d.deadline = Some(chrono::Utc::now());
        assert!(validate_vni_update(&d).is_empty());
    }
}
