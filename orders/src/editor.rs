//! Edit-session orchestration for the detail/edit views.
//!
//! An editor owns the fetched record, the working draft, and the loaded
//! inventory, and funnels every user action through the lifecycle rules.
//! Outcomes the user should see accumulate as [`Notice`] values for the
//! surrounding view to drain; errors never escape as panics and a failed
//! mutation never discards entered state.

use chrono::Utc;
use futures::try_join;
use thiserror::Error;
use vantage_common::params::UpdateWorkOrderParams;
use vantage_common::status::{OrderAction, TransitionError, VniStatus, WorkOrderStatus};
use vantage_common::views::{VniWorkOrder, WorkOrder};

use crate::data::{DataAccess, DataAccessError};
use crate::draft::{DraftAction, FieldError, WorkOrderDraft, WorkOrderWizard};
use crate::netcfg::Severity;
use crate::placement::{self, Inventory, SubmitBlocker};
use crate::vni::{self, VniAction, VniDraft, VniWizard};

/// A transient notification for the user, drained by the view shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Why a detail/edit view could not come up. Not-found is its own state,
/// distinct from both loading and failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("work order not found")]
    NotFound,

    #[error(transparent)]
    Fetch(DataAccessError),
}

impl From<DataAccessError> for LoadError {
    fn from(err: DataAccessError) -> Self {
        match err {
            DataAccessError::NotFound => Self::NotFound,
            other => Self::Fetch(other),
        }
    }
}

/// Failure of an editor action.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EditError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Data(#[from] DataAccessError),
}

/// A spreadsheet payload handed to the browser shell for download.
#[derive(Debug, Clone)]
pub struct ExcelExport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Submits a completed creation wizard. On success the wizard flips to
/// its completed screen; on failure it stays exactly where it was, with
/// every entered value intact, and the error is returned for display.
pub async fn submit_work_order(
    wizard: &mut WorkOrderWizard,
    data: &impl DataAccess,
) -> Result<WorkOrder, EditError> {
    let params = wizard
        .creation_params(Utc::now())
        .map_err(EditError::Validation)?;
    match data.create_work_order(&params).await {
        Ok(created) => {
            wizard.mark_submitted();
            Ok(created)
        }
        Err(err) => {
            tracing::error!(error = %err, "work order submission failed");
            Err(err.into())
        }
    }
}

/// Submits a completed VNI creation wizard, same contract as
/// [`submit_work_order`].
pub async fn submit_vni_work_order(
    wizard: &mut VniWizard,
    data: &impl DataAccess,
) -> Result<VniWorkOrder, EditError> {
    let params = wizard
        .creation_params(Utc::now())
        .map_err(EditError::Validation)?;
    match data.create_vni_work_order(&params).await {
        Ok(created) => {
            wizard.mark_submitted();
            Ok(created)
        }
        Err(err) => {
            tracing::error!(error = %err, "VNI work order submission failed");
            Err(err.into())
        }
    }
}

/// Edit session for a VM work order.
pub struct WorkOrderEditor {
    id: i64,
    order: WorkOrder,
    pub draft: WorkOrderDraft,
    inventory: Inventory,

    /// Whether the current inventory snapshot has been reconciled
    /// against the draft. Reset on every inventory (re)load so the
    /// repair pass runs exactly once per snapshot.
    reconciled: bool,

    host_support: Option<String>,
    status_dirty: bool,
    execute_in_flight: bool,
    delete_pending: bool,
    closed: bool,
    notices: Vec<Notice>,
}

impl WorkOrderEditor {
    /// Fetches the work order and every inventory list concurrently. The
    /// view renders only once all of them resolved; any single failure
    /// fails the load as a whole, since placement validation needs every
    /// set present.
    pub async fn load(data: &impl DataAccess, id: i64) -> Result<Self, LoadError> {
        let (
            order,
            hosts,
            vms,
            templates,
            datastores,
            networks,
            resource_pools,
            ip_pools,
            folders,
            datacenters,
        ) = try_join!(
            data.get_work_order(id),
            data.list_hosts(),
            data.list_vms(),
            data.list_templates(),
            data.list_datastores(),
            data.list_networks(),
            data.list_resource_pools(),
            data.list_ip_pools(),
            data.list_folders(),
            data.list_datacenters(),
        )?;

        let draft = WorkOrderDraft::from_order(&order);
        let mut editor = Self {
            id,
            order,
            draft,
            inventory: Inventory {
                hosts,
                datastores,
                networks,
                vms,
                templates,
                resource_pools,
                ip_pools,
                folders,
                datacenters,
            },
            reconciled: false,
            host_support: None,
            status_dirty: false,
            execute_in_flight: false,
            delete_pending: false,
            closed: false,
            notices: vec![],
        };
        editor.reconcile();
        editor.refresh_host_support();
        Ok(editor)
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// The record as last confirmed by the server.
    pub fn order(&self) -> &WorkOrder {
        &self.order
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// The host-support banner, if a host selection resolves.
    pub fn host_support(&self) -> Option<&str> {
        self.host_support.as_deref()
    }

    pub fn available_actions(&self) -> &'static [OrderAction] {
        self.order.status.available_actions()
    }

    pub fn submit_blockers(&self) -> Vec<SubmitBlocker> {
        placement::submit_blockers(&self.draft, &self.inventory)
    }

    pub fn is_submittable(&self) -> bool {
        placement::is_submittable(&self.draft, &self.inventory)
    }

    pub fn execute_in_flight(&self) -> bool {
        self.execute_in_flight
    }

    pub fn delete_pending(&self) -> bool {
        self.delete_pending
    }

    /// Set once a delete succeeded; the view navigates away.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Hands accumulated notifications to the view and clears them.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Applies one form mutation and re-derives the dependent state.
    pub fn apply(&mut self, action: DraftAction) {
        if matches!(action, DraftAction::SetStatus(_)) {
            self.status_dirty = true;
        }
        self.draft.apply(action);
        self.refresh_host_support();
    }

    /// Swaps in a freshly fetched inventory snapshot and re-runs the
    /// consistency pass for it.
    pub fn replace_inventory(&mut self, inventory: Inventory) {
        self.inventory = inventory;
        self.reconciled = false;
        self.reconcile();
        self.refresh_host_support();
    }

    /// Re-fetches all inventory lists. Concurrent, all-or-nothing, same
    /// as the initial load.
    pub async fn refresh_inventory(&mut self, data: &impl DataAccess) -> Result<(), DataAccessError> {
        let (hosts, vms, templates, datastores, networks, resource_pools, ip_pools, folders, datacenters) = try_join!(
            data.list_hosts(),
            data.list_vms(),
            data.list_templates(),
            data.list_datastores(),
            data.list_networks(),
            data.list_resource_pools(),
            data.list_ip_pools(),
            data.list_folders(),
            data.list_datacenters(),
        )?;
        self.replace_inventory(Inventory {
            hosts,
            datastores,
            networks,
            vms,
            templates,
            resource_pools,
            ip_pools,
            folders,
            datacenters,
        });
        Ok(())
    }

    fn reconcile(&mut self) {
        if self.reconciled {
            return;
        }
        placement::reconcile(&mut self.draft, &self.inventory);
        self.reconciled = true;
    }

    fn refresh_host_support(&mut self) {
        let host = self
            .draft
            .host_id
            .as_deref()
            .and_then(|id| self.inventory.host(id));
        self.host_support = match (host, self.draft.ram_value(), self.draft.cpu_value()) {
            (Some(host), Some(ram), Some(cpu)) => placement::host_support_message(Some(host), ram, cpu),
            (Some(_), _, _) => {
                // Unparseable resource fields cannot be verified against
                // the host, which is not the same as "supported".
                Some("Selected host may not support the requested resources.".into())
            }
            (None, _, _) => None,
        };
    }

    fn adopt(&mut self, order: WorkOrder) {
        self.draft = WorkOrderDraft::from_order(&order);
        self.order = order;
        self.status_dirty = false;
        self.reconciled = false;
        self.reconcile();
        self.refresh_host_support();
    }

    /// Saves the draft through the general update operation. Status rides
    /// along only when it was explicitly changed, and only after the
    /// state machine admits the transition.
    pub async fn save(&mut self, data: &impl DataAccess) -> Result<(), EditError> {
        if self.status_dirty {
            if let Err(err) = self.order.status.ensure_transition(self.draft.status) {
                self.notices.push(Notice::error(err.to_string()));
                return Err(err.into());
            }
        }

        let patch = self.draft.update_params(self.status_dirty);
        match data.update_work_order(self.id, &patch).await {
            Ok(updated) => {
                self.adopt(updated);
                self.notices.push(Notice::success("Work order updated!"));
                Ok(())
            }
            Err(err) => {
                tracing::error!(id = self.id, error = %err, "work order update failed");
                self.notices.push(Notice::error(format!(
                    "Failed to update work order: {}",
                    err.user_message()
                )));
                Err(err.into())
            }
        }
    }

    pub async fn approve(&mut self, data: &impl DataAccess) -> Result<(), EditError> {
        self.order
            .status
            .ensure_transition(WorkOrderStatus::Approved)?;
        match data.approve_work_order(self.id).await {
            Ok(()) => {
                self.order.status = WorkOrderStatus::Approved;
                self.draft.status = WorkOrderStatus::Approved;
                self.notices
                    .push(Notice::success("Work order approved successfully"));
                Ok(())
            }
            Err(err) => {
                self.notices.push(Notice::error(format!(
                    "Failed to approve work order: {}",
                    err.user_message()
                )));
                Err(err.into())
            }
        }
    }

    /// Rejection has no dedicated endpoint for VM work orders; it is a
    /// status-only patch through the update operation, still gated by
    /// the state machine.
    pub async fn reject(&mut self, data: &impl DataAccess) -> Result<(), EditError> {
        self.order
            .status
            .ensure_transition(WorkOrderStatus::Rejected)?;
        let patch = UpdateWorkOrderParams {
            status: Some(WorkOrderStatus::Rejected),
            ..Default::default()
        };
        match data.update_work_order(self.id, &patch).await {
            Ok(updated) => {
                self.adopt(updated);
                self.notices
                    .push(Notice::success("Work order rejected"));
                Ok(())
            }
            Err(err) => {
                self.notices.push(Notice::error(format!(
                    "Failed to reject work order: {}",
                    err.user_message()
                )));
                Err(err.into())
            }
        }
    }

    /// Dispatches execution. Ignored while a prior call is in flight so a
    /// double-click cannot provision twice. On success the local status
    /// moves to executing; on failure it stays where it was.
    pub async fn execute(&mut self, data: &impl DataAccess) -> Result<(), EditError> {
        if self.execute_in_flight {
            return Ok(());
        }
        // Identity transitions are fine for the status select but not
        // here: re-executing an already-executing order would provision
        // twice. Only an approved order may be dispatched.
        if self.order.status != WorkOrderStatus::Approved {
            return Err(TransitionError {
                from: self.order.status.to_string(),
                to: WorkOrderStatus::Executing.to_string(),
            }
            .into());
        }

        self.execute_in_flight = true;
        let result = data.execute_work_order(self.id).await;
        self.execute_in_flight = false;

        match result {
            Ok(outcome) => {
                self.order.status = WorkOrderStatus::Executing;
                self.draft.status = WorkOrderStatus::Executing;
                let message = match outcome.message {
                    Some(detail) => format!("Work order execution started: {detail}"),
                    None => "Work order execution started".into(),
                };
                self.notices.push(Notice::success(message));
                Ok(())
            }
            Err(err) => {
                tracing::error!(id = self.id, error = %err, "work order execution failed");
                self.notices.push(Notice::error(format!(
                    "Failed to execute work order: {}",
                    err.user_message()
                )));
                Err(err.into())
            }
        }
    }

    /// Opens the delete confirmation. Nothing is dispatched until
    /// [`WorkOrderEditor::confirm_delete`].
    pub fn request_delete(&mut self) {
        self.delete_pending = true;
    }

    pub fn cancel_delete(&mut self) {
        self.delete_pending = false;
    }

    pub async fn confirm_delete(&mut self, data: &impl DataAccess) -> Result<(), EditError> {
        if !self.delete_pending {
            return Ok(());
        }
        self.delete_pending = false;
        match data.delete_work_order(self.id).await {
            Ok(()) => {
                self.closed = true;
                self.notices
                    .push(Notice::success("Work order deleted successfully"));
                Ok(())
            }
            Err(err) => {
                self.notices.push(Notice::error(format!(
                    "Failed to delete work order: {}",
                    err.user_message()
                )));
                Err(err.into())
            }
        }
    }
}

/// Edit session for a VNI work order.
pub struct VniWorkOrderEditor {
    id: i64,
    order: VniWorkOrder,
    pub draft: VniDraft,
    status_dirty: bool,
    execute_in_flight: bool,
    delete_pending: bool,
    closed: bool,
    notices: Vec<Notice>,
}

impl VniWorkOrderEditor {
    pub async fn load(data: &impl DataAccess, id: i64) -> Result<Self, LoadError> {
        let order = data.get_vni_work_order(id).await?;
        let draft = VniDraft::from_order(&order);
        Ok(Self {
            id,
            order,
            draft,
            status_dirty: false,
            execute_in_flight: false,
            delete_pending: false,
            closed: false,
            notices: vec![],
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn order(&self) -> &VniWorkOrder {
        &self.order
    }

    pub fn available_actions(&self) -> &'static [OrderAction] {
        self.order.status.available_actions()
    }

    pub fn execute_in_flight(&self) -> bool {
        self.execute_in_flight
    }

    pub fn delete_pending(&self) -> bool {
        self.delete_pending
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn apply(&mut self, action: VniAction) {
        if matches!(action, VniAction::SetStatus(_)) {
            self.status_dirty = true;
        }
        self.draft.apply(action);
    }

    fn adopt(&mut self, order: VniWorkOrder) {
        self.draft = VniDraft::from_order(&order);
        self.order = order;
        self.status_dirty = false;
    }

    /// Saves the edit form. Field requirements are checked locally first;
    /// a status edit additionally has to pass the state machine.
    pub async fn save(&mut self, data: &impl DataAccess) -> Result<(), EditError> {
        let errors = vni::validate_vni_update(&self.draft);
        if !errors.is_empty() {
            return Err(EditError::Validation(errors));
        }
        if self.status_dirty {
            if let Err(err) = self.order.status.ensure_transition(self.draft.status) {
                self.notices.push(Notice::error(err.to_string()));
                return Err(err.into());
            }
        }

        let patch = self.draft.update_params(self.status_dirty);
        match data.update_vni_work_order(self.id, &patch).await {
            Ok(updated) => {
                self.adopt(updated);
                self.notices
                    .push(Notice::success("VNI Work Order updated successfully!"));
                Ok(())
            }
            Err(err) => {
                tracing::error!(id = self.id, error = %err, "VNI work order update failed");
                self.notices.push(Notice::error(format!(
                    "Failed to update VNI work order: {}",
                    err.user_message()
                )));
                Err(err.into())
            }
        }
    }

    /// The toolbar's status select, backed by the dedicated status
    /// endpoint rather than the general update.
    pub async fn set_status(&mut self, data: &impl DataAccess, status: VniStatus) -> Result<(), EditError> {
        self.order.status.ensure_transition(status)?;
        match data.update_vni_work_order_status(self.id, status).await {
            Ok(()) => {
                self.order.status = status;
                self.draft.status = status;
                self.status_dirty = false;
                self.notices.push(Notice::success(format!(
                    "VNI workorder status updated to {status}"
                )));
                Ok(())
            }
            Err(err) => {
                self.notices.push(Notice::error(format!(
                    "Failed to update status: {}",
                    err.user_message()
                )));
                Err(err.into())
            }
        }
    }

    pub async fn approve(&mut self, data: &impl DataAccess) -> Result<(), EditError> {
        self.order.status.ensure_transition(VniStatus::Approved)?;
        match data.approve_vni_work_order(self.id).await {
            Ok(()) => {
                self.order.status = VniStatus::Approved;
                self.draft.status = VniStatus::Approved;
                self.notices
                    .push(Notice::success("VNI workorder approved successfully"));
                Ok(())
            }
            Err(err) => {
                self.notices.push(Notice::error(format!(
                    "Failed to approve VNI work order: {}",
                    err.user_message()
                )));
                Err(err.into())
            }
        }
    }

    pub async fn reject(&mut self, data: &impl DataAccess) -> Result<(), EditError> {
        self.order.status.ensure_transition(VniStatus::Rejected)?;
        match data.reject_vni_work_order(self.id).await {
            Ok(()) => {
                self.order.status = VniStatus::Rejected;
                self.draft.status = VniStatus::Rejected;
                self.notices
                    .push(Notice::success("VNI workorder rejected successfully"));
                Ok(())
            }
            Err(err) => {
                self.notices.push(Notice::error(format!(
                    "Failed to reject VNI work order: {}",
                    err.user_message()
                )));
                Err(err.into())
            }
        }
    }

    pub async fn execute(&mut self, data: &impl DataAccess) -> Result<(), EditError> {
        if self.execute_in_flight {
            return Ok(());
        }
        // See WorkOrderEditor::execute: only an approved order may be
        // dispatched, identity transitions do not apply.
        if self.order.status != VniStatus::Approved {
            return Err(TransitionError {
                from: self.order.status.to_string(),
                to: VniStatus::Executing.to_string(),
            }
            .into());
        }

        self.execute_in_flight = true;
        let result = data.execute_vni_work_order(self.id).await;
        self.execute_in_flight = false;

        match result {
            Ok(outcome) => {
                self.order.status = VniStatus::Executing;
                self.draft.status = VniStatus::Executing;
                let message = outcome
                    .message
                    .unwrap_or_else(|| "VNI workorder execution started".into());
                self.notices.push(Notice::success(message));
                Ok(())
            }
            Err(err) => {
                tracing::error!(id = self.id, error = %err, "VNI execution failed");
                self.notices.push(Notice::error(format!(
                    "Failed to execute VNI work order: {}",
                    err.user_message()
                )));
                Err(err.into())
            }
        }
    }

    /// Fetches the spreadsheet rendition for a client-side download.
    pub async fn export_excel(&mut self, data: &impl DataAccess) -> Result<ExcelExport, EditError> {
        match data.export_vni_work_order_excel(self.id).await {
            Ok(bytes) => {
                self.notices
                    .push(Notice::success("Excel file downloaded successfully!"));
                Ok(ExcelExport {
                    filename: format!("VNI_Configuration_{}_{}.xlsx", self.order.vni_name, self.id),
                    bytes,
                })
            }
            Err(err) => {
                self.notices.push(Notice::error(format!(
                    "Failed to export Excel file: {}",
                    err.user_message()
                )));
                Err(err.into())
            }
        }
    }

    pub fn request_delete(&mut self) {
        self.delete_pending = true;
    }

    pub fn cancel_delete(&mut self) {
        self.delete_pending = false;
    }

    pub async fn confirm_delete(&mut self, data: &impl DataAccess) -> Result<(), EditError> {
        if !self.delete_pending {
            return Ok(());
        }
        self.delete_pending = false;
        match data.delete_vni_work_order(self.id).await {
            Ok(()) => {
                self.closed = true;
                self.notices
                    .push(Notice::success("VNI workorder deleted successfully"));
                Ok(())
            }
            Err(err) => {
                self.notices.push(Notice::error(format!(
                    "Failed to delete VNI work order: {}",
                    err.user_message()
                )));
                Err(err.into())
            }
        }
    }
}
