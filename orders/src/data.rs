//! The contract between the console core and the provisioning API.
//!
//! Everything the core reads or mutates goes through [`DataAccess`]; the
//! HTTP implementation lives in `vantage-client` and tests substitute an
//! in-memory fake. No module-level client singleton exists anywhere.

use async_trait::async_trait;
use thiserror::Error;
use vantage_common::params::{
    CreateVniWorkOrderParams, CreateWorkOrderParams, UpdateVniWorkOrderParams,
    UpdateWorkOrderParams,
};
use vantage_common::status::VniStatus;
use vantage_common::views::{
    DashboardOverview, Datacenter, Datastore, ExecutionOutcome, Folder, Host, IpPool, Network,
    ResourcePool, Vm, VniWorkOrder, WorkOrder,
};

/// Failure of a Data Access call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DataAccessError {
    /// The id resolved to nothing. Views render this as a dedicated
    /// not-found state, never as a generic error.
    #[error("not found")]
    NotFound,

    /// The server answered with an error body.
    #[error("{message}")]
    Api {
        code: Option<String>,
        message: String,
    },

    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(String),
}

impl DataAccessError {
    /// The message shown to the user, preferring server-provided detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound => "The requested resource was not found.".into(),
            Self::Api { message, .. } => message.clone(),
            Self::Transport(_) => "Something went wrong on our end. Please try again later.".into(),
        }
    }
}

/// Inventory reads and work-order mutations, request/response over the
/// provisioning API. All methods are the only suspension points in the
/// core; no retries happen at this layer or below.
#[async_trait]
pub trait DataAccess: Send + Sync {
    async fn get_work_order(&self, id: i64) -> Result<WorkOrder, DataAccessError>;
    async fn list_work_orders(&self, limit: u32) -> Result<Vec<WorkOrder>, DataAccessError>;
    async fn create_work_order(
        &self,
        params: &CreateWorkOrderParams,
    ) -> Result<WorkOrder, DataAccessError>;
    async fn update_work_order(
        &self,
        id: i64,
        patch: &UpdateWorkOrderParams,
    ) -> Result<WorkOrder, DataAccessError>;
    async fn delete_work_order(&self, id: i64) -> Result<(), DataAccessError>;
    async fn approve_work_order(&self, id: i64) -> Result<(), DataAccessError>;
    async fn execute_work_order(&self, id: i64) -> Result<ExecutionOutcome, DataAccessError>;

    async fn get_vni_work_order(&self, id: i64) -> Result<VniWorkOrder, DataAccessError>;
    async fn list_vni_work_orders(&self, limit: u32) -> Result<Vec<VniWorkOrder>, DataAccessError>;
    async fn create_vni_work_order(
        &self,
        params: &CreateVniWorkOrderParams,
    ) -> Result<VniWorkOrder, DataAccessError>;
    async fn update_vni_work_order(
        &self,
        id: i64,
        patch: &UpdateVniWorkOrderParams,
    ) -> Result<VniWorkOrder, DataAccessError>;
    async fn approve_vni_work_order(&self, id: i64) -> Result<(), DataAccessError>;
    async fn reject_vni_work_order(&self, id: i64) -> Result<(), DataAccessError>;
    async fn update_vni_work_order_status(
        &self,
        id: i64,
        status: VniStatus,
    ) -> Result<(), DataAccessError>;
    async fn execute_vni_work_order(&self, id: i64) -> Result<ExecutionOutcome, DataAccessError>;
    async fn delete_vni_work_order(&self, id: i64) -> Result<(), DataAccessError>;

    /// Spreadsheet rendition of one VNI work order, as served for a
    /// client-side download.
    async fn export_vni_work_order_excel(&self, id: i64) -> Result<Vec<u8>, DataAccessError>;

    async fn list_hosts(&self) -> Result<Vec<Host>, DataAccessError>;
    async fn list_datastores(&self) -> Result<Vec<Datastore>, DataAccessError>;
    async fn list_vms(&self) -> Result<Vec<Vm>, DataAccessError>;
    async fn list_templates(&self) -> Result<Vec<Vm>, DataAccessError>;
    async fn list_networks(&self) -> Result<Vec<Network>, DataAccessError>;
    async fn list_resource_pools(&self) -> Result<Vec<ResourcePool>, DataAccessError>;
    async fn list_ip_pools(&self) -> Result<Vec<IpPool>, DataAccessError>;
    async fn list_folders(&self) -> Result<Vec<Folder>, DataAccessError>;
    async fn list_datacenters(&self) -> Result<Vec<Datacenter>, DataAccessError>;

    async fn get_dashboard_overview(&self) -> Result<DashboardOverview, DataAccessError>;
}
