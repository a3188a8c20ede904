//! HTTP implementation of the console's [`DataAccess`] contract against
//! the provisioning API.
//!
//! One [`ApiClient`] instance is constructed at startup and injected into
//! whatever builds the domain core; nothing here is a process-wide
//! singleton. No retries happen at this layer.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use vantage_common::params::{
    CreateVniWorkOrderParams, CreateWorkOrderParams, UpdateVniStatusParams,
    UpdateVniWorkOrderParams, UpdateWorkOrderParams,
};
use vantage_common::status::VniStatus;
use vantage_common::views::{
    ApiErrorResponse, DashboardOverview, Datacenter, Datastore, ExecutionOutcome, Folder, Host,
    IpPool, Network, ResourcePool, Vm, VniWorkOrder, WorkOrder,
};
use vantage_orders::data::{DataAccess, DataAccessError};

mod config;
pub use config::ClientConfig;

pub struct ApiClient {
    api_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(api_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(format!("vantage-client/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            api_url: api_url.into(),
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
        Self::new(config.api_url.clone())
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Folds a non-success response into a [`DataAccessError`]. The error
    /// body is preferably the structured shape; the legacy backend's bare
    /// `{"detail": ...}` and a plain status line are the fallbacks.
    async fn fail(response: Response) -> DataAccessError {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return DataAccessError::NotFound;
        }

        let body = response.text().await.unwrap_or_default();
        if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            return DataAccessError::Api {
                code: err.code,
                message: err.message,
            };
        }
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
                return DataAccessError::Api {
                    code: None,
                    message: detail.to_string(),
                };
            }
        }
        DataAccessError::Api {
            code: None,
            message: format!("request failed with status {status}"),
        }
    }

    async fn check(response: Response) -> Result<Response, DataAccessError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::fail(response).await)
        }
    }

    fn transport(err: reqwest::Error) -> DataAccessError {
        DataAccessError::Transport(err.to_string())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DataAccessError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(response)
            .await?
            .json::<T>()
            .await
            .map_err(Self::transport)
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, DataAccessError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(Self::transport)?;
        let bytes = Self::check(response)
            .await?
            .bytes()
            .await
            .map_err(Self::transport)?;
        Ok(bytes.to_vec())
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DataAccessError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(response)
            .await?
            .json::<T>()
            .await
            .map_err(Self::transport)
    }

    /// POST without a body, for the action endpoints; the response body
    /// (a status confirmation) is discarded.
    async fn post_action(&self, path: &str) -> Result<(), DataAccessError> {
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn post_action_with_outcome(&self, path: &str) -> Result<ExecutionOutcome, DataAccessError> {
        let response = self
            .client
            .post(self.url(path))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(response)
            .await?
            .json::<ExecutionOutcome>()
            .await
            .map_err(Self::transport)
    }

    async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DataAccessError> {
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(response)
            .await?
            .json::<T>()
            .await
            .map_err(Self::transport)
    }

    async fn put_empty<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), DataAccessError> {
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), DataAccessError> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl DataAccess for ApiClient {
    async fn get_work_order(&self, id: i64) -> Result<WorkOrder, DataAccessError> {
        self.get_json(&format!("/workorders/{id}")).await
    }

    async fn list_work_orders(&self, limit: u32) -> Result<Vec<WorkOrder>, DataAccessError> {
        self.get_json(&format!("/workorders/?limit={limit}")).await
    }

    async fn create_work_order(
        &self,
        params: &CreateWorkOrderParams,
    ) -> Result<WorkOrder, DataAccessError> {
        self.post_json("/workorders/", params).await
    }

    async fn update_work_order(
        &self,
        id: i64,
        patch: &UpdateWorkOrderParams,
    ) -> Result<WorkOrder, DataAccessError> {
        self.put_json(&format!("/workorders/{id}"), patch).await
    }

    async fn delete_work_order(&self, id: i64) -> Result<(), DataAccessError> {
        self.delete(&format!("/workorders/{id}")).await
    }

    async fn approve_work_order(&self, id: i64) -> Result<(), DataAccessError> {
        self.post_action(&format!("/workorders/{id}/approve")).await
    }

    async fn execute_work_order(&self, id: i64) -> Result<ExecutionOutcome, DataAccessError> {
        self.post_action_with_outcome(&format!("/workorders/{id}/execute"))
            .await
    }

    async fn get_vni_work_order(&self, id: i64) -> Result<VniWorkOrder, DataAccessError> {
        self.get_json(&format!("/vni-workorders/{id}")).await
    }

    async fn list_vni_work_orders(&self, limit: u32) -> Result<Vec<VniWorkOrder>, DataAccessError> {
        self.get_json(&format!("/vni-workorders/?limit={limit}"))
            .await
    }

    async fn create_vni_work_order(
        &self,
        params: &CreateVniWorkOrderParams,
    ) -> Result<VniWorkOrder, DataAccessError> {
        self.post_json("/vni-workorders/", params).await
    }

    async fn update_vni_work_order(
        &self,
        id: i64,
        patch: &UpdateVniWorkOrderParams,
    ) -> Result<VniWorkOrder, DataAccessError> {
        self.put_json(&format!("/vni-workorders/{id}"), patch).await
    }

    async fn approve_vni_work_order(&self, id: i64) -> Result<(), DataAccessError> {
        self.post_action(&format!("/vni-workorders/{id}/approve"))
            .await
    }

    async fn reject_vni_work_order(&self, id: i64) -> Result<(), DataAccessError> {
        self.post_action(&format!("/vni-workorders/{id}/reject"))
            .await
    }

    async fn update_vni_work_order_status(
        &self,
        id: i64,
        status: VniStatus,
    ) -> Result<(), DataAccessError> {
        self.put_empty(
            &format!("/vni-workorders/{id}/status"),
            &UpdateVniStatusParams { status },
        )
        .await
    }

    async fn execute_vni_work_order(&self, id: i64) -> Result<ExecutionOutcome, DataAccessError> {
        self.post_action_with_outcome(&format!("/vni-workorders/{id}/execute"))
            .await
    }

    async fn delete_vni_work_order(&self, id: i64) -> Result<(), DataAccessError> {
        self.delete(&format!("/vni-workorders/{id}")).await
    }

    async fn export_vni_work_order_excel(&self, id: i64) -> Result<Vec<u8>, DataAccessError> {
        self.get_bytes(&format!("/vni-workorders/{id}/export-excel"))
            .await
    }

    async fn list_hosts(&self) -> Result<Vec<Host>, DataAccessError> {
        self.get_json("/hosts/").await
    }

    async fn list_datastores(&self) -> Result<Vec<Datastore>, DataAccessError> {
        self.get_json("/datastores/").await
    }

    async fn list_vms(&self) -> Result<Vec<Vm>, DataAccessError> {
        self.get_json("/vms/").await
    }

    async fn list_templates(&self) -> Result<Vec<Vm>, DataAccessError> {
        self.get_json("/templates/").await
    }

    async fn list_networks(&self) -> Result<Vec<Network>, DataAccessError> {
        self.get_json("/networks/").await
    }

    async fn list_resource_pools(&self) -> Result<Vec<ResourcePool>, DataAccessError> {
        self.get_json("/resource-pools/").await
    }

    async fn list_ip_pools(&self) -> Result<Vec<IpPool>, DataAccessError> {
        self.get_json("/ip-pools/").await
    }

    async fn list_folders(&self) -> Result<Vec<Folder>, DataAccessError> {
        self.get_json("/folders/").await
    }

    async fn list_datacenters(&self) -> Result<Vec<Datacenter>, DataAccessError> {
        self.get_json("/datacenters/").await
    }

    async fn get_dashboard_overview(&self) -> Result<DashboardOverview, DataAccessError> {
        self.get_json("/system/overview/dashboard").await
    }
}
