//! Single-panel operations routed by server id.
//!
//! Each call clones the panel's client out of the cache and releases the lock before
//! any network I/O. Access checks are the caller's job, see `validate_access`.

use serde_json::Value;

use crate::server::{
    error::{panel::PanelError, AppError},
    model::xui::{ApiResponse, Client, ClientTraffic, Inbound},
    service::registry::ServerRegistry,
};

impl ServerRegistry {
    pub async fn get_inbounds(&self, server_id: &str) -> Result<ApiResponse<Vec<Inbound>>, AppError> {
        let client = self.get_client(server_id).await?;
        Ok(client.list_inbounds().await?)
    }

    pub async fn get_inbound(
        &self,
        server_id: &str,
        inbound_id: i32,
    ) -> Result<ApiResponse<Inbound>, AppError> {
        let client = self.get_client(server_id).await?;
        Ok(client.get_inbound(inbound_id).await?)
    }

    pub async fn add_client(
        &self,
        server_id: &str,
        inbound_id: i32,
        new_client: &Client,
    ) -> Result<ApiResponse<Value>, AppError> {
        let client = self.get_client(server_id).await?;
        Ok(client.add_client(inbound_id, new_client).await?)
    }

    pub async fn update_client(
        &self,
        server_id: &str,
        uuid: &str,
        inbound_id: i32,
        updated: &Client,
    ) -> Result<ApiResponse<Value>, AppError> {
        let client = self.get_client(server_id).await?;
        Ok(client.update_client(uuid, inbound_id, updated).await?)
    }

    pub async fn delete_client(
        &self,
        server_id: &str,
        inbound_id: i32,
        uuid: &str,
    ) -> Result<ApiResponse<Value>, AppError> {
        let client = self.get_client(server_id).await?;
        Ok(client.delete_client(inbound_id, uuid).await?)
    }

    pub async fn get_client_traffic(
        &self,
        server_id: &str,
        email: &str,
    ) -> Result<ApiResponse<ClientTraffic>, AppError> {
        let client = self.get_client(server_id).await?;
        Ok(client.get_client_traffic(email).await?)
    }

    pub async fn get_client_traffic_by_id(
        &self,
        server_id: &str,
        uuid: &str,
    ) -> Result<ApiResponse<Vec<ClientTraffic>>, AppError> {
        let client = self.get_client(server_id).await?;
        Ok(client.get_client_traffic_by_id(uuid).await?)
    }

    pub async fn reset_client_traffic(
        &self,
        server_id: &str,
        inbound_id: i32,
        email: &str,
    ) -> Result<ApiResponse<Value>, AppError> {
        let client = self.get_client(server_id).await?;
        Ok(client.reset_client_traffic(inbound_id, email).await?)
    }

    /// Checks that one panel accepts a login and lists its inbounds.
    ///
    /// # Returns
    /// - `Ok(usize)`: Number of inbounds on the panel
    /// - `Err(AppError)`: Unknown or inactive panel, or the panel call failed
    pub async fn test_connection(&self, server_id: &str) -> Result<usize, AppError> {
        let client = self.get_client(server_id).await?;
        Ok(check_connection(&client).await?)
    }
}

/// Lists inbounds and treats `success: false` as a failed check.
pub(super) async fn check_connection(
    client: &crate::server::panel::PanelClient,
) -> Result<usize, PanelError> {
    let response = client.list_inbounds().await?;

    if !response.success {
        return Err(PanelError::Api {
            server_id: client.server_id().to_string(),
            status: 200,
            message: response.msg,
        });
    }

    Ok(response.obj.map_or(0, |inbounds| inbounds.len()))
}
