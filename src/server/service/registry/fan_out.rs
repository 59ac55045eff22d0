//! Operations run against several panels at once.
//!
//! Panels are called concurrently and independently. The result has one entry per
//! panel attempted; a failing panel only fails its own entry.

use std::{future::Future, sync::Arc};

use futures::future::join_all;

use crate::server::{
    error::{panel::PanelError, AppError},
    model::{
        panel::PanelConfig,
        registry::PanelResult,
        xui::{ApiResponse, ClientTraffic, Inbound},
    },
    panel::PanelClient,
    service::registry::{proxy::check_connection, ServerRegistry},
};

/// Which live panels a fan-out operation targets.
#[derive(Debug, Clone, Copy)]
enum Scope {
    All,
    Guild(u64),
}

impl ServerRegistry {
    /// Inbounds of every live panel.
    pub async fn get_all_inbounds(&self) -> Vec<PanelResult<ApiResponse<Vec<Inbound>>>> {
        self.fan_out(Scope::All, |client| async move { client.list_inbounds().await })
            .await
    }

    /// Inbounds of every panel accessible from `guild_id`.
    pub async fn get_all_inbounds_for_guild(
        &self,
        guild_id: u64,
    ) -> Vec<PanelResult<ApiResponse<Vec<Inbound>>>> {
        self.fan_out(Scope::Guild(guild_id), |client| async move {
            client.list_inbounds().await
        })
        .await
    }

    /// Traffic of the client with `email` on every live panel.
    pub async fn find_client_by_email(
        &self,
        email: &str,
    ) -> Vec<PanelResult<ApiResponse<ClientTraffic>>> {
        self.traffic_by_email(Scope::All, email).await
    }

    pub async fn find_client_by_email_for_guild(
        &self,
        guild_id: u64,
        email: &str,
    ) -> Vec<PanelResult<ApiResponse<ClientTraffic>>> {
        self.traffic_by_email(Scope::Guild(guild_id), email).await
    }

    /// Traffic of the client with `uuid` on every live panel.
    pub async fn find_client_by_uuid(
        &self,
        uuid: &str,
    ) -> Vec<PanelResult<ApiResponse<Vec<ClientTraffic>>>> {
        self.traffic_by_uuid(Scope::All, uuid).await
    }

    pub async fn find_client_by_uuid_for_guild(
        &self,
        guild_id: u64,
        uuid: &str,
    ) -> Vec<PanelResult<ApiResponse<Vec<ClientTraffic>>>> {
        self.traffic_by_uuid(Scope::Guild(guild_id), uuid).await
    }

    /// Connection check of every live panel, see `test_connection`.
    pub async fn test_all_connections(&self) -> Vec<PanelResult<usize>> {
        self.fan_out(Scope::All, |client| async move {
            check_connection(&client).await
        })
        .await
    }

    pub async fn test_all_connections_for_guild(&self, guild_id: u64) -> Vec<PanelResult<usize>> {
        self.fan_out(Scope::Guild(guild_id), |client| async move {
            check_connection(&client).await
        })
        .await
    }

    async fn traffic_by_email(
        &self,
        scope: Scope,
        email: &str,
    ) -> Vec<PanelResult<ApiResponse<ClientTraffic>>> {
        self.fan_out(scope, |client| {
            let email = email.to_string();
            async move { client.get_client_traffic(&email).await }
        })
        .await
    }

    async fn traffic_by_uuid(
        &self,
        scope: Scope,
        uuid: &str,
    ) -> Vec<PanelResult<ApiResponse<Vec<ClientTraffic>>>> {
        self.fan_out(scope, |client| {
            let uuid = uuid.to_string();
            async move { client.get_client_traffic_by_id(&uuid).await }
        })
        .await
    }

    async fn fan_out<T, F, Fut>(&self, scope: Scope, call: F) -> Vec<PanelResult<T>>
    where
        F: Fn(Arc<PanelClient>) -> Fut,
        Fut: Future<Output = Result<T, PanelError>>,
    {
        self.initialize().await;

        let targets = self.state.read().await.targets(|config| match scope {
            Scope::All => true,
            Scope::Guild(guild_id) => config.is_accessible_from(Some(guild_id)),
        });

        let calls = targets.into_iter().map(|(config, client)| {
            let pending = call(client);
            async move { into_result(&config, pending.await) }
        });

        join_all(calls).await
    }
}

fn into_result<T>(config: &PanelConfig, outcome: Result<T, PanelError>) -> PanelResult<T> {
    if let Err(err) = &outcome {
        tracing::warn!(server_id = %config.id, "Panel call failed during fan-out: {}", err);
    }

    PanelResult::new(config, outcome.map_err(AppError::from))
}
