use std::{collections::BTreeMap, collections::HashMap, sync::Arc};

use crate::server::{
    error::config::ConfigError,
    model::panel::{PanelConfig, Partition},
    panel::PanelClient,
};

/// Lifecycle of a registry instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistryStatus {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
}

/// Guild-partitioned cache of panel configs and their live clients.
///
/// Invariants kept by every method:
/// - a config id appears in exactly one partition, the one matching its owner
/// - an id has a client iff its cached config is active
#[derive(Default)]
pub struct RegistryState {
    pub status: RegistryStatus,
    partitions: BTreeMap<Partition, Vec<PanelConfig>>,
    clients: HashMap<String, Arc<PanelClient>>,
}

impl RegistryState {
    pub fn configs(&self) -> impl Iterator<Item = &PanelConfig> {
        self.partitions.values().flatten()
    }

    pub fn get(&self, id: &str) -> Option<&PanelConfig> {
        self.configs().find(|config| config.id == id)
    }

    pub fn client(&self, id: &str) -> Option<Arc<PanelClient>> {
        self.clients.get(id).cloned()
    }

    pub fn partition(&self, partition: Partition) -> &[PanelConfig] {
        self.partitions
            .get(&partition)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Live clients paired with their configs, limited to configs matching `include`.
    pub fn targets<F>(&self, include: F) -> Vec<(PanelConfig, Arc<PanelClient>)>
    where
        F: Fn(&PanelConfig) -> bool,
    {
        self.configs()
            .filter(|config| include(config))
            .filter_map(|config| {
                self.clients
                    .get(&config.id)
                    .map(|client| (config.clone(), client.clone()))
            })
            .collect()
    }

    /// Inserts or replaces the config with `config.id`.
    ///
    /// The previous client is kept only when the panel stays active and its connection
    /// settings are unchanged. Nothing is modified when building a new client fails.
    pub fn upsert(&mut self, config: PanelConfig, http: &reqwest::Client) -> Result<(), ConfigError> {
        let keep_client = self
            .get(&config.id)
            .is_some_and(|previous| !previous.connection_differs(&config));

        let client = match (config.is_active, self.clients.get(&config.id)) {
            (false, _) => None,
            (true, Some(existing)) if keep_client => Some(existing.clone()),
            (true, _) => Some(Arc::new(PanelClient::new(http.clone(), config.clone())?)),
        };

        self.remove_config(&config.id);
        match client {
            Some(client) => {
                self.clients.insert(config.id.clone(), client);
            }
            None => {
                self.clients.remove(&config.id);
            }
        }
        self.partitions
            .entry(config.partition())
            .or_default()
            .push(config);

        Ok(())
    }

    /// Removes the config and its client.
    pub fn remove(&mut self, id: &str) -> Option<PanelConfig> {
        self.clients.remove(id);
        self.remove_config(id)
    }

    /// Replaces one partition with `configs`, dropping its previous clients.
    ///
    /// Returns the configs that could not get a client; they are left out.
    pub fn replace_partition(
        &mut self,
        partition: Partition,
        configs: Vec<PanelConfig>,
        http: &reqwest::Client,
    ) -> Vec<(PanelConfig, ConfigError)> {
        if let Some(previous) = self.partitions.remove(&partition) {
            for config in previous {
                self.clients.remove(&config.id);
            }
        }

        self.load(configs, http)
    }

    /// Replaces everything with `configs`.
    ///
    /// Returns the configs that could not get a client; they are left out.
    pub fn reset(
        &mut self,
        configs: Vec<PanelConfig>,
        http: &reqwest::Client,
    ) -> Vec<(PanelConfig, ConfigError)> {
        self.partitions.clear();
        self.clients.clear();

        self.load(configs, http)
    }

    fn load(
        &mut self,
        configs: Vec<PanelConfig>,
        http: &reqwest::Client,
    ) -> Vec<(PanelConfig, ConfigError)> {
        let mut rejected = Vec::new();
        for config in configs {
            // an id owned by another partition is replaced, keeping ids unique
            if let Err(err) = self.upsert(config.clone(), http) {
                rejected.push((config, err));
            }
        }
        rejected
    }

    fn remove_config(&mut self, id: &str) -> Option<PanelConfig> {
        let (partition, index) = self.partitions.iter().find_map(|(partition, configs)| {
            configs
                .iter()
                .position(|config| config.id == id)
                .map(|index| (*partition, index))
        })?;

        let configs = self.partitions.get_mut(&partition)?;
        let removed = configs.remove(index);
        if configs.is_empty() {
            self.partitions.remove(&partition);
        }

        Some(removed)
    }
}
