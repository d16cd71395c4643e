//! Device inventory loaded from a document store.

#[cfg(feature = "mongo-inventory")]
pub mod mongo;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

#[cfg(feature = "mongo-inventory")]
pub use mongo::MongoInventorySource;

/// Group every host belongs to
pub const ALL_GROUP: &str = "all";

fn default_mongo_host() -> String {
    "localhost".to_string()
}

fn default_mongo_port() -> u16 {
    27017
}

/// InventoryConfig is the YAML file describing where the inventory lives
/// and which hosts/groups to load. Unknown keys such as `plugin` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryConfig {
    #[serde(default = "default_mongo_host")]
    pub mongo_host: String,
    #[serde(default = "default_mongo_port")]
    pub mongo_port: u16,
    #[serde(default)]
    pub mongo_username: Option<String>,
    #[serde(default)]
    pub mongo_password: Option<String>,
    #[serde(default)]
    pub mongo_all_groups: bool,
    #[serde(default)]
    pub mongo_filter_groups: Option<Map<String, Value>>,
    #[serde(default)]
    pub mongo_all_devices: bool,
    #[serde(default)]
    pub mongo_filter_devices: Option<Map<String, Value>>,
}

/// Which documents of a collection to load
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    All,
    Filter(Map<String, Value>),
}

impl Selection {
    pub fn filter(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::All => None,
            Self::Filter(filter) => Some(filter),
        }
    }
}

impl InventoryConfig {
    /// The config must be an existing `.yml`/`.yaml` file
    pub fn verify_file(path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(Error::InventoryConfig(format!(
                "{} does not exist or is not a file",
                path.display()
            )));
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Ok(()),
            _ => Err(Error::InventoryConfig(format!(
                "{} must end with .yml or .yaml",
                path.display()
            ))),
        }
    }

    /// Verify and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        Self::verify_file(path)?;
        tracing::debug!("inventory config path: {}", path.display());

        let raw = fs::read_to_string(path)
            .map_err(|e| Error::InventoryConfig(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_yaml(&raw).map_err(|e| match e {
            Error::InventoryConfig(msg) => {
                Error::InventoryConfig(format!("failed to parse {}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| Error::InventoryConfig(e.to_string()))
    }

    pub fn group_selection(&self) -> Result<Selection> {
        select(
            self.mongo_all_groups,
            self.mongo_filter_groups.as_ref(),
            "either mongo_all_groups or mongo_filter_groups is required",
        )
    }

    pub fn device_selection(&self) -> Result<Selection> {
        select(
            self.mongo_all_devices,
            self.mongo_filter_devices.as_ref(),
            "either mongo_all_devices or mongo_filter_devices is required",
        )
    }
}

fn select(all: bool, filter: Option<&Map<String, Value>>, missing: &str) -> Result<Selection> {
    if all {
        return Ok(Selection::All);
    }
    match filter {
        Some(filter) if !filter.is_empty() => Ok(Selection::Filter(filter.clone())),
        _ => Err(Error::InventoryConfig(missing.to_string())),
    }
}

/// A host document as stored in the `hosts` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostDocument {
    pub name: String,
    #[serde(default)]
    pub variables: Map<String, Value>,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// A group document as stored in the `groups` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDocument {
    pub name: String,
    #[serde(default)]
    pub variables: Map<String, Value>,
}

/// Backend the inventory documents are read from
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Check the backend is reachable
    async fn ping(&self) -> Result<()>;

    async fn find_hosts(&self, filter: Option<&Map<String, Value>>) -> Result<Vec<HostDocument>>;

    async fn find_groups(&self, filter: Option<&Map<String, Value>>) -> Result<Vec<GroupDocument>>;

    /// Release the connection
    async fn close(&self);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryHost {
    pub vars: Map<String, Value>,
    pub groups: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryGroup {
    pub vars: Map<String, Value>,
    pub hosts: BTreeSet<String>,
}

/// In-memory inventory; every name and variable key is lowercase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inventory {
    pub hosts: BTreeMap<String, InventoryHost>,
    pub groups: BTreeMap<String, InventoryGroup>,
}

impl Default for Inventory {
    fn default() -> Self {
        let mut groups = BTreeMap::new();
        groups.insert(ALL_GROUP.to_string(), InventoryGroup::default());
        Self {
            hosts: BTreeMap::new(),
            groups,
        }
    }
}

impl Inventory {
    pub fn add_group(&mut self, name: &str) {
        self.groups.entry(name.to_lowercase()).or_default();
    }

    /// Add a host to a group, creating both as needed
    pub fn add_host(&mut self, name: &str, group: &str) {
        let name = name.to_lowercase();
        let group = group.to_lowercase();

        self.groups.entry(group.clone()).or_default().hosts.insert(name.clone());
        self.hosts.entry(name).or_default().groups.insert(group);
    }

    /// Set a variable on a host, or on a group when no such host exists
    pub fn set_variable(&mut self, entity: &str, key: &str, value: Value) -> Result<()> {
        let entity = entity.to_lowercase();
        let key = key.to_lowercase();

        if let Some(host) = self.hosts.get_mut(&entity) {
            host.vars.insert(key, value);
        } else if let Some(group) = self.groups.get_mut(&entity) {
            group.vars.insert(key, value);
        } else {
            return Err(Error::InventorySource(format!("'{}' is not a known host or group", entity)));
        }
        Ok(())
    }

    fn add_group_document(&mut self, doc: GroupDocument) -> Result<()> {
        self.add_group(&doc.name);
        for (key, value) in doc.variables {
            self.set_variable(&doc.name, &key, value)?;
        }
        Ok(())
    }

    fn add_host_document(&mut self, doc: HostDocument) -> Result<()> {
        self.add_host(&doc.name, ALL_GROUP);
        for (key, value) in doc.variables {
            self.set_variable(&doc.name, &key, value)?;
        }
        for group in &doc.groups {
            self.add_host(&doc.name, group);
        }
        Ok(())
    }
}

/// Loads an `Inventory` from a source according to a validated config
#[derive(Debug, Clone)]
pub struct InventoryLoader {
    groups: Selection,
    devices: Selection,
}

impl InventoryLoader {
    /// Validate the group and device selections before anything connects
    pub fn new(config: &InventoryConfig) -> Result<Self> {
        Ok(Self {
            groups: config.group_selection()?,
            devices: config.device_selection()?,
        })
    }

    /// Verify reachability then load groups and hosts. The source is
    /// closed whether or not loading succeeds.
    pub async fn load(&self, source: &dyn InventorySource) -> Result<Inventory> {
        let result = self.load_inner(source).await;
        source.close().await;
        result
    }

    async fn load_inner(&self, source: &dyn InventorySource) -> Result<Inventory> {
        if let Err(e) = source.ping().await {
            tracing::info!("connection to inventory source failed: {}", e);
            return Err(Error::InventoryConfig(format!("could not connect to inventory source: {}", e)));
        }
        tracing::info!("connection to inventory source verified");

        let mut inventory = Inventory::default();

        let groups = source.find_groups(self.groups.filter()).await?;
        let group_count = groups.len();
        for doc in groups {
            inventory.add_group_document(doc)?;
        }

        let hosts = source.find_hosts(self.devices.filter()).await?;
        let host_count = hosts.len();
        for doc in hosts {
            inventory.add_host_document(doc)?;
        }

        tracing::info!("loaded {} host(s) and {} group(s)", host_count, group_count);
        Ok(inventory)
    }
}

/// Load the inventory described by a config file from MongoDB
#[cfg(feature = "mongo-inventory")]
pub async fn load_from_file(path: &Path) -> Result<Inventory> {
    let config = InventoryConfig::load(path)?;
    let loader = InventoryLoader::new(&config)?;
    let source = MongoInventorySource::connect(&config)?;
    loader.load(&source).await
}
