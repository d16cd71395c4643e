use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, to_document, Bson, Document};
use mongodb::options::{ClientOptions, Credential, FindOptions, ServerAddress};
use mongodb::{Client, Database};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{GroupDocument, HostDocument, InventoryConfig, InventorySource};
use crate::error::{Error, Result};

const DATABASE: &str = "ansible_inventory";
const HOSTS: &str = "hosts";
const GROUPS: &str = "groups";

/// Inventory documents read from MongoDB
pub struct MongoInventorySource {
    client: Client,
}

fn source_err(err: impl std::fmt::Display) -> Error {
    Error::InventorySource(err.to_string())
}

impl MongoInventorySource {
    /// Build a client for the configured server. No I/O happens until the
    /// first command.
    pub fn connect(config: &InventoryConfig) -> Result<Self> {
        let mut options = ClientOptions::default();
        options.hosts = vec![ServerAddress::Tcp {
            host: config.mongo_host.clone(),
            port: Some(config.mongo_port),
        }];
        options.app_name = Some("forge-render".to_string());

        if let Some(username) = &config.mongo_username {
            options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(config.mongo_password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(options).map_err(source_err)?;
        tracing::debug!("mongo client for {}:{}", config.mongo_host, config.mongo_port);
        Ok(Self { client })
    }

    fn database(&self) -> Database {
        self.client.database(DATABASE)
    }

    async fn find<T>(&self, collection: &str, filter: Option<&Map<String, Value>>) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync,
    {
        let filter: Option<Document> = filter.map(to_document).transpose().map_err(source_err)?;
        let options = FindOptions::builder().projection(doc! { "_id": 0 }).build();

        let cursor = self
            .database()
            .collection::<T>(collection)
            .find(filter, options)
            .await
            .map_err(source_err)?;

        cursor.try_collect().await.map_err(source_err)
    }
}

fn is_ok(response: &Document) -> bool {
    match response.get("ok") {
        Some(Bson::Double(v)) => *v == 1.0,
        Some(Bson::Int32(v)) => *v == 1,
        Some(Bson::Int64(v)) => *v == 1,
        _ => false,
    }
}

#[async_trait]
impl InventorySource for MongoInventorySource {
    async fn ping(&self) -> Result<()> {
        let response = self
            .database()
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(source_err)?;

        if is_ok(&response) {
            Ok(())
        } else {
            Err(Error::InventorySource(format!("unexpected ping response: {}", response)))
        }
    }

    async fn find_hosts(&self, filter: Option<&Map<String, Value>>) -> Result<Vec<HostDocument>> {
        self.find(HOSTS, filter).await
    }

    async fn find_groups(&self, filter: Option<&Map<String, Value>>) -> Result<Vec<GroupDocument>> {
        self.find(GROUPS, filter).await
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}
