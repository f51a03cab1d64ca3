pub mod memory;
pub mod mongo;
pub mod store;

use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

use crate::utils::StoreError;

pub use memory::MemoryStore;
pub use store::Store;

pub const USERS: &str = "users";
pub const PROFILES: &str = "profiles";
pub const POSTS: &str = "posts";

const DEFAULT_DB_NAME: &str = "devconnector";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, StoreError> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        let db_name = database_name(uri);
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Unique indexes back the one-profile-per-user, handle and email invariants.
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        log::info!("🔧 Creating database indexes...");

        let specs: [(&str, Document, bool); 5] = [
            (USERS, doc! { "email": 1 }, true),
            (PROFILES, doc! { "user": 1 }, true),
            (PROFILES, doc! { "handle": 1 }, true),
            (POSTS, doc! { "date": -1 }, false),
            (POSTS, doc! { "user": 1 }, false),
        ];

        for (collection, keys, unique) in specs {
            let label = format!("{}({})", collection, keys.keys().cloned().collect::<Vec<_>>().join(", "));
            let index = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(unique).build())
                .build();

            match self.collection::<Document>(collection).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}", label),
                Err(e) => log::debug!("   ℹ️  Index already exists: {} ({})", label, e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// Database name from the URI path (`mongodb://host/name?opts`), or the default.
fn database_name(uri: &str) -> &str {
    let without_scheme = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);
    without_scheme
        .split_once('/')
        .map(|(_, path)| path.split('?').next().unwrap_or(""))
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DB_NAME)
}
