use anyhow::{Context, Result};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl StoreBackend {
    fn from_env(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "memory" | "in-memory" | "inmemory" => Ok(Self::Memory),
            _ => Err(anyhow::anyhow!(
                "STORE_BACKEND must be one of: mongodb, memory"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub public_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16")?;

        let store_backend = StoreBackend::from_env(
            &env::var("STORE_BACKEND").unwrap_or_else(|_| "mongodb".to_string()),
        )?;

        let mongodb_uri = match env::var("MONGODB_URI") {
            Ok(uri) => uri,
            Err(_) => compose_mongodb_uri(
                &env::var("MONGODB_CLUSTER").unwrap_or_else(|_| "localhost:27017".to_string()),
                env::var("MONGODB_ADMIN_USER").ok().as_deref(),
                env::var("MONGODB_ADMIN_PASS").ok().as_deref(),
            ),
        };

        let mongodb_database =
            env::var("MONGODB_DATABASE").unwrap_or_else(|_| "todoListDB".to_string());

        let public_dir = env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string());

        Ok(Self {
            host,
            port,
            store_backend,
            mongodb_uri,
            mongodb_database,
            public_dir,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// With credentials the cluster is reached over SRV (hosted deployments);
/// without them a plain local URI is produced.
pub fn compose_mongodb_uri(cluster: &str, user: Option<&str>, password: Option<&str>) -> String {
    match (user, password) {
        (Some(user), Some(password)) => format!(
            "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
            utf8_percent_encode(user, NON_ALPHANUMERIC),
            utf8_percent_encode(password, NON_ALPHANUMERIC),
            cluster,
        ),
        _ => format!("mongodb://{cluster}"),
    }
}
