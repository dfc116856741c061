//! Configuration management for the mapp gateway

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

/// Storage backend selection.
///
/// The S3 variant covers every S3-compatible provider (MinIO, R2, B2, AWS);
/// the filesystem variant serves a local mount directory.
#[derive(Debug, Clone, Deserialize)]
pub enum StorageConfig {
    S3(S3Config),
    Filesystem { root: PathBuf },
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Config {
    pub provider: StorageProvider,
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    Minio,
    R2,
    S3,
    B2,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig { port: 10000 },
            storage: StorageConfig::Filesystem {
                root: PathBuf::from("./mapp-data"),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        let storage = match env::var("STORAGE_PROVIDER")
            .unwrap_or_else(|_| "b2".to_string())
            .as_str()
        {
            "filesystem" => StorageConfig::Filesystem {
                root: env::var("LOCAL_STORAGE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("./mapp-data")),
            },
            provider => StorageConfig::S3(S3Config {
                provider: match provider {
                    "r2" => StorageProvider::R2,
                    "s3" => StorageProvider::S3,
                    "minio" => StorageProvider::Minio,
                    _ => StorageProvider::B2,
                },
                endpoint: env::var("S3_ENDPOINT")?,
                bucket: env::var("S3_BUCKET")?,
                access_key: env::var("S3_ACCESS_KEY")?,
                secret_key: env::var("S3_SECRET_KEY")?,
                region: env::var("S3_REGION").ok(),
            }),
        };

        Ok(Config {
            server: ServerConfig {
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "10000".to_string())
                    .parse()
                    .unwrap_or(10000),
            },
            storage,
        })
    }
}
