//! Local persistence for session identity and UI preferences.
//!
//! A single LMDB environment in the data directory holds one string
//! database. The session identity is stored as JSON under a fixed key;
//! everything else is small key/value metadata.

use std::fs;
use std::path::Path;

use color_eyre::eyre::{Context, Result};
use heed::types::Str;
use heed::{Database, Env, EnvOpenOptions};
use tracing::{debug, info};

use crate::config::get_data_dir;
use crate::domain::session::Identity;

const METADATA_DB: &str = "metadata";
const SESSION_KEY: &str = "session";

#[derive(Clone)]
pub struct Store {
    env: Env,
    metadata: Database<Str, Str>,
}

impl Store {
    pub fn new() -> Result<Self> {
        Self::with_path(get_data_dir().join("paywave.mdb"))
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        fs::create_dir_all(path).context("Failed to create store directory")?;
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(16 * 1024 * 1024)
                .max_dbs(1)
                .open(path)
                .context("Failed to open store environment")?
        };
        let mut wtxn = env.write_txn()?;
        let metadata = env.create_database(&mut wtxn, Some(METADATA_DB))?;
        wtxn.commit()?;
        info!("Store opened at {:?}", path);
        Ok(Self { env, metadata })
    }

    pub fn save_metadata(&self, key: &str, value: &str) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        self.metadata.put(&mut wtxn, key, value)?;
        wtxn.commit()?;
        debug!("Saved metadata {}", key);
        Ok(())
    }

    pub fn load_metadata(&self, key: &str) -> Result<Option<String>> {
        let rtxn = self.env.read_txn()?;
        Ok(self.metadata.get(&rtxn, key)?.map(String::from))
    }

    pub fn delete_metadata(&self, key: &str) -> Result<()> {
        let mut wtxn = self.env.write_txn()?;
        self.metadata.delete(&mut wtxn, key)?;
        wtxn.commit()?;
        Ok(())
    }

    /// Persist the signed-in identity so a restart stays signed in.
    pub fn save_session(&self, identity: &Identity) -> Result<()> {
        let json = serde_json::to_string(identity)?;
        self.save_metadata(SESSION_KEY, &json)?;
        info!("Session saved for {}", identity.email);
        Ok(())
    }

    /// Load the persisted identity, if any. A corrupt record is treated
    /// as signed out rather than an error.
    pub fn load_session(&self) -> Result<Option<Identity>> {
        match self.load_metadata(SESSION_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json).ok()),
            None => Ok(None),
        }
    }

    pub fn clear_session(&self) -> Result<()> {
        self.delete_metadata(SESSION_KEY)?;
        info!("Session cleared");
        Ok(())
    }
}
