//! API credential lookup: browser storage first, build-time default second.

use std::rc::Rc;
use async_trait::async_trait;
use sitegen_types::{Result, SitegenError, config::API_KEY_STORAGE_KEY};
use crate::ports::{CredentialSource, StoragePort};

pub struct StoredCredential {
    storage: Rc<dyn StoragePort>,
    fallback: Option<String>,
}

impl StoredCredential {
    pub fn new(storage: Rc<dyn StoragePort>, fallback: Option<String>) -> Self {
        Self { storage, fallback }
    }

    /// Persist a new credential. An empty value removes the stored one.
    pub async fn store(&self, key: &str) -> Result<()> {
        let key = key.trim();
        if key.is_empty() {
            self.storage.delete(API_KEY_STORAGE_KEY).await
        } else {
            self.storage.set(API_KEY_STORAGE_KEY, key.as_bytes()).await
        }
    }

    async fn stored(&self) -> Option<String> {
        match self.storage.get(API_KEY_STORAGE_KEY).await {
            Ok(Some(bytes)) => non_empty(&String::from_utf8_lossy(&bytes)),
            Ok(None) => None,
            Err(e) => {
                log::warn!("Credential lookup in {} failed: {}", self.storage.backend_name(), e);
                None
            }
        }
    }
}

#[async_trait(?Send)]
impl CredentialSource for StoredCredential {
    async fn resolve(&self) -> Result<String> {
        if let Some(key) = self.stored().await {
            return Ok(key);
        }
        if let Some(key) = self.fallback.as_deref().and_then(non_empty) {
            return Ok(key);
        }
        Err(SitegenError::Config(
            "Set your Gemini API key in Settings, or build with SITEGEN_API_KEY set".to_string(),
        ))
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
