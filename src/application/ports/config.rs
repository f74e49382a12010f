//! Config file port interface

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Source of the file layer of the configuration
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the file layer. A missing file yields `AppConfig::empty()`.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Location the store reads from
    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;
}
