use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Subcommand};

use msearch_client::RestSettingsStore;
use msearch_core::config::ClientConfig;
use msearch_core::store::SettingsStore;

pub mod defaults;
pub mod set;
pub mod show;
pub mod validate;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the current allow-list as it appears in the editor
    Show,
    /// Print the server default allow-list (nothing is saved)
    Defaults,
    /// Save a new allow-list from a file, or stdin with `-`
    Set(set::SetArgs),
    /// Check the shape of an allow-list document locally
    Validate(validate::ValidateArgs),
}

#[derive(Args)]
pub struct ConnectionArgs {
    /// YAML file with api_url, token and timeout
    #[arg(long, global = true, env = "MSEARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// API root of the plugin host, e.g. http://localhost:8080/api/v1
    #[arg(long, global = true, env = "MSEARCH_API_URL")]
    pub api_url: Option<String>,

    /// Authentication token
    #[arg(long, global = true, env = "MSEARCH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl ConnectionArgs {
    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let base = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        Ok(base.with_overrides(self.api_url.clone(), self.token.clone()))
    }

    pub fn store(&self) -> anyhow::Result<Arc<dyn SettingsStore>> {
        let config = self.client_config()?;
        tracing::debug!(api_url = %config.api_url, "using settings API");
        Ok(Arc::new(RestSettingsStore::new(&config)?))
    }
}

/// Read a document from `path`, or from stdin when it is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))
    }
}
