//! Catalog Config

use std::path::PathBuf;

use clap::Args;

/// Product catalog settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// YAML file with a top-level `products` list; the demo catalog is used when unset
    #[arg(long, env = "CATALOG_PATH")]
    pub catalog_path: Option<PathBuf>,

    /// ISO 4217 code prices are quoted in
    #[arg(long, env = "CATALOG_CURRENCY", default_value = "ARS")]
    pub catalog_currency: String,
}
