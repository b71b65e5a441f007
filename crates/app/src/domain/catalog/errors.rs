//! Catalog errors.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::domain::catalog::models::ProductId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file {path}: {source}")]
    Io {
        path: PathBuf,

        #[source]
        source: io::Error,
    },

    #[error("could not parse catalog file {path}: {source}")]
    Parse {
        path: PathBuf,

        #[source]
        source: serde_norway::Error,
    },

    #[error("product {0} is listed more than once")]
    DuplicateProduct(ProductId),

    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    #[error("unknown currency code {0}")]
    UnknownCurrency(String),
}
