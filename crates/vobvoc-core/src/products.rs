use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The brand's stated promise (Voice of Brand) for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPromise {
    pub name: String,
    pub promise: String,
    pub category: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductsFile {
    #[serde(default)]
    pub products: Vec<ProductPromise>,
}

impl ProductsFile {
    /// Look up a product's promise by exact name.
    #[must_use]
    pub fn promise_for(&self, product_name: &str) -> Option<&str> {
        self.products
            .iter()
            .find(|p| p.name == product_name)
            .map(|p| p.promise.as_str())
    }
}

/// Load and validate the product promise catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_products(path: &Path) -> Result<ProductsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProductsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_products(&content)
}

/// Parse and validate catalog YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_products(content: &str) -> Result<ProductsFile, ConfigError> {
    let products_file: ProductsFile =
        serde_yaml::from_str(content).map_err(ConfigError::ProductsFileParse)?;

    validate_products(&products_file)?;

    Ok(products_file)
}

fn validate_products(products_file: &ProductsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for product in &products_file.products {
        if product.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "product name must be non-empty".to_string(),
            ));
        }

        if product.promise.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "product '{}' has an empty promise",
                product.name
            )));
        }

        let lower_name = product.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate product name: '{}'",
                product.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
