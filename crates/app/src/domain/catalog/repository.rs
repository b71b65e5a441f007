//! Catalog repository.

use std::{
    collections::{BTreeMap, btree_map::Entry},
    fs,
    path::Path,
};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::catalog::{
    errors::CatalogError,
    models::{Product, ProductId},
};

/// Read-only product lookup.
pub trait Catalog: Send + Sync {
    /// Resolve a single product.
    fn product(&self, id: ProductId) -> Option<&Product>;

    /// All products, ordered by identifier.
    fn products(&self) -> Vec<&Product>;
}

/// Catalog fixed at process start.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: BTreeMap<ProductId, Product>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Build a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns an error when an identifier repeats or a price is negative.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let mut by_id = BTreeMap::new();

        for product in products {
            if product.unit_price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice(product.id));
            }

            match by_id.entry(product.id) {
                Entry::Occupied(_) => return Err(CatalogError::DuplicateProduct(product.id)),
                Entry::Vacant(slot) => {
                    slot.insert(product);
                }
            }
        }

        Ok(Self { products: by_id })
    }

    /// The demo catalog the shop ships with.
    #[must_use]
    pub fn demo() -> Self {
        let products = [
            Product::new(1, "Zapatillas", Decimal::new(23_400_00, 2)),
            Product::new(2, "Harina", Decimal::new(1_500_00, 2)),
            Product::new(3, "Pepe", Decimal::new(1_00, 2)),
        ];

        Self {
            products: products
                .into_iter()
                .map(|product| (product.id, product))
                .collect(),
        }
    }

    /// Load a catalog from a YAML file with a top-level `products` list.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read, parsed or validated.
    pub fn from_yaml_path(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file: CatalogFile =
            serde_norway::from_str(&contents).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Self::new(file.products)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Catalog for StaticCatalog {
    fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    fn products(&self) -> Vec<&Product> {
        self.products.values().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use rust_decimal_macros::dec;
    use tempfile::NamedTempFile;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn demo_catalog_lists_products_in_id_order() {
        let catalog = StaticCatalog::demo();

        let names: Vec<&str> = catalog
            .products()
            .into_iter()
            .map(|product| product.name.as_str())
            .collect();

        assert_eq!(names, ["Zapatillas", "Harina", "Pepe"]);
    }

    #[test]
    fn demo_catalog_prices_are_exact() {
        let catalog = StaticCatalog::demo();

        let price = catalog
            .product(ProductId::new(1))
            .map(|product| product.unit_price);

        assert_eq!(price, Some(dec!(23400.00)));
    }

    #[test]
    fn unknown_product_is_none() {
        assert!(StaticCatalog::demo().product(ProductId::new(99)).is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = StaticCatalog::new([
            Product::new(1, "A", dec!(1)),
            Product::new(1, "B", dec!(2)),
        ]);

        assert!(
            matches!(result, Err(CatalogError::DuplicateProduct(id)) if id == ProductId::new(1)),
            "expected DuplicateProduct, got {result:?}"
        );
    }

    #[test]
    fn negative_prices_are_rejected() {
        let result = StaticCatalog::new([Product::new(7, "Refund", dec!(-0.01))]);

        assert!(
            matches!(result, Err(CatalogError::NegativePrice(_))),
            "expected NegativePrice, got {result:?}"
        );
    }

    #[test]
    fn free_products_are_allowed() -> TestResult {
        let catalog = StaticCatalog::new([Product::new(7, "Sample", dec!(0))])?;

        assert_eq!(catalog.len(), 1);

        Ok(())
    }

    #[test]
    fn loads_products_from_yaml() -> TestResult {
        let mut file = NamedTempFile::new()?;

        writeln!(
            file,
            "products:\n  - id: 10\n    name: Yerba\n    unit_price: \"3200.50\"\n  - id: 11\n    name: Mate\n    unit_price: \"8999.99\""
        )?;

        let catalog = StaticCatalog::from_yaml_path(file.path())?;

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.product(ProductId::new(10)).map(|p| p.unit_price),
            Some(dec!(3200.50))
        );

        Ok(())
    }

    #[test]
    fn missing_file_reports_path() {
        let result = StaticCatalog::from_yaml_path(Path::new("/definitely/not/here.yaml"));

        assert!(
            matches!(result, Err(CatalogError::Io { ref path, .. }) if path.ends_with("here.yaml")),
            "expected Io error, got {result:?}"
        );
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() -> TestResult {
        let mut file = NamedTempFile::new()?;

        writeln!(file, "products: [this is not a product]")?;

        let result = StaticCatalog::from_yaml_path(file.path());

        assert!(
            matches!(result, Err(CatalogError::Parse { .. })),
            "expected Parse error, got {result:?}"
        );

        Ok(())
    }
}
