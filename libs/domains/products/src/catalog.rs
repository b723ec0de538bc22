//! XML product catalog parsing.
//!
//! The catalog format is a flat product list:
//!
//! ```xml
//! <catalog>
//!   <product id="1">
//!     <name>Phone X</name>
//!     <description>Waterproof smartphone</description>
//!     <price>499.99</price>
//!     <category>Electronics</category>
//!     <brand>Acme</brand>
//!     <tags>
//!       <tag>waterproof</tag>
//!     </tags>
//!   </product>
//! </catalog>
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;

#[derive(Debug, Deserialize)]
#[serde(rename = "catalog")]
pub struct Catalog {
    #[serde(rename = "product", default)]
    pub products: Vec<CatalogProduct>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogProduct {
    #[serde(rename = "@id")]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in major units, e.g. `499.99`
    pub price: Option<f64>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub tags: Option<TagList>,
}

#[derive(Debug, Deserialize)]
pub struct TagList {
    #[serde(rename = "tag", default)]
    pub tags: Vec<String>,
}

impl Catalog {
    /// Parse a catalog from XML text.
    pub fn from_str(xml: &str) -> ProductResult<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// Parse a catalog from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ProductResult<Self> {
        let xml = std::fs::read_to_string(path)?;
        Self::from_str(&xml)
    }
}

impl CatalogProduct {
    /// Validate and convert into the domain model.
    pub fn into_product(self) -> ProductResult<Product> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ProductError::Validation(format!(
                "Product {} has an empty name",
                self.id
            )));
        }

        let price_cents = self
            .price
            .map(|p| (p * 100.0).round() as i64)
            .unwrap_or_default();
        if price_cents < 0 {
            return Err(ProductError::Validation(format!(
                "Product {} has a negative price",
                self.id
            )));
        }

        Ok(Product {
            id: self.id,
            name,
            description: self.description.trim().to_string(),
            price_cents,
            category: self.category.filter(|c| !c.trim().is_empty()),
            brand: self.brand.filter(|b| !b.trim().is_empty()),
            tags: self.tags.map(|t| t.tags).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <catalog>
          <product id="1">
            <name>Phone X</name>
            <description>Waterproof smartphone</description>
            <price>499.99</price>
            <category>Electronics</category>
            <tags>
              <tag>waterproof</tag>
              <tag>5g</tag>
            </tags>
          </product>
          <product id="2">
            <name>Phone Y</name>
            <price>299</price>
            <brand>Acme</brand>
          </product>
        </catalog>
    "#;

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::from_str(SAMPLE).unwrap();
        assert_eq!(catalog.products.len(), 2);

        let phone_x = catalog.products[0].id;
        assert_eq!(phone_x, 1);
    }

    #[test]
    fn test_into_product_converts_price_to_cents() {
        let catalog = Catalog::from_str(SAMPLE).unwrap();
        let mut products = catalog.products.into_iter();

        let phone_x = products.next().unwrap().into_product().unwrap();
        assert_eq!(phone_x.price_cents, 49999);
        assert_eq!(phone_x.tags, vec!["waterproof", "5g"]);
        assert_eq!(phone_x.category.as_deref(), Some("Electronics"));

        let phone_y = products.next().unwrap().into_product().unwrap();
        assert_eq!(phone_y.price_cents, 29900);
        assert!(phone_y.tags.is_empty());
        assert_eq!(phone_y.brand.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let xml = r#"<catalog><product id="3"><name>  </name></product></catalog>"#;
        let catalog = Catalog::from_str(xml).unwrap();
        let err = catalog
            .products
            .into_iter()
            .next()
            .unwrap()
            .into_product()
            .unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[test]
    fn test_malformed_xml_is_a_catalog_error() {
        let err = Catalog::from_str("<catalog><product></catalog>").unwrap_err();
        assert!(matches!(err, ProductError::Catalog(_)));
    }

    #[test]
    fn test_sample_catalog_parses() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../data/catalog.xml");
        let catalog = Catalog::from_path(path).unwrap();
        assert!(catalog.products.len() >= 5);
        for entry in catalog.products {
            entry.into_product().unwrap();
        }
    }

    #[test]
    fn test_missing_price_defaults_to_zero() {
        let xml = r#"<catalog><product id="4"><name>Freebie</name></product></catalog>"#;
        let catalog = Catalog::from_str(xml).unwrap();
        let product = catalog
            .products
            .into_iter()
            .next()
            .unwrap()
            .into_product()
            .unwrap();
        assert_eq!(product.price_cents, 0);
    }
}
