//! Product catalog model.
//!
//! Both catalogs (the wine monopoly's product API and the grocery store feed)
//! share the same camelCase JSON shape. Every part is optional.

use serde::{Deserialize, Serialize};

use crate::error::BeverageError;

const PRIMARY_IMAGE_URL: &str = "https://bilder.vinmonopolet.no/cache/512x512-0";
const STORE_IMAGE_URL: &str = "https://bilder.ngdata.no";
const FALLBACK_IMAGE_URL: &str = "https://bilder.vinmonopolet.no/bottle.png";

/// Which catalog a beverage came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// The wine monopoly, recognised by a wholesaler id
    Primary,
    /// Grocery store
    Store,
}

impl CatalogSource {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Primary => "Vinmonopolet",
            Self::Store => "Store",
        }
    }
}

/// One catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Beverage {
    pub basic: Option<Basic>,
    pub logistics: Option<Logistics>,
    pub origins: Option<Origins>,
    pub classification: Option<Classification>,
    pub description: Option<Description>,
    pub prices: Option<Vec<Price>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Basic {
    pub product_id: Option<String>,
    pub product_short_name: Option<String>,
    pub product_long_name: Option<String>,
    /// Liters
    pub volume: Option<f64>,
    /// Percent
    pub alcohol_content: Option<f64>,
    pub vintage: Option<i32>,
    pub age_limit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Logistics {
    pub wholesaler_id: Option<String>,
    pub wholesaler_name: Option<String>,
    pub manufacturer_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Origins {
    pub origin: Option<Origin>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Origin {
    pub country: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Classification {
    pub main_product_type_name: Option<String>,
    pub sub_product_type_name: Option<String>,
    pub product_type_name: Option<String>,
    pub product_group_name: Option<String>,
}

/// Taste profile. Ratings are small integers sent as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Description {
    pub characteristics: Option<Characteristics>,
    pub freshness: Option<String>,
    pub fullness: Option<String>,
    pub bitterness: Option<String>,
    pub sweetness: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Characteristics {
    pub colour: Option<String>,
    pub odour: Option<String>,
    pub taste: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Price {
    pub sales_price: Option<f64>,
    pub sales_price_pr_liter: Option<f64>,
}

impl Description {
    /// Integer value of a rating, 0 when absent or not a number.
    pub fn rating(value: Option<&str>) -> i32 {
        value.and_then(|v| v.parse().ok()).unwrap_or(0)
    }
}

impl Beverage {
    /// Long name, else short name.
    pub fn name(&self) -> Option<&str> {
        let basic = self.basic.as_ref()?;
        basic
            .product_long_name
            .as_deref()
            .or(basic.product_short_name.as_deref())
    }

    pub fn product_id(&self) -> Option<&str> {
        self.basic.as_ref()?.product_id.as_deref()
    }

    /// First listed sales price.
    pub fn price(&self) -> Option<f64> {
        self.prices.as_ref()?.first()?.sales_price
    }

    pub fn volume(&self) -> Option<f64> {
        self.basic.as_ref()?.volume
    }

    pub fn category(&self) -> Option<&str> {
        self.classification.as_ref()?.sub_product_type_name.as_deref()
    }

    pub fn product_type(&self) -> Option<&str> {
        self.classification.as_ref()?.product_type_name.as_deref()
    }

    /// Product type, else category.
    pub fn kind(&self) -> Option<&str> {
        self.product_type().or_else(|| self.category())
    }

    pub fn alcohol_content(&self) -> Option<f64> {
        self.basic.as_ref()?.alcohol_content
    }

    pub fn freshness(&self) -> i32 {
        Description::rating(self.description.as_ref().and_then(|d| d.freshness.as_deref()))
    }

    pub fn fullness(&self) -> i32 {
        Description::rating(self.description.as_ref().and_then(|d| d.fullness.as_deref()))
    }

    pub fn bitterness(&self) -> i32 {
        Description::rating(self.description.as_ref().and_then(|d| d.bitterness.as_deref()))
    }

    pub fn source(&self) -> CatalogSource {
        match self.logistics.as_ref().and_then(|l| l.wholesaler_id.as_ref()) {
            Some(_) => CatalogSource::Primary,
            None => CatalogSource::Store,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.source() == CatalogSource::Primary
    }

    /// Product photo on the source's image CDN, or a generic bottle.
    pub fn image_url(&self) -> String {
        match (self.product_id(), self.source()) {
            (Some(id), CatalogSource::Primary) => format!("{}/{}-1.jpg", PRIMARY_IMAGE_URL, id),
            (Some(id), CatalogSource::Store) => format!("{}/{}/meny/large.jpg", STORE_IMAGE_URL, id),
            (None, _) => FALLBACK_IMAGE_URL.to_string(),
        }
    }
}

/// Parse a catalog, a JSON array of products.
pub fn parse_catalog(json: &str) -> Result<Vec<Beverage>, BeverageError> {
    let beverages: Vec<Beverage> = serde_json::from_str(json)?;
    tracing::debug!("Parsed {} catalog entries", beverages.len());
    Ok(beverages)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    const CATALOG: &str = r#"[
        {
            "basic": {
                "productId": "12345",
                "productShortName": "Sommerøl",
                "productLongName": "Sommerøl Lys Lager 0,5l",
                "volume": 0.5,
                "alcoholContent": 4.7
            },
            "logistics": { "wholesalerId": "987", "wholesalerName": "Bryggeri AS" },
            "classification": {
                "subProductTypeName": "Lys lager",
                "productTypeName": "Lys ale"
            },
            "description": { "freshness": "8", "fullness": "4", "bitterness": "x" },
            "prices": [ { "salesPrice": 49.9 }, { "salesPrice": 39.9 } ],
            "attributes": []
        },
        {
            "basic": { "productId": "7040", "productShortName": "Pils" },
            "classification": { "subProductTypeName": "Pilsner" }
        },
        {}
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);

        let primary = &catalog[0];
        assert_eq!(primary.name(), Some("Sommerøl Lys Lager 0,5l"));
        assert_eq!(primary.price(), Some(49.9));
        assert_eq!(primary.volume(), Some(0.5));
        assert_eq!(primary.category(), Some("Lys lager"));
        assert_eq!(primary.kind(), Some("Lys ale"));
        assert_eq!(primary.alcohol_content(), Some(4.7));
        assert_eq!(primary.source(), CatalogSource::Primary);
        assert_eq!(primary.freshness(), 8);
        assert_eq!(primary.fullness(), 4);
        assert_eq!(primary.bitterness(), 0);
    }

    #[test]
    fn test_fallbacks() {
        let catalog = parse_catalog(CATALOG).unwrap();

        let store = &catalog[1];
        assert_eq!(store.name(), Some("Pils"));
        assert_eq!(store.kind(), Some("Pilsner"));
        assert_eq!(store.price(), None);
        assert_eq!(store.source(), CatalogSource::Store);

        let empty = &catalog[2];
        assert_eq!(empty.name(), None);
        assert_eq!(empty.kind(), None);
        assert_eq!(empty.freshness(), 0);
    }

    #[test]
    fn test_image_urls() {
        let catalog = parse_catalog(CATALOG).unwrap();
        assert_eq!(
            catalog[0].image_url(),
            "https://bilder.vinmonopolet.no/cache/512x512-0/12345-1.jpg"
        );
        assert_eq!(
            catalog[1].image_url(),
            "https://bilder.ngdata.no/7040/meny/large.jpg"
        );
        assert_eq!(catalog[2].image_url(), "https://bilder.vinmonopolet.no/bottle.png");
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(matches!(
            parse_catalog(r#"{ "basic": {} }"#),
            Err(BeverageError::Parse(_))
        ));
    }
}
