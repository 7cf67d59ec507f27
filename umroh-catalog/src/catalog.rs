use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use serde::{de, Deserialize, Deserializer};
use tracing::info;
use umroh_core::repository::{find_many_as, find_one_as, insert_as, to_document};
use umroh_core::{Collection, CoreError, CoreResult, DocumentStore, Filter, LIST_LIMIT};
use uuid::Uuid;

use crate::package::{NewPackage, Package, PackageType};
use crate::seed;

/// Optional listing filters. All present fields must match; price bounds are inclusive.
///
/// Query parameters sent empty (`?package_type=`) count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub package_type: Option<PackageType>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_price: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub departure_city: Option<String>,
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}

impl PackageFilter {
    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::new();
        if let Some(package_type) = self.package_type {
            filter = filter.eq("package_type", package_type.as_str());
        }
        if let Some(min) = self.min_price {
            filter = filter.gte("price", min);
        }
        if let Some(max) = self.max_price {
            filter = filter.lte("price", max);
        }
        if let Some(city) = self.departure_city.as_deref().filter(|c| !c.is_empty()) {
            filter = filter.eq("departure_city", city);
        }
        filter
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(usize),
    AlreadySeeded,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn list_packages(&self, filter: &PackageFilter) -> CoreResult<Vec<Package>> {
        let packages =
            find_many_as(&*self.store, Collection::Packages, &filter.to_filter(), LIST_LIMIT).await?;
        Ok(packages)
    }

    pub async fn get_package(&self, id: Uuid) -> CoreResult<Package> {
        find_one_as(&*self.store, Collection::Packages, &Filter::new().eq("id", id.to_string()))
            .await?
            .ok_or_else(|| CoreError::NotFound("Package not found".to_string()))
    }

    pub async fn create_package(&self, new_package: NewPackage) -> CoreResult<Package> {
        new_package.validate()?;
        let package = new_package.into_package(Utc::now());
        insert_as(&*self.store, Collection::Packages, &package).await?;
        info!("Package created: {} ({})", package.id, package.name);
        Ok(package)
    }

    /// Inserts the demonstration catalog, unless any package already exists.
    pub async fn seed(&self) -> CoreResult<SeedOutcome> {
        let existing = self.store.count(Collection::Packages, &Filter::new()).await?;
        if existing > 0 {
            info!("Catalog already holds {} packages, skipping seed", existing);
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let now = Utc::now();
        let documents = seed::demo_packages()
            .into_iter()
            .map(|p| to_document(Collection::Packages, &p.into_package(now)))
            .collect::<Result<Vec<_>, _>>()?;
        let count = documents.len();

        self.store.insert_many(Collection::Packages, documents).await?;
        info!("Seeded {} packages", count);
        Ok(SeedOutcome::Seeded(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umroh_store::MemoryStore;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryStore::new()))
    }

    fn tour(name: &str, price: i64, city: &str) -> NewPackage {
        let mut package = seed::demo_packages().remove(3);
        package.name = name.to_string();
        package.price = price;
        package.departure_city = city.to_string();
        package
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let catalog = service();

        assert_eq!(catalog.seed().await.unwrap(), SeedOutcome::Seeded(6));
        assert_eq!(catalog.seed().await.unwrap(), SeedOutcome::AlreadySeeded);

        let all = catalog.list_packages(&PackageFilter::default()).await.unwrap();
        assert_eq!(all.len(), 6);
    }

    #[tokio::test]
    async fn test_seeded_umrah_filters() {
        let catalog = service();
        catalog.seed().await.unwrap();

        let umrah = PackageFilter { package_type: Some(PackageType::Umrah), ..Default::default() };
        assert_eq!(catalog.list_packages(&umrah).await.unwrap().len(), 3);

        let premium = PackageFilter { min_price: Some(30_000_000), ..umrah };
        let found = catalog.list_packages(&premium).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].price, 35_000_000);
    }

    #[tokio::test]
    async fn test_price_bounds_are_inclusive() {
        let catalog = service();
        catalog.seed().await.unwrap();

        let filter = PackageFilter {
            min_price: Some(1_500_000),
            max_price: Some(3_500_000),
            ..Default::default()
        };
        let mut prices: Vec<i64> =
            catalog.list_packages(&filter).await.unwrap().iter().map(|p| p.price).collect();
        prices.sort();
        assert_eq!(prices, vec![1_500_000, 3_500_000]);

        let semarang = PackageFilter { departure_city: Some("Semarang".to_string()), ..Default::default() };
        assert_eq!(catalog.list_packages(&semarang).await.unwrap().len(), 1);

        let any_city = PackageFilter { departure_city: Some(String::new()), ..Default::default() };
        assert_eq!(catalog.list_packages(&any_city).await.unwrap().len(), 6);
    }

    #[test]
    fn test_empty_query_values_are_ignored() {
        let filter: PackageFilter = serde_json::from_value(serde_json::json!({
            "package_type": "",
            "min_price": "",
            "max_price": " ",
            "departure_city": ""
        }))
        .unwrap();
        assert!(filter.to_filter().conditions().is_empty());

        let filter: PackageFilter = serde_json::from_value(serde_json::json!({
            "package_type": "tour",
            "max_price": "1500000"
        }))
        .unwrap();
        assert_eq!(filter.package_type, Some(PackageType::Tour));
        assert_eq!(filter.max_price, Some(1_500_000));
        assert_eq!(filter.min_price, None);

        let bad = serde_json::from_value::<PackageFilter>(serde_json::json!({"package_type": "cruise"}));
        assert!(bad.is_err());
    }

    #[tokio::test]
    async fn test_listing_is_capped() {
        let catalog = service();
        for i in 0..(LIST_LIMIT + 5) {
            catalog.create_package(tour(&format!("Tour {}", i), 1_000, "Bandung")).await.unwrap();
        }

        let all = catalog.list_packages(&PackageFilter::default()).await.unwrap();
        assert_eq!(all.len(), LIST_LIMIT);
    }

    #[tokio::test]
    async fn test_create_and_get_package() {
        let catalog = service();
        let created = catalog.create_package(tour("Tour Bromo", 2_000_000, "Malang")).await.unwrap();

        let fetched = catalog.get_package(created.id).await.unwrap();
        assert_eq!(fetched, created);

        let missing = catalog.get_package(Uuid::new_v4()).await;
        assert!(matches!(missing, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let catalog = service();
        let result = catalog.create_package(tour("Broken", -1, "Jakarta")).await;
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
    }
}
