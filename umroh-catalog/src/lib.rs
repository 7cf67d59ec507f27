pub mod package;
pub mod catalog;
pub mod seed;

pub use package::{NewPackage, Package, PackageType};
pub use catalog::{CatalogService, PackageFilter, SeedOutcome};
