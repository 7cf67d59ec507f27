pub mod app_config;
pub mod database;
pub mod document_repo;
pub mod memory_repo;
pub mod identity_client;

pub use database::DbClient;
pub use document_repo::PgDocumentStore;
pub use memory_repo::MemoryStore;
pub use identity_client::HttpIdentityVerifier;
