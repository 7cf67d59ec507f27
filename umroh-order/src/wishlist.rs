use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use umroh_core::repository::{find_many_as, insert_as};
use umroh_core::{Collection, CoreError, CoreResult, DocumentStore, Filter, StoreError, User, LIST_LIMIT};
use uuid::Uuid;

use crate::models::WishlistEntry;

#[derive(Clone)]
pub struct WishlistService {
    store: Arc<dyn DocumentStore>,
}

impl WishlistService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn entry_filter(user: &User, package_id: Uuid) -> Filter {
        Filter::new()
            .eq("user_id", user.id.as_str())
            .eq("package_id", package_id.to_string())
    }

    pub async fn add(&self, user: &User, package_id: Uuid) -> CoreResult<WishlistEntry> {
        let filter = Self::entry_filter(user, package_id);
        if self.store.find_one(Collection::Wishlist, &filter).await?.is_some() {
            return Err(CoreError::AlreadyExists("Already in wishlist".to_string()));
        }

        let entry = WishlistEntry {
            id: Uuid::new_v4(),
            user_id: user.id.clone(),
            package_id,
            created_at: Utc::now(),
        };

        // A concurrent add can slip past the lookup; the unique index catches it.
        match insert_as(&*self.store, Collection::Wishlist, &entry).await {
            Ok(()) => {}
            Err(StoreError::Duplicate { .. }) => {
                return Err(CoreError::AlreadyExists("Already in wishlist".to_string()))
            }
            Err(e) => return Err(e.into()),
        }

        info!("Package {} added to wishlist of {}", package_id, user.id);
        Ok(entry)
    }

    pub async fn remove(&self, user: &User, package_id: Uuid) -> CoreResult<()> {
        let deleted = self
            .store
            .delete_one(Collection::Wishlist, &Self::entry_filter(user, package_id))
            .await?;
        if deleted == 0 {
            return Err(CoreError::NotFound("Not found in wishlist".to_string()));
        }
        Ok(())
    }

    pub async fn list(&self, user: &User) -> CoreResult<Vec<Uuid>> {
        let filter = Filter::new().eq("user_id", user.id.as_str());
        let entries: Vec<WishlistEntry> =
            find_many_as(&*self.store, Collection::Wishlist, &filter, LIST_LIMIT).await?;
        Ok(entries.into_iter().map(|e| e.package_id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umroh_store::MemoryStore;

    fn user(email: &str) -> User {
        User {
            id: email.to_string(),
            email: email.to_string(),
            name: "Jamaah".to_string(),
            picture: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_add_fails_until_removed() {
        let wishlist = WishlistService::new(Arc::new(MemoryStore::new()));
        let alice = user("alice@example.com");
        let package_id = Uuid::new_v4();

        wishlist.add(&alice, package_id).await.unwrap();
        let duplicate = wishlist.add(&alice, package_id).await;
        assert!(matches!(duplicate, Err(CoreError::AlreadyExists(_))));

        wishlist.remove(&alice, package_id).await.unwrap();
        wishlist.add(&alice, package_id).await.unwrap();
        assert_eq!(wishlist.list(&alice).await.unwrap(), vec![package_id]);
    }

    #[tokio::test]
    async fn test_remove_missing_entry_is_not_found() {
        let wishlist = WishlistService::new(Arc::new(MemoryStore::new()));
        let result = wishlist.remove(&user("alice@example.com"), Uuid::new_v4()).await;
        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_wishlists_are_per_user() {
        let wishlist = WishlistService::new(Arc::new(MemoryStore::new()));
        let alice = user("alice@example.com");
        let bob = user("bob@example.com");
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        wishlist.add(&alice, first).await.unwrap();
        wishlist.add(&alice, second).await.unwrap();
        wishlist.add(&bob, first).await.unwrap();

        assert_eq!(wishlist.list(&alice).await.unwrap(), vec![first, second]);
        assert_eq!(wishlist.list(&bob).await.unwrap(), vec![first]);

        assert!(wishlist.remove(&bob, second).await.is_err());
        assert_eq!(wishlist.list(&alice).await.unwrap().len(), 2);
    }
}
