use std::collections::BTreeMap;

use error_stack::Report;

use kernel::interface::query::WishlistQuery;
use kernel::interface::update::WishlistModifier;
use kernel::prelude::entity::{Wishlist, WishlistId, WishlistItem, WishlistItemId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;
use crate::error::ConvertError;

pub struct InMemoryWishlistRepository;

#[async_trait::async_trait]
impl WishlistQuery for InMemoryWishlistRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &WishlistId,
    ) -> error_stack::Result<Option<Wishlist>, KernelError> {
        let wishlists = con.wishlists.read().convert_error()?;
        let Some(customer_id) = wishlists.get(id) else {
            return Ok(None);
        };
        let items = con.wishlist_items.read().convert_error()?;
        let items = items
            .values()
            .filter(|item| item.wishlist_id() == id)
            .cloned()
            .collect();
        Ok(Some(Wishlist::new(*id, *customer_id, items)))
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Wishlist>, KernelError> {
        let wishlists = con.wishlists.read().convert_error()?;
        let items = con.wishlist_items.read().convert_error()?;
        let mut grouped: BTreeMap<WishlistId, Vec<WishlistItem>> = BTreeMap::new();
        for item in items.values() {
            grouped
                .entry(*item.wishlist_id())
                .or_default()
                .push(item.clone());
        }
        Ok(wishlists
            .iter()
            .map(|(id, customer_id)| {
                let items = grouped.remove(id).unwrap_or_default();
                Wishlist::new(*id, *customer_id, items)
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl WishlistModifier for InMemoryWishlistRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        wishlist: &Wishlist,
    ) -> error_stack::Result<(), KernelError> {
        let mut wishlists = con.wishlists.write().convert_error()?;
        if wishlists.contains_key(wishlist.id()) {
            return Err(Report::new(KernelError::Internal).attach_printable(format!(
                "wishlist {} already exists",
                wishlist.id().as_ref()
            )));
        }
        wishlists.insert(*wishlist.id(), *wishlist.customer_id());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        wishlist_id: &WishlistId,
    ) -> error_stack::Result<(), KernelError> {
        let mut wishlists = con.wishlists.write().convert_error()?;
        let mut items = con.wishlist_items.write().convert_error()?;
        if wishlists.remove(wishlist_id).is_none() {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("wishlist {} not found", wishlist_id.as_ref())));
        }
        items.retain(|_, item| item.wishlist_id() != wishlist_id);
        Ok(())
    }

    async fn add_item(
        &self,
        con: &mut InMemoryTransaction,
        item: &WishlistItem,
    ) -> error_stack::Result<WishlistItem, KernelError> {
        let mut items = con.wishlist_items.write().convert_error()?;
        let existing = items
            .values()
            .find(|stored| {
                stored.wishlist_id() == item.wishlist_id() && stored.book_id() == item.book_id()
            })
            .map(|stored| *stored.id());
        let stored = match existing {
            Some(id) => {
                let current = &items[&id];
                WishlistItem::new(
                    id,
                    *current.wishlist_id(),
                    *current.book_id(),
                    current.qty().merge(item.qty()),
                )
            }
            None => item.clone(),
        };
        items.insert(*stored.id(), stored.clone());
        Ok(stored)
    }

    async fn delete_item(
        &self,
        con: &mut InMemoryTransaction,
        wishlist_id: &WishlistId,
        item_id: &WishlistItemId,
    ) -> error_stack::Result<(), KernelError> {
        let mut items = con.wishlist_items.write().convert_error()?;
        match items.get(item_id) {
            Some(item) if item.wishlist_id() == wishlist_id => {
                items.remove(item_id);
                Ok(())
            }
            _ => Err(Report::new(KernelError::NotFound).attach_printable(format!(
                "item {} not found in wishlist {}",
                item_id.as_ref(),
                wishlist_id.as_ref()
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::WishlistQuery;
    use kernel::interface::update::WishlistModifier;
    use kernel::prelude::entity::{
        BookId, CustomerId, Quantity, Wishlist, WishlistId, WishlistItem, WishlistItemId,
    };
    use kernel::KernelError;

    use crate::database::memory::{InMemoryDatabase, InMemoryWishlistRepository};

    #[tokio::test]
    async fn repeated_add_merges_quantity() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let id = WishlistId::new(1);
        InMemoryWishlistRepository
            .create(&mut con, &Wishlist::new(id, CustomerId::new(3), Vec::new()))
            .await?;

        for (item_id, qty) in [(1, 1), (2, 2)] {
            let item = WishlistItem::new(
                WishlistItemId::new(item_id),
                id,
                BookId::new(10),
                Quantity::new(qty),
            );
            InMemoryWishlistRepository.add_item(&mut con, &item).await?;
        }

        let found = InMemoryWishlistRepository
            .find_by_id(&mut con, &id)
            .await?
            .expect("wishlist exists");
        assert_eq!(found.items().len(), 1);
        assert_eq!(found.items()[0].id(), &WishlistItemId::new(1));
        assert_eq!(found.items()[0].qty(), &Quantity::new(3));
        Ok(())
    }

    #[tokio::test]
    async fn delete_cascades_items() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let id = WishlistId::new(1);
        InMemoryWishlistRepository
            .create(&mut con, &Wishlist::new(id, CustomerId::new(3), Vec::new()))
            .await?;
        let item = WishlistItem::new(WishlistItemId::new(1), id, BookId::new(1), Quantity::new(1));
        InMemoryWishlistRepository.add_item(&mut con, &item).await?;

        InMemoryWishlistRepository.delete(&mut con, &id).await?;
        assert!(InMemoryWishlistRepository
            .find_all(&mut con)
            .await?
            .is_empty());
        assert!(con.wishlist_items.read().unwrap().is_empty());

        let again = InMemoryWishlistRepository.delete(&mut con, &id).await;
        assert_eq!(again.unwrap_err().current_context(), &KernelError::NotFound);
        Ok(())
    }
}
