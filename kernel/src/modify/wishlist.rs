use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Wishlist, WishlistId, WishlistItem, WishlistItemId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait WishlistModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Persists the header. Items are added through [`WishlistModifier::add_item`].
    async fn create(
        &self,
        con: &mut Self::Transaction,
        wishlist: &Wishlist,
    ) -> error_stack::Result<(), KernelError>;
    /// Removes the wishlist and all of its items. Fails with
    /// [`KernelError::NotFound`] when no wishlist matched.
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        wishlist_id: &WishlistId,
    ) -> error_stack::Result<(), KernelError>;
    /// Inserts `item`, or atomically adds its quantity to the existing line for
    /// the same book. Returns the stored line.
    async fn add_item(
        &self,
        con: &mut Self::Transaction,
        item: &WishlistItem,
    ) -> error_stack::Result<WishlistItem, KernelError>;
    async fn delete_item(
        &self,
        con: &mut Self::Transaction,
        wishlist_id: &WishlistId,
        item_id: &WishlistItemId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnWishlistModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type WishlistModifier: WishlistModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn wishlist_modifier(&self) -> &Self::WishlistModifier;
}
