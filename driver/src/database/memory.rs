use std::collections::{BTreeMap, HashMap};
use std::ops::Deref;
use std::sync::{Arc, Mutex, RwLock};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::sequence::SequenceName;
use kernel::prelude::entity::{
    Book, BookId, CustomerId, Order, OrderId, OrderItem, OrderItemId, WishlistId, WishlistItem,
    WishlistItemId,
};
use kernel::KernelError;

pub use self::{book::*, cart::*, order::*, sequence::*, wishlist::*};

mod book;
mod cart;
mod order;
mod sequence;
mod wishlist;

/// Process-local tables mirroring the postgres schema.
#[derive(Default)]
pub struct MemoryStore {
    sequences: Mutex<HashMap<SequenceName, i64>>,
    books: RwLock<BTreeMap<BookId, Book>>,
    orders: RwLock<BTreeMap<OrderId, Order>>,
    order_items: RwLock<BTreeMap<OrderItemId, OrderItem>>,
    wishlists: RwLock<BTreeMap<WishlistId, CustomerId>>,
    wishlist_items: RwLock<BTreeMap<WishlistItemId, WishlistItem>>,
}

#[derive(Clone, Default)]
pub struct InMemoryDatabase(Arc<MemoryStore>);

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        Ok(InMemoryTransaction(Arc::clone(&self.0)))
    }
}

pub struct InMemoryTransaction(Arc<MemoryStore>);

impl Transaction for InMemoryTransaction {}

impl Deref for InMemoryTransaction {
    type Target = MemoryStore;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
