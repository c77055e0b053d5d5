use std::collections::BTreeMap;
use std::sync::RwLock;

use error_stack::Report;
use tracing::debug;

use kernel::interface::query::CartQuery;
use kernel::interface::update::CartModifier;
use kernel::prelude::entity::{
    BookId, Cart, CartCreatedAt, CartId, CartItem, CartItemId, CustomerId, Quantity,
};
use kernel::KernelError;

use crate::error::ConvertError;

struct CartRecord {
    customer_id: CustomerId,
    created_at: CartCreatedAt,
    items: Vec<CartItem>,
}

#[derive(Default)]
struct CartState {
    last_cart_id: i64,
    last_item_id: i64,
    carts: BTreeMap<CartId, CartRecord>,
}

impl CartState {
    fn snapshot(&self, id: &CartId) -> Option<Cart> {
        self.carts.get(id).map(|record| {
            Cart::new(
                *id,
                record.customer_id,
                record.created_at,
                record.items.clone(),
            )
        })
    }

    fn record_mut(&mut self, id: &CartId) -> error_stack::Result<&mut CartRecord, KernelError> {
        self.carts.get_mut(id).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("cart {} not found", id.as_ref()))
        })
    }

    fn insert(&mut self, customer_id: &CustomerId) -> Cart {
        self.last_cart_id += 1;
        let id = CartId::new(self.last_cart_id);
        let created_at = CartCreatedAt::now();
        self.carts.insert(
            id,
            CartRecord {
                customer_id: *customer_id,
                created_at,
                items: Vec::new(),
            },
        );
        Cart::new(id, *customer_id, created_at, Vec::new())
    }
}

/// Carts kept in process memory behind a single reader/writer lock. Reads take
/// the read lock, every mutation the write lock.
#[derive(Default)]
pub struct InMemoryCartRepository {
    state: RwLock<CartState>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CartQuery for InMemoryCartRepository {
    async fn find_by_id(&self, id: &CartId) -> error_stack::Result<Option<Cart>, KernelError> {
        let state = self.state.read().convert_error()?;
        Ok(state.snapshot(id))
    }

    async fn find_by_customer_id(
        &self,
        customer_id: &CustomerId,
    ) -> error_stack::Result<Option<Cart>, KernelError> {
        let state = self.state.read().convert_error()?;
        let found = state
            .carts
            .iter()
            .find(|(_, record)| &record.customer_id == customer_id)
            .and_then(|(id, _)| state.snapshot(id));
        Ok(found)
    }

    async fn find_all(&self) -> error_stack::Result<Vec<Cart>, KernelError> {
        let state = self.state.read().convert_error()?;
        Ok(state
            .carts
            .keys()
            .filter_map(|id| state.snapshot(id))
            .collect())
    }
}

#[async_trait::async_trait]
impl CartModifier for InMemoryCartRepository {
    async fn create(&self, customer_id: &CustomerId) -> error_stack::Result<Cart, KernelError> {
        let mut state = self.state.write().convert_error()?;
        let cart = state.insert(customer_id);
        debug!("Created cart {} for customer {}", cart.id().as_ref(), customer_id.as_ref());
        Ok(cart)
    }

    async fn get_or_create(
        &self,
        customer_id: &CustomerId,
    ) -> error_stack::Result<Cart, KernelError> {
        let mut state = self.state.write().convert_error()?;
        let existing = state
            .carts
            .iter()
            .find(|(_, record)| &record.customer_id == customer_id)
            .map(|(id, _)| *id);
        match existing.and_then(|id| state.snapshot(&id)) {
            Some(cart) => Ok(cart),
            None => Ok(state.insert(customer_id)),
        }
    }

    async fn update(
        &self,
        id: &CartId,
        customer_id: &CustomerId,
    ) -> error_stack::Result<Cart, KernelError> {
        let mut state = self.state.write().convert_error()?;
        state.record_mut(id)?.customer_id = *customer_id;
        state.snapshot(id).ok_or_else(|| Report::new(KernelError::Internal))
    }

    async fn delete(&self, id: &CartId) -> error_stack::Result<(), KernelError> {
        let mut state = self.state.write().convert_error()?;
        state.carts.remove(id).map(|_| ()).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("cart {} not found", id.as_ref()))
        })
    }

    async fn add_item(
        &self,
        id: &CartId,
        book_id: &BookId,
        qty: &Quantity,
    ) -> error_stack::Result<CartItem, KernelError> {
        let mut state = self.state.write().convert_error()?;
        let next_item_id = state.last_item_id + 1;
        let record = state.record_mut(id)?;
        if let Some(item) = record
            .items
            .iter_mut()
            .find(|item| item.book_id() == book_id)
        {
            *item = CartItem::new(*item.id(), *id, *book_id, item.qty().merge(qty));
            return Ok(item.clone());
        }
        let item = CartItem::new(CartItemId::new(next_item_id), *id, *book_id, *qty);
        record.items.push(item.clone());
        state.last_item_id = next_item_id;
        Ok(item)
    }

    async fn update_item(
        &self,
        id: &CartId,
        item_id: &CartItemId,
        qty: &Quantity,
    ) -> error_stack::Result<CartItem, KernelError> {
        let mut state = self.state.write().convert_error()?;
        let record = state.record_mut(id)?;
        let item = record
            .items
            .iter_mut()
            .find(|item| item.id() == item_id)
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable(format!(
                    "item {} not found in cart {}",
                    item_id.as_ref(),
                    id.as_ref()
                ))
            })?;
        *item = CartItem::new(*item_id, *id, *item.book_id(), *qty);
        Ok(item.clone())
    }

    async fn delete_item(
        &self,
        id: &CartId,
        item_id: &CartItemId,
    ) -> error_stack::Result<(), KernelError> {
        let mut state = self.state.write().convert_error()?;
        let record = state.record_mut(id)?;
        let before = record.items.len();
        record.items.retain(|item| item.id() != item_id);
        if record.items.len() == before {
            return Err(Report::new(KernelError::NotFound).attach_printable(format!(
                "item {} not found in cart {}",
                item_id.as_ref(),
                id.as_ref()
            )));
        }
        Ok(())
    }

    async fn clear(&self, id: &CartId) -> error_stack::Result<(), KernelError> {
        let mut state = self.state.write().convert_error()?;
        state.record_mut(id)?.items.clear();
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use kernel::interface::query::CartQuery;
    use kernel::interface::update::CartModifier;
    use kernel::prelude::entity::{BookId, CartId, CustomerId, Quantity};
    use kernel::KernelError;

    use crate::database::memory::InMemoryCartRepository;

    #[tokio::test]
    async fn repeated_add_merges_into_one_line() -> error_stack::Result<(), KernelError> {
        let carts = InMemoryCartRepository::new();
        let cart = carts.get_or_create(&CustomerId::new(1)).await?;

        let first = carts
            .add_item(cart.id(), &BookId::new(7), &Quantity::new(1))
            .await?;
        let second = carts
            .add_item(cart.id(), &BookId::new(7), &Quantity::new(2))
            .await?;
        assert_eq!(first.id(), second.id());

        let cart = carts.find_by_id(cart.id()).await?.expect("cart exists");
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].qty(), &Quantity::new(3));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_are_not_lost() -> error_stack::Result<(), KernelError> {
        let carts = Arc::new(InMemoryCartRepository::new());
        let cart = carts.create(&CustomerId::new(2)).await?;
        let id = *cart.id();

        let mut tasks = Vec::new();
        for _ in 0..50 {
            let carts = Arc::clone(&carts);
            tasks.push(tokio::spawn(async move {
                carts
                    .add_item(&id, &BookId::new(1), &Quantity::new(1))
                    .await
            }));
        }
        for task in tasks {
            task.await.expect("task panicked")?;
        }

        let cart = carts.find_by_id(&id).await?.expect("cart exists");
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].qty(), &Quantity::new(50));
        Ok(())
    }

    #[tokio::test]
    async fn get_or_create_reuses_the_customer_cart() -> error_stack::Result<(), KernelError> {
        let carts = InMemoryCartRepository::new();
        let first = carts.get_or_create(&CustomerId::new(5)).await?;
        let again = carts.get_or_create(&CustomerId::new(5)).await?;
        let other = carts.get_or_create(&CustomerId::new(6)).await?;
        assert_eq!(first.id(), again.id());
        assert_ne!(first.id(), other.id());
        Ok(())
    }

    #[tokio::test]
    async fn clear_keeps_the_cart() -> error_stack::Result<(), KernelError> {
        let carts = InMemoryCartRepository::new();
        let cart = carts.create(&CustomerId::new(1)).await?;
        carts
            .add_item(cart.id(), &BookId::new(1), &Quantity::new(1))
            .await?;
        carts.clear(cart.id()).await?;

        let cart = carts.find_by_id(cart.id()).await?.expect("cart exists");
        assert!(cart.items().is_empty());

        let missing = carts.clear(&CartId::new(999)).await;
        assert_eq!(missing.unwrap_err().current_context(), &KernelError::NotFound);
        Ok(())
    }
}
