use error_stack::Report;

use kernel::interface::query::{OrderItemQuery, OrderQuery};
use kernel::interface::update::{OrderItemModifier, OrderModifier};
use kernel::prelude::entity::{Order, OrderId, OrderItem, OrderItemId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;
use crate::error::ConvertError;

pub struct InMemoryOrderRepository;

#[async_trait::async_trait]
impl OrderQuery for InMemoryOrderRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        let orders = con.orders.read().convert_error()?;
        Ok(orders.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        let orders = con.orders.read().convert_error()?;
        Ok(orders.values().cloned().collect())
    }
}

#[async_trait::async_trait]
impl OrderModifier for InMemoryOrderRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        let mut orders = con.orders.write().convert_error()?;
        if orders.contains_key(order.id()) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("order {} already exists", order.id().as_ref())));
        }
        orders.insert(*order.id(), order.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        let mut orders = con.orders.write().convert_error()?;
        match orders.get_mut(order.id()) {
            Some(stored) => {
                *stored = order.clone();
                Ok(())
            }
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("order {} not found", order.id().as_ref()))),
        }
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        order_id: &OrderId,
    ) -> error_stack::Result<(), KernelError> {
        let mut orders = con.orders.write().convert_error()?;
        orders.remove(order_id).map(|_| ()).ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("order {} not found", order_id.as_ref()))
        })
    }
}

pub struct InMemoryOrderItemRepository;

#[async_trait::async_trait]
impl OrderItemQuery for InMemoryOrderItemRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_order_id(
        &self,
        con: &mut InMemoryTransaction,
        order_id: &OrderId,
    ) -> error_stack::Result<Vec<OrderItem>, KernelError> {
        let items = con.order_items.read().convert_error()?;
        Ok(items
            .values()
            .filter(|item| item.order_id() == order_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl OrderItemModifier for InMemoryOrderItemRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        item: &OrderItem,
    ) -> error_stack::Result<(), KernelError> {
        let mut items = con.order_items.write().convert_error()?;
        if items.contains_key(item.id()) {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("order item {} already exists", item.id().as_ref())));
        }
        items.insert(*item.id(), item.clone());
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        item_id: &OrderItemId,
    ) -> error_stack::Result<(), KernelError> {
        let mut items = con.order_items.write().convert_error()?;
        items.remove(item_id);
        Ok(())
    }

    async fn delete_by_order_id(
        &self,
        con: &mut InMemoryTransaction,
        order_id: &OrderId,
    ) -> error_stack::Result<u64, KernelError> {
        let mut items = con.order_items.write().convert_error()?;
        let before = items.len();
        items.retain(|_, item| item.order_id() != order_id);
        Ok((before - items.len()) as u64)
    }
}
