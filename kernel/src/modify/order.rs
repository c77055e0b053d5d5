use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Order, OrderId, OrderItem, OrderItemId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait OrderModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError>;
    /// Rewrites header fields only. Fails with [`KernelError::NotFound`] when
    /// no order matched.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        order: &Order,
    ) -> error_stack::Result<(), KernelError>;
    /// Removes the header only. Fails with [`KernelError::NotFound`] when no
    /// order matched.
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        order_id: &OrderId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnOrderModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type OrderModifier: OrderModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn order_modifier(&self) -> &Self::OrderModifier;
}

#[async_trait::async_trait]
pub trait OrderItemModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        item: &OrderItem,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        item_id: &OrderItemId,
    ) -> error_stack::Result<(), KernelError>;
    /// Returns how many lines were removed.
    async fn delete_by_order_id(
        &self,
        con: &mut Self::Transaction,
        order_id: &OrderId,
    ) -> error_stack::Result<u64, KernelError>;
}

pub trait DependOnOrderItemModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type OrderItemModifier: OrderItemModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn order_item_modifier(&self) -> &Self::OrderItemModifier;
}
