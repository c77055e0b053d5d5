use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::PgConnection;

use kernel::interface::query::{OrderItemQuery, OrderQuery};
use kernel::interface::update::{OrderItemModifier, OrderModifier};
use kernel::prelude::entity::{
    BookId, CustomerId, Order, OrderId, OrderItem, OrderItemId, OrderSourceId, OrderTotal, Price,
    Quantity,
};
use kernel::KernelError;

use crate::database::postgres::{bounded, PostgresConnection};

pub struct PostgresOrderRepository;

#[async_trait::async_trait]
impl OrderQuery for PostgresOrderRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        PgOrderInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        PgOrderInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl OrderModifier for PostgresOrderRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderInternal::create(con, order).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        order: &Order,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderInternal::update(con, order).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        order_id: &OrderId,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderInternal::delete(con, order_id).await
    }
}

pub struct PostgresOrderItemRepository;

#[async_trait::async_trait]
impl OrderItemQuery for PostgresOrderItemRepository {
    type Transaction = PostgresConnection;

    async fn find_by_order_id(
        &self,
        con: &mut PostgresConnection,
        order_id: &OrderId,
    ) -> error_stack::Result<Vec<OrderItem>, KernelError> {
        PgOrderItemInternal::find_by_order_id(con, order_id).await
    }
}

#[async_trait::async_trait]
impl OrderItemModifier for PostgresOrderItemRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        item: &OrderItem,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderItemInternal::create(con, item).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        item_id: &OrderItemId,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderItemInternal::delete(con, item_id).await
    }

    async fn delete_by_order_id(
        &self,
        con: &mut PostgresConnection,
        order_id: &OrderId,
    ) -> error_stack::Result<u64, KernelError> {
        PgOrderItemInternal::delete_by_order_id(con, order_id).await
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_id: i64,
    cart_id: i64,
    total: Decimal,
}

impl From<OrderRow> for Order {
    fn from(value: OrderRow) -> Self {
        Order::new(
            OrderId::new(value.id),
            CustomerId::new(value.customer_id),
            OrderSourceId::new(value.cart_id),
            OrderTotal::new(value.total),
        )
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    book_id: i64,
    qty: i32,
    price: Decimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(value: OrderItemRow) -> Self {
        OrderItem::new(
            OrderItemId::new(value.id),
            OrderId::new(value.order_id),
            BookId::new(value.book_id),
            Quantity::new(value.qty),
            Price::new(value.price),
        )
    }
}

pub(in crate::database) struct PgOrderInternal;

impl PgOrderInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        let row = bounded(
            sqlx::query_as::<_, OrderRow>(
                // language=postgresql
                r#"
                SELECT id, customer_id, cart_id, total
                FROM orders
                WHERE id = $1
                "#,
            )
            .bind(id.as_ref())
            .fetch_optional(con),
        )
        .await?;
        Ok(row.map(Order::from))
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Order>, KernelError> {
        let rows = bounded(
            sqlx::query_as::<_, OrderRow>(
                // language=postgresql
                r#"
                SELECT id, customer_id, cart_id, total
                FROM orders
                ORDER BY id
                "#,
            )
            .fetch_all(con),
        )
        .await?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn create(con: &mut PgConnection, order: &Order) -> error_stack::Result<(), KernelError> {
        bounded(
            // language=postgresql
            sqlx::query(
                r#"
                INSERT INTO orders (id, customer_id, cart_id, total)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order.id().as_ref())
            .bind(order.customer_id().as_ref())
            .bind(order.source_id().as_ref())
            .bind(order.total().as_ref())
            .execute(con),
        )
        .await?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, order: &Order) -> error_stack::Result<(), KernelError> {
        let result = bounded(
            // language=postgresql
            sqlx::query(
                r#"
                UPDATE orders
                SET customer_id = $2, cart_id = $3, total = $4
                WHERE id = $1
                "#,
            )
            .bind(order.id().as_ref())
            .bind(order.customer_id().as_ref())
            .bind(order.source_id().as_ref())
            .bind(order.total().as_ref())
            .execute(con),
        )
        .await?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("order {} not found", order.id().as_ref())));
        }
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        order_id: &OrderId,
    ) -> error_stack::Result<(), KernelError> {
        let result = bounded(
            // language=postgresql
            sqlx::query(
                r#"
                DELETE FROM orders
                WHERE id = $1
                "#,
            )
            .bind(order_id.as_ref())
            .execute(con),
        )
        .await?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("order {} not found", order_id.as_ref())));
        }
        Ok(())
    }
}

pub(in crate::database) struct PgOrderItemInternal;

impl PgOrderItemInternal {
    async fn find_by_order_id(
        con: &mut PgConnection,
        order_id: &OrderId,
    ) -> error_stack::Result<Vec<OrderItem>, KernelError> {
        let rows = bounded(
            sqlx::query_as::<_, OrderItemRow>(
                // language=postgresql
                r#"
                SELECT id, order_id, book_id, qty, price
                FROM order_items
                WHERE order_id = $1
                ORDER BY id
                "#,
            )
            .bind(order_id.as_ref())
            .fetch_all(con),
        )
        .await?;
        Ok(rows.into_iter().map(OrderItem::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        item: &OrderItem,
    ) -> error_stack::Result<(), KernelError> {
        bounded(
            // language=postgresql
            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, book_id, qty, price)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(item.id().as_ref())
            .bind(item.order_id().as_ref())
            .bind(item.book_id().as_ref())
            .bind(item.qty().as_ref())
            .bind(item.price().as_ref())
            .execute(con),
        )
        .await?;
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        item_id: &OrderItemId,
    ) -> error_stack::Result<(), KernelError> {
        bounded(
            // language=postgresql
            sqlx::query(
                r#"
                DELETE FROM order_items
                WHERE id = $1
                "#,
            )
            .bind(item_id.as_ref())
            .execute(con),
        )
        .await?;
        Ok(())
    }

    async fn delete_by_order_id(
        con: &mut PgConnection,
        order_id: &OrderId,
    ) -> error_stack::Result<u64, KernelError> {
        let result = bounded(
            // language=postgresql
            sqlx::query(
                r#"
                DELETE FROM order_items
                WHERE order_id = $1
                "#,
            )
            .bind(order_id.as_ref())
            .execute(con),
        )
        .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::{OrderItemQuery, OrderQuery};
    use kernel::interface::sequence::{SequenceGenerator, SequenceName};
    use kernel::interface::update::{OrderItemModifier, OrderModifier};
    use kernel::prelude::entity::{
        BookId, CustomerId, Order, OrderId, OrderItem, OrderItemId, OrderSourceId, OrderTotal,
        Price, Quantity,
    };
    use kernel::KernelError;

    use crate::database::postgres::order::{PostgresOrderItemRepository, PostgresOrderRepository};
    use crate::database::postgres::{PostgresDatabase, PostgresSequenceGenerator};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let id = OrderId::new(
            PostgresSequenceGenerator
                .next(&mut con, SequenceName::Orders)
                .await?,
        );
        let order = Order::new(
            id,
            CustomerId::new(1),
            OrderSourceId::new(2),
            OrderTotal::new(dec!(20)),
        );
        PostgresOrderRepository.create(&mut con, &order).await?;

        let item_id = OrderItemId::new(
            PostgresSequenceGenerator
                .next(&mut con, SequenceName::OrderItems)
                .await?,
        );
        let item = OrderItem::new(
            item_id,
            id,
            BookId::new(1),
            Quantity::new(2),
            Price::new(dec!(10)),
        );
        PostgresOrderItemRepository.create(&mut con, &item).await?;

        let found = PostgresOrderRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(order));
        let items = PostgresOrderItemRepository
            .find_by_order_id(&mut con, &id)
            .await?;
        assert_eq!(items, vec![item]);

        let updated = Order::new(
            id,
            CustomerId::new(5),
            OrderSourceId::new(2),
            OrderTotal::new(dec!(18)),
        );
        PostgresOrderRepository.update(&mut con, &updated).await?;
        let found = PostgresOrderRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(updated));

        PostgresOrderRepository.delete(&mut con, &id).await?;
        let removed = PostgresOrderItemRepository
            .delete_by_order_id(&mut con, &id)
            .await?;
        assert_eq!(removed, 1);
        assert!(PostgresOrderRepository
            .find_by_id(&mut con, &id)
            .await?
            .is_none());

        let missing = PostgresOrderRepository.delete(&mut con, &id).await;
        assert_eq!(
            missing.unwrap_err().current_context(),
            &KernelError::NotFound
        );
        Ok(())
    }
}
