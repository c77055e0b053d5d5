use error_stack::Report;
use tracing::{info, warn};

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{
    DependOnOrderItemQuery, DependOnOrderQuery, OrderItemQuery, OrderQuery,
};
use kernel::interface::saga::{Saga, SagaStep};
use kernel::interface::sequence::{DependOnSequenceGenerator, SequenceGenerator, SequenceName};
use kernel::interface::update::{
    DependOnOrderItemModifier, DependOnOrderModifier, OrderItemModifier, OrderModifier,
};
use kernel::prelude::entity::{
    CustomerId, DestructOrderDraft, Order, OrderDraft, OrderId, OrderItem, OrderItemId, OrderLine,
    OrderSourceId, OrderTotal,
};
use kernel::KernelError;

use crate::transfer::{DeleteOrderDto, GetOrderDto, OrderDto, UpdateOrderDto};

type Connection<T: ?Sized> =
    <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction;

fn validate_header(
    customer_id: &CustomerId,
    source_id: &OrderSourceId,
    total: &OrderTotal,
) -> error_stack::Result<(), KernelError> {
    if !customer_id.is_valid() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("invalid customer_id: {}", customer_id.as_ref())));
    }
    if !source_id.is_valid() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("invalid source_id: {}", source_id.as_ref())));
    }
    if total.is_negative() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("total must not be negative: {}", total.as_ref())));
    }
    Ok(())
}

fn validate_line(line: &OrderLine) -> error_stack::Result<(), KernelError> {
    if !line.book_id().is_valid() || !line.qty().is_positive() || line.price().is_negative() {
        return Err(Report::new(KernelError::Validation).attach_printable(format!(
            "invalid line: book_id {}, qty {}, price {}",
            line.book_id().as_ref(),
            line.qty().as_ref(),
            line.price().as_ref()
        )));
    }
    Ok(())
}

#[derive(Default)]
struct CommitState {
    items: Vec<OrderItem>,
}

struct InsertOrderHeader<'a, T: ?Sized> {
    module: &'a T,
    order: Order,
}

#[async_trait::async_trait]
impl<'a, T> SagaStep<Connection<T>, CommitState> for InsertOrderHeader<'a, T>
where
    T: ?Sized + DependOnOrderModifier + DependOnOrderItemModifier,
{
    fn name(&self) -> &str {
        "insert_order_header"
    }

    async fn execute(
        &self,
        con: &mut Connection<T>,
        _: &mut CommitState,
    ) -> error_stack::Result<(), KernelError> {
        self.module.order_modifier().create(con, &self.order).await
    }

    async fn compensate(
        &self,
        con: &mut Connection<T>,
        _: &mut CommitState,
    ) -> error_stack::Result<(), KernelError> {
        let id = self.order.id();
        // Sweep lines that may have landed without being recorded. The header
        // delete is attempted even when the sweep fails.
        let swept = self
            .module
            .order_item_modifier()
            .delete_by_order_id(con, id)
            .await
            .map(|_| ());
        let removed = match self.module.order_modifier().delete(con, id).await {
            Err(report) if report.current_context() == &KernelError::NotFound => Ok(()),
            other => other,
        };
        match (swept, removed) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(report), Ok(())) | (Ok(()), Err(report)) => Err(report),
            (Err(mut swept), Err(removed)) => {
                swept.extend_one(removed);
                Err(swept)
            }
        }
    }
}

struct InsertOrderLine<'a, T: ?Sized> {
    module: &'a T,
    order_id: OrderId,
    index: usize,
    line: OrderLine,
}

#[async_trait::async_trait]
impl<'a, T> SagaStep<Connection<T>, CommitState> for InsertOrderLine<'a, T>
where
    T: ?Sized + DependOnSequenceGenerator + DependOnOrderItemModifier,
{
    fn name(&self) -> &str {
        "insert_order_line"
    }

    async fn execute(
        &self,
        con: &mut Connection<T>,
        state: &mut CommitState,
    ) -> error_stack::Result<(), KernelError> {
        validate_line(&self.line)
            .map_err(|report| report.attach_printable(format!("line {}", self.index)))?;
        let id = self
            .module
            .sequence_generator()
            .next(con, SequenceName::OrderItems)
            .await?;
        let item = OrderItem::new(
            OrderItemId::new(id),
            self.order_id,
            *self.line.book_id(),
            *self.line.qty(),
            *self.line.price(),
        );
        self.module.order_item_modifier().create(con, &item).await?;
        state.items.push(item);
        Ok(())
    }

    async fn compensate(
        &self,
        con: &mut Connection<T>,
        state: &mut CommitState,
    ) -> error_stack::Result<(), KernelError> {
        match state.items.get(self.index) {
            Some(item) => {
                self.module
                    .order_item_modifier()
                    .delete(con, item.id())
                    .await
            }
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
pub trait OrderStoreService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnSequenceGenerator
    + DependOnOrderQuery
    + DependOnOrderItemQuery
    + DependOnOrderModifier
    + DependOnOrderItemModifier
{
    /// Persists the header and every line as one logical unit.
    ///
    /// Validation happens before anything is written. If a write fails part
    /// way, the header and the lines already written are removed again and
    /// the original error is returned.
    async fn commit_order(
        &self,
        draft: OrderDraft,
        lines: Vec<OrderLine>,
    ) -> error_stack::Result<(Order, Vec<OrderItem>), KernelError> {
        let DestructOrderDraft {
            customer_id,
            source_id,
            total,
        } = draft.into_destruct();
        validate_header(&customer_id, &source_id, &total)?;
        if lines.is_empty() {
            return Err(
                Report::new(KernelError::Validation).attach_printable("order has no lines")
            );
        }
        for line in lines.iter() {
            validate_line(line)?;
        }

        let mut connection = self.database_connection().transact().await?;
        let id = self
            .sequence_generator()
            .next(&mut connection, SequenceName::Orders)
            .await?;
        let order = Order::new(OrderId::new(id), customer_id, source_id, total);

        let header = InsertOrderHeader {
            module: self,
            order: order.clone(),
        };
        let mut saga: Saga<Connection<Self>, CommitState> = Saga::new("commit_order").step(header);
        for (index, line) in lines.into_iter().enumerate() {
            saga = saga.step(InsertOrderLine {
                module: self,
                order_id: *order.id(),
                index,
                line,
            });
        }
        let mut state = CommitState::default();
        saga.run(&mut connection, &mut state).await?;

        info!(
            "Committed order {} with {} line(s), total {}",
            id,
            state.items.len(),
            order.total().as_ref()
        );
        Ok((order, state.items))
    }

    async fn get_order(&self, dto: GetOrderDto) -> error_stack::Result<OrderDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = OrderId::new(dto.id);
        let order = self
            .order_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable("order not found")
            })?;
        let items = self
            .order_item_query()
            .find_by_order_id(&mut connection, &id)
            .await?;
        Ok(OrderDto::new(order, items))
    }

    async fn get_all_orders(&self) -> error_stack::Result<Vec<OrderDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let orders = self.order_query().find_all(&mut connection).await?;
        let mut dtos = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self
                .order_item_query()
                .find_by_order_id(&mut connection, order.id())
                .await?;
            dtos.push(OrderDto::new(order, items));
        }
        Ok(dtos)
    }

    /// Rewrites the header. Lines are left untouched.
    async fn update_order(
        &self,
        dto: UpdateOrderDto,
    ) -> error_stack::Result<OrderDto, KernelError> {
        if dto.id <= 0 {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("invalid order id: {}", dto.id)));
        }
        let id = OrderId::new(dto.id);
        let customer_id = CustomerId::new(dto.customer_id);
        let source_id = OrderSourceId::new(dto.source_id);
        let total = OrderTotal::new(dto.total);
        validate_header(&customer_id, &source_id, &total)?;

        let mut connection = self.database_connection().transact().await?;
        let order = Order::new(id, customer_id, source_id, total);
        self.order_modifier().update(&mut connection, &order).await?;
        let items = self
            .order_item_query()
            .find_by_order_id(&mut connection, &id)
            .await?;
        Ok(OrderDto::new(order, items))
    }

    /// Removes the order and all of its lines.
    async fn delete_order(&self, dto: DeleteOrderDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = OrderId::new(dto.id);
        // Lines go first so a failure never leaves them without a header.
        self.order_item_modifier()
            .delete_by_order_id(&mut connection, &id)
            .await
            .map_err(|report| {
                warn!("Lines of order {} could not be deleted: {report:?}", dto.id);
                report
            })?;
        self.order_modifier().delete(&mut connection, &id).await
    }
}

impl<T> OrderStoreService for T where
    T: DependOnDatabaseConnection
        + DependOnSequenceGenerator
        + DependOnOrderQuery
        + DependOnOrderItemQuery
        + DependOnOrderModifier
        + DependOnOrderItemModifier
{
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;

    use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
    use kernel::interface::query::{DependOnOrderItemQuery, OrderItemQuery};
    use kernel::prelude::entity::{
        BookId, CustomerId, OrderDraft, OrderId, OrderLine, OrderSourceId, OrderTotal, Price,
        Quantity,
    };
    use kernel::KernelError;

    use crate::service::OrderStoreService;
    use crate::test_support::TestModule;
    use crate::transfer::{DeleteOrderDto, GetOrderDto, UpdateOrderDto};

    fn draft(total: rust_decimal::Decimal) -> OrderDraft {
        OrderDraft::new(
            CustomerId::new(3),
            OrderSourceId::new(11),
            OrderTotal::new(total),
        )
    }

    fn line(book_id: i64, qty: i32, price: rust_decimal::Decimal) -> OrderLine {
        OrderLine::new(BookId::new(book_id), Quantity::new(qty), Price::new(price))
    }

    #[tokio::test]
    async fn commit_persists_header_and_lines() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let (order, items) = module
            .commit_order(
                draft(dec!(25)),
                vec![line(1, 2, dec!(10)), line(2, 1, dec!(5))],
            )
            .await?;
        assert_eq!(order.id(), &OrderId::new(1));
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.order_id() == order.id()));

        let stored = module.get_order(GetOrderDto { id: 1 }).await?;
        assert_eq!(stored.total, dec!(25));
        assert_eq!(stored.items.len(), 2);

        module.delete_order(DeleteOrderDto { id: 1 }).await?;
        let missing = module.get_order(GetOrderDto { id: 1 }).await.unwrap_err();
        assert_eq!(missing.current_context(), &KernelError::NotFound);
        let again = module.delete_order(DeleteOrderDto { id: 1 }).await.unwrap_err();
        assert_eq!(again.current_context(), &KernelError::NotFound);

        let mut connection = module.database_connection().transact().await?;
        let orphans = module
            .order_item_query()
            .find_by_order_id(&mut connection, &OrderId::new(1))
            .await?;
        assert!(orphans.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn failed_line_rolls_back_everything() -> error_stack::Result<(), KernelError> {
        let module = TestModule::failing_line_at(1);
        let report = module
            .commit_order(
                draft(dec!(6)),
                vec![line(1, 1, dec!(1)), line(2, 1, dec!(2)), line(3, 1, dec!(3))],
            )
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);

        assert!(module.get_all_orders().await?.is_empty());
        let mut connection = module.database_connection().transact().await?;
        let leftovers = module
            .order_item_query()
            .find_by_order_id(&mut connection, &OrderId::new(1))
            .await?;
        assert!(leftovers.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn failed_sweep_still_removes_header() -> error_stack::Result<(), KernelError> {
        let module = TestModule::failing_line_and_sweep_at(1);
        let report = module
            .commit_order(
                draft(dec!(3)),
                vec![line(1, 1, dec!(1)), line(2, 1, dec!(2))],
            )
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
        assert!(module.get_all_orders().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_keeps_header_when_lines_cannot_be_removed(
    ) -> error_stack::Result<(), KernelError> {
        let module = TestModule::failing_sweep();
        module
            .commit_order(draft(dec!(2)), vec![line(1, 1, dec!(2))])
            .await?;

        let report = module
            .delete_order(DeleteOrderDto { id: 1 })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Timeout);
        let stored = module.get_order(GetOrderDto { id: 1 }).await?;
        assert_eq!(stored.items.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_writing() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();

        let empty = module
            .commit_order(draft(dec!(0)), Vec::new())
            .await
            .unwrap_err();
        assert_eq!(empty.current_context(), &KernelError::Validation);

        let negative = module
            .commit_order(draft(dec!(-1)), vec![line(1, 1, dec!(1))])
            .await
            .unwrap_err();
        assert_eq!(negative.current_context(), &KernelError::Validation);

        let bad_line = module
            .commit_order(draft(dec!(1)), vec![line(1, 0, dec!(1))])
            .await
            .unwrap_err();
        assert_eq!(bad_line.current_context(), &KernelError::Validation);

        assert!(module.get_all_orders().await?.is_empty());

        // No order id was consumed by the rejected attempts.
        let (order, _) = module
            .commit_order(draft(dec!(1)), vec![line(1, 1, dec!(1))])
            .await?;
        assert_eq!(order.id(), &OrderId::new(1));
        Ok(())
    }

    #[tokio::test]
    async fn update_rewrites_header_only() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        module
            .commit_order(draft(dec!(4)), vec![line(1, 2, dec!(2))])
            .await?;

        let updated = module
            .update_order(UpdateOrderDto {
                id: 1,
                customer_id: 9,
                source_id: 12,
                total: dec!(3.50),
            })
            .await?;
        assert_eq!(updated.customer_id, 9);
        assert_eq!(updated.total, dec!(3.50));
        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.items[0].price, dec!(2));

        let missing = module
            .update_order(UpdateOrderDto {
                id: 99,
                customer_id: 9,
                source_id: 12,
                total: dec!(1),
            })
            .await
            .unwrap_err();
        assert_eq!(missing.current_context(), &KernelError::NotFound);
        Ok(())
    }
}
