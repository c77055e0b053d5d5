use error_stack::Report;
use tracing::info;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::job::OrderJob;
use kernel::interface::mq::ErrorOperation;
use kernel::interface::update::{
    CartModifier, DependOnCartModifier, DependOnWishlistModifier, WishlistModifier,
};
use kernel::KernelError;

fn into_operation(report: Report<KernelError>) -> Report<ErrorOperation> {
    let operation = match report.current_context() {
        KernelError::NotFound => ErrorOperation::NotFound,
        _ => ErrorOperation::Failed,
    };
    report.change_context(operation)
}

#[async_trait::async_trait]
pub trait HandleOrderJobService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnCartModifier
    + DependOnWishlistModifier
{
    /// Runs one job taken off the order queue. Jobs are not retried.
    async fn handle_order_job(&self, job: OrderJob) -> error_stack::Result<(), ErrorOperation> {
        match job {
            OrderJob::AuditOrderCreated { order_id } => {
                info!(target: "audit", order_id = i64::from(order_id), "order created");
                Ok(())
            }
            OrderJob::ClearCart { order_id, cart_id } => {
                self.cart_modifier()
                    .clear(&cart_id)
                    .await
                    .map_err(into_operation)
                    .map_err(|report| {
                        report.attach_printable(format!(
                            "clearing cart {} after order {}",
                            cart_id.as_ref(),
                            order_id.as_ref()
                        ))
                    })
            }
            OrderJob::ClearWishlist {
                order_id,
                wishlist_id,
            } => {
                let mut connection = self
                    .database_connection()
                    .transact()
                    .await
                    .map_err(into_operation)?;
                self.wishlist_modifier()
                    .delete(&mut connection, &wishlist_id)
                    .await
                    .map_err(into_operation)
                    .map_err(|report| {
                        report.attach_printable(format!(
                            "deleting wishlist {} after order {}",
                            wishlist_id.as_ref(),
                            order_id.as_ref()
                        ))
                    })
            }
        }
    }
}

impl<T> HandleOrderJobService for T where
    T: DependOnDatabaseConnection + DependOnCartModifier + DependOnWishlistModifier
{
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;

    use kernel::interface::job::OrderJob;
    use kernel::interface::mq::ErrorOperation;
    use kernel::prelude::entity::{CartId, OrderId, WishlistId};
    use kernel::KernelError;

    use crate::service::{
        CreateCartService, CreateWishlistService, GetCartService, GetWishlistService,
        HandleOrderJobService, UpdateCartService,
    };
    use crate::test_support::TestModule;
    use crate::transfer::{
        AddCartItemDto, CreateCartDto, CreateWishlistDto, GetCartDto, GetWishlistDto,
    };

    #[tokio::test]
    async fn clear_cart_empties_but_keeps_the_cart() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let book = module.seed_book("Persuasion", dec!(4)).await?;
        let cart = module
            .get_or_create_cart(CreateCartDto { customer_id: 8 })
            .await?;
        module
            .add_cart_item(AddCartItemDto {
                cart_id: cart.id,
                book_id: book,
                qty: 1,
            })
            .await?;

        module
            .handle_order_job(OrderJob::ClearCart {
                order_id: OrderId::new(1),
                cart_id: CartId::new(cart.id),
            })
            .await
            .expect("cart cleared");
        let cart = module
            .get_cart(GetCartDto { id: cart.id })
            .await?
            .expect("cart kept");
        assert!(cart.items.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn clear_wishlist_deletes_it_once() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let wishlist = module
            .create_wishlist(CreateWishlistDto { customer_id: 3 })
            .await?;
        let job = OrderJob::ClearWishlist {
            order_id: OrderId::new(1),
            wishlist_id: WishlistId::new(wishlist.id),
        };

        module
            .handle_order_job(job.clone())
            .await
            .expect("wishlist deleted");
        assert!(module
            .get_wishlist(GetWishlistDto { id: wishlist.id })
            .await?
            .is_none());

        let again = module.handle_order_job(job).await.unwrap_err();
        assert_eq!(again.current_context(), &ErrorOperation::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn audit_and_unknown_cart() {
        let module = TestModule::new();
        module
            .handle_order_job(OrderJob::AuditOrderCreated {
                order_id: OrderId::new(5),
            })
            .await
            .expect("audit never fails");

        let missing = module
            .handle_order_job(OrderJob::ClearCart {
                order_id: OrderId::new(5),
                cart_id: CartId::new(77),
            })
            .await
            .unwrap_err();
        assert_eq!(missing.current_context(), &ErrorOperation::NotFound);
    }
}
