use std::collections::HashMap;

use error_stack::Report;
use tracing::{debug, info};

use kernel::interface::assembler::assemble;
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::job::{DependOnOrderJobDispatcher, OrderJob};
use kernel::interface::mq::{DispatchOutcome, JobDispatcher, QueueInfo};
use kernel::interface::query::{
    BookQuery, CartQuery, DependOnBookQuery, DependOnCartQuery, DependOnWishlistQuery,
    WishlistQuery,
};
use kernel::prelude::entity::{
    BookId, CartId, CustomerId, Order, OrderItem, OrderSourceId, Price, SourceLine, Wishlist,
    WishlistId,
};
use kernel::KernelError;

use crate::service::cart::validate_customer;
use crate::service::OrderStoreService;
use crate::transfer::{CreateOrderDto, GiftDto, GiftReceiptDto, OrderDto, SourceKind};

/// Lines of a cart or wishlist read at one moment.
struct Snapshot {
    lines: Vec<SourceLine>,
    prices: HashMap<BookId, Price>,
}

#[async_trait::async_trait]
pub trait CheckoutService:
    'static
    + Sync
    + Send
    + OrderStoreService
    + DependOnBookQuery
    + DependOnCartQuery
    + DependOnWishlistQuery
    + DependOnOrderJobDispatcher
{
    /// Turns the customer's cart or a wishlist into an order.
    ///
    /// Follow-up work (audit, emptying the source) is queued after the commit
    /// and never fails the request.
    async fn create_order_from_source(
        &self,
        dto: CreateOrderDto,
    ) -> error_stack::Result<OrderDto, KernelError> {
        let customer_id = CustomerId::new(dto.customer_id);
        validate_customer(&customer_id)?;
        let source_id = OrderSourceId::new(dto.source_id);
        if !source_id.is_valid() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("invalid source_id: {}", dto.source_id)));
        }

        let snapshot = match dto.source {
            SourceKind::Cart => {
                let cart = self
                    .cart_query()
                    .find_by_id(&CartId::new(dto.source_id))
                    .await?
                    .ok_or_else(|| {
                        Report::new(KernelError::NotFound)
                            .attach_printable(format!("cart {} not found", dto.source_id))
                    })?;
                let lines = cart.items().iter().map(SourceLine::from).collect();
                price_snapshot(self, lines).await?
            }
            SourceKind::Wishlist => {
                let wishlist = read_wishlist(self, &WishlistId::new(dto.source_id)).await?;
                let lines = wishlist.items().iter().map(SourceLine::from).collect();
                price_snapshot(self, lines).await?
            }
        };

        let (order, items) = place(self, customer_id, source_id, snapshot).await?;
        let order_id = *order.id();
        enqueue(self, OrderJob::AuditOrderCreated { order_id });
        match dto.source {
            SourceKind::Cart => enqueue(self, OrderJob::ClearCart {
                order_id,
                cart_id: CartId::new(dto.source_id),
            }),
            SourceKind::Wishlist => enqueue(self, OrderJob::ClearWishlist {
                order_id,
                wishlist_id: WishlistId::new(dto.source_id),
            }),
        }
        Ok(OrderDto::new(order, items))
    }

    /// Buys every item of someone's wishlist for them.
    ///
    /// The order belongs to the buyer and points at the wishlist. The
    /// wishlist is removed afterwards in the background.
    async fn gift_from_wishlist(
        &self,
        dto: GiftDto,
    ) -> error_stack::Result<GiftReceiptDto, KernelError> {
        let buyer_id = CustomerId::new(dto.buyer_id);
        validate_customer(&buyer_id)?;
        let wishlist_id = WishlistId::new(dto.wishlist_id);
        if !OrderSourceId::from(wishlist_id).is_valid() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("invalid wishlist_id: {}", dto.wishlist_id)));
        }
        let wishlist = read_wishlist(self, &wishlist_id).await?;
        let recipient = *wishlist.customer_id();
        let lines = wishlist.items().iter().map(SourceLine::from).collect();
        let snapshot = price_snapshot(self, lines).await?;

        let (order, items) =
            place(self, buyer_id, OrderSourceId::from(wishlist_id), snapshot).await?;
        let order_id = *order.id();
        enqueue(self, OrderJob::AuditOrderCreated { order_id });
        enqueue(self, OrderJob::ClearWishlist {
            order_id,
            wishlist_id,
        });
        info!(
            "Order {} gifted by customer {} to customer {}",
            order_id.as_ref(),
            dto.buyer_id,
            recipient.as_ref()
        );
        Ok(GiftReceiptDto {
            order: OrderDto::new(order, items),
            gift_target_customer_id: recipient.into(),
        })
    }
}

impl<T> CheckoutService for T where
    T: OrderStoreService
        + DependOnBookQuery
        + DependOnCartQuery
        + DependOnWishlistQuery
        + DependOnOrderJobDispatcher
{
}

async fn read_wishlist<T>(module: &T, id: &WishlistId) -> error_stack::Result<Wishlist, KernelError>
where
    T: ?Sized + DependOnWishlistQuery,
{
    let mut connection = module.database_connection().transact().await?;
    module
        .wishlist_query()
        .find_by_id(&mut connection, id)
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("wishlist {} not found", id.as_ref()))
        })
}

// Books that no longer exist are left out and surface as a missing reference
// when the order is assembled.
async fn price_snapshot<T>(
    module: &T,
    lines: Vec<SourceLine>,
) -> error_stack::Result<Snapshot, KernelError>
where
    T: ?Sized + DependOnBookQuery,
{
    let mut connection = module.database_connection().transact().await?;
    let mut prices = HashMap::new();
    for line in lines.iter() {
        let book_id = line.book_id();
        if !book_id.is_valid() || prices.contains_key(book_id) {
            continue;
        }
        if let Some(book) = module
            .book_query()
            .find_by_id(&mut connection, book_id)
            .await?
        {
            prices.insert(*book_id, *book.price());
        }
    }
    Ok(Snapshot { lines, prices })
}

async fn place<T>(
    module: &T,
    customer_id: CustomerId,
    source_id: OrderSourceId,
    snapshot: Snapshot,
) -> error_stack::Result<(Order, Vec<OrderItem>), KernelError>
where
    T: ?Sized + OrderStoreService,
{
    let Snapshot { lines, prices } = snapshot;
    let (draft, lines) = assemble(customer_id, source_id, &lines, |id| prices.get(id).copied())
        .map_err(|report| {
            let kind = report.current_context().kind();
            report.change_context(kind)
        })?;
    module.commit_order(draft, lines).await
}

fn enqueue<T>(module: &T, job: OrderJob)
where
    T: ?Sized + DependOnOrderJobDispatcher,
{
    let kind = job.kind();
    let order_id = *job.order_id();
    // Drops are logged and counted by the dispatcher itself.
    let outcome = module.order_job_dispatcher().dispatch(QueueInfo::from(job));
    if outcome != DispatchOutcome::Queued {
        debug!("{kind} for order {} not queued: {outcome:?}", order_id.as_ref());
    }
}
