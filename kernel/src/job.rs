use crate::entity::{CartId, OrderId, WishlistId};
use crate::mq::JobDispatcher;

/// Post-commit work produced by order creation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum OrderJob {
    AuditOrderCreated {
        order_id: OrderId,
    },
    ClearCart {
        order_id: OrderId,
        cart_id: CartId,
    },
    ClearWishlist {
        order_id: OrderId,
        wishlist_id: WishlistId,
    },
}

impl OrderJob {
    pub fn kind(&self) -> &'static str {
        match self {
            OrderJob::AuditOrderCreated { .. } => "AUDIT_ORDER_CREATED",
            OrderJob::ClearCart { .. } => "CLEAR_CART",
            OrderJob::ClearWishlist { .. } => "CLEAR_WISHLIST",
        }
    }

    pub fn order_id(&self) -> &OrderId {
        match self {
            OrderJob::AuditOrderCreated { order_id }
            | OrderJob::ClearCart { order_id, .. }
            | OrderJob::ClearWishlist { order_id, .. } => order_id,
        }
    }
}

pub trait DependOnOrderJobDispatcher: 'static + Sync + Send {
    type OrderJobDispatcher: JobDispatcher<OrderJob>;
    fn order_job_dispatcher(&self) -> &Self::OrderJobDispatcher;
}
