use crate::entity::{BookId, OrderId, OrderItemId, Price, Quantity};
use destructure::{Destructure, Mutation};
use vodca::References;

/// A persisted order line. `price` is the catalog price observed when the
/// order was committed and is never refreshed.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct OrderItem {
    id: OrderItemId,
    order_id: OrderId,
    book_id: BookId,
    qty: Quantity,
    price: Price,
}

impl OrderItem {
    pub fn new(
        id: OrderItemId,
        order_id: OrderId,
        book_id: BookId,
        qty: Quantity,
        price: Price,
    ) -> Self {
        Self {
            id,
            order_id,
            book_id,
            qty,
            price,
        }
    }
}
