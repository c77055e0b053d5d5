use crate::entity::{
    BookId, CartItem, CustomerId, OrderSourceId, OrderTotal, Price, Quantity, WishlistItem,
};
use destructure::Destructure;
use vodca::References;

/// Order header before an id is assigned.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct OrderDraft {
    customer_id: CustomerId,
    source_id: OrderSourceId,
    total: OrderTotal,
}

impl OrderDraft {
    pub fn new(customer_id: CustomerId, source_id: OrderSourceId, total: OrderTotal) -> Self {
        Self {
            customer_id,
            source_id,
            total,
        }
    }
}

/// Priced order line before an id is assigned.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct OrderLine {
    book_id: BookId,
    qty: Quantity,
    price: Price,
}

impl OrderLine {
    pub fn new(book_id: BookId, qty: Quantity, price: Price) -> Self {
        Self {
            book_id,
            qty,
            price,
        }
    }
}

/// Unpriced line read from a cart or wishlist snapshot.
#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct SourceLine {
    book_id: BookId,
    qty: Quantity,
}

impl SourceLine {
    pub fn new(book_id: BookId, qty: Quantity) -> Self {
        Self { book_id, qty }
    }
}

impl From<&CartItem> for SourceLine {
    fn from(value: &CartItem) -> Self {
        Self::new(*value.book_id(), *value.qty())
    }
}

impl From<&WishlistItem> for SourceLine {
    fn from(value: &WishlistItem) -> Self {
        Self::new(*value.book_id(), *value.qty())
    }
}
