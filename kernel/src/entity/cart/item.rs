use crate::entity::{BookId, CartId, CartItemId, Quantity};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct CartItem {
    id: CartItemId,
    cart_id: CartId,
    book_id: BookId,
    qty: Quantity,
}

impl CartItem {
    pub fn new(id: CartItemId, cart_id: CartId, book_id: BookId, qty: Quantity) -> Self {
        Self {
            id,
            cart_id,
            book_id,
            qty,
        }
    }
}
