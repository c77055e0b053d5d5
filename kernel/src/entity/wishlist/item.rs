use crate::entity::{BookId, Quantity, WishlistId, WishlistItemId};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct WishlistItem {
    id: WishlistItemId,
    wishlist_id: WishlistId,
    book_id: BookId,
    qty: Quantity,
}

impl WishlistItem {
    pub fn new(
        id: WishlistItemId,
        wishlist_id: WishlistId,
        book_id: BookId,
        qty: Quantity,
    ) -> Self {
        Self {
            id,
            wishlist_id,
            book_id,
            qty,
        }
    }
}
