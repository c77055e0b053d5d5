mod id;
mod item;

pub use self::{id::*, item::*};
use crate::entity::CustomerId;
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Wishlist {
    id: WishlistId,
    customer_id: CustomerId,
    items: Vec<WishlistItem>,
}

impl Wishlist {
    pub fn new(id: WishlistId, customer_id: CustomerId, items: Vec<WishlistItem>) -> Self {
        Self {
            id,
            customer_id,
            items,
        }
    }
}
