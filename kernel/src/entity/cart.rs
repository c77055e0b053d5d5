mod created_at;
mod id;
mod item;

pub use self::{created_at::*, id::*, item::*};
use crate::entity::CustomerId;
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Cart {
    id: CartId,
    customer_id: CustomerId,
    created_at: CartCreatedAt,
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new(
        id: CartId,
        customer_id: CustomerId,
        created_at: CartCreatedAt,
        items: Vec<CartItem>,
    ) -> Self {
        Self {
            id,
            customer_id,
            created_at,
            items,
        }
    }
}
