mod draft;
mod id;
mod item;
mod source;
mod total;

pub use self::{draft::*, id::*, item::*, source::*, total::*};
use crate::entity::CustomerId;
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    source_id: OrderSourceId,
    total: OrderTotal,
}

impl Order {
    pub fn new(
        id: OrderId,
        customer_id: CustomerId,
        source_id: OrderSourceId,
        total: OrderTotal,
    ) -> Self {
        Self {
            id,
            customer_id,
            source_id,
            total,
        }
    }
}
