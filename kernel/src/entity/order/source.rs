use crate::entity::{CartId, WishlistId};
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Id of the cart or wishlist an order was assembled from.
#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct OrderSourceId(i64);

impl OrderSourceId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }

    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl From<CartId> for OrderSourceId {
    fn from(value: CartId) -> Self {
        Self(value.into())
    }
}

impl From<WishlistId> for OrderSourceId {
    fn from(value: WishlistId) -> Self {
        Self(value.into())
    }
}
