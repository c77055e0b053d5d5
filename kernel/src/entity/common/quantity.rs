use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct Quantity(i32);

impl Quantity {
    pub fn new(qty: impl Into<i32>) -> Self {
        Self(qty.into())
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Saturates instead of wrapping when merging repeated adds.
    pub fn merge(&self, other: &Quantity) -> Quantity {
        Quantity(self.0.saturating_add(other.0))
    }
}
