use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::KernelError;
use std::fmt::{Display, Formatter};

/// Named counters backing id assignment for entities kept in the database.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum SequenceName {
    Books,
    Orders,
    OrderItems,
    Wishlists,
    WishlistItems,
}

impl SequenceName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceName::Books => "books",
            SequenceName::Orders => "orders",
            SequenceName::OrderItems => "order_items",
            SequenceName::Wishlists => "wishlists",
            SequenceName::WishlistItems => "wishlist_items",
        }
    }
}

impl Display for SequenceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hands out collision-free ids.
///
/// `next` must be a single atomic increment-and-read on the store, creating
/// the counter on first use. Concurrent callers always observe distinct,
/// strictly increasing values for the same name. When the call fails no value
/// is considered reserved.
#[async_trait::async_trait]
pub trait SequenceGenerator: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn next(
        &self,
        con: &mut Self::Transaction,
        name: SequenceName,
    ) -> error_stack::Result<i64, KernelError>;
}

pub trait DependOnSequenceGenerator: 'static + Sync + Send + DependOnDatabaseConnection {
    type SequenceGenerator: SequenceGenerator<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn sequence_generator(&self) -> &Self::SequenceGenerator;
}
