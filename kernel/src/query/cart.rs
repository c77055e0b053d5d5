use crate::entity::{Cart, CartId, CustomerId};
use crate::KernelError;

// Carts live in process memory and need no connection.
#[async_trait::async_trait]
pub trait CartQuery: 'static + Sync + Send {
    async fn find_by_id(&self, id: &CartId) -> error_stack::Result<Option<Cart>, KernelError>;
    async fn find_by_customer_id(
        &self,
        customer_id: &CustomerId,
    ) -> error_stack::Result<Option<Cart>, KernelError>;
    async fn find_all(&self) -> error_stack::Result<Vec<Cart>, KernelError>;
}

pub trait DependOnCartQuery: 'static + Sync + Send {
    type CartQuery: CartQuery;
    fn cart_query(&self) -> &Self::CartQuery;
}
