use crate::entity::{BookId, Cart, CartId, CartItem, CartItemId, CustomerId, Quantity};
use crate::KernelError;

/// Mutations on the cart store. Every method that addresses a cart fails with
/// [`KernelError::NotFound`] when the cart (or item) does not exist.
#[async_trait::async_trait]
pub trait CartModifier: 'static + Sync + Send {
    async fn create(&self, customer_id: &CustomerId) -> error_stack::Result<Cart, KernelError>;
    /// Returns the customer's existing cart, creating one on first use.
    async fn get_or_create(
        &self,
        customer_id: &CustomerId,
    ) -> error_stack::Result<Cart, KernelError>;
    async fn update(
        &self,
        id: &CartId,
        customer_id: &CustomerId,
    ) -> error_stack::Result<Cart, KernelError>;
    async fn delete(&self, id: &CartId) -> error_stack::Result<(), KernelError>;
    /// Adds `qty` of a book, merging into the existing line for that book.
    async fn add_item(
        &self,
        id: &CartId,
        book_id: &BookId,
        qty: &Quantity,
    ) -> error_stack::Result<CartItem, KernelError>;
    async fn update_item(
        &self,
        id: &CartId,
        item_id: &CartItemId,
        qty: &Quantity,
    ) -> error_stack::Result<CartItem, KernelError>;
    async fn delete_item(
        &self,
        id: &CartId,
        item_id: &CartItemId,
    ) -> error_stack::Result<(), KernelError>;
    /// Empties the cart but keeps it.
    async fn clear(&self, id: &CartId) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnCartModifier: 'static + Sync + Send {
    type CartModifier: CartModifier;
    fn cart_modifier(&self) -> &Self::CartModifier;
}
