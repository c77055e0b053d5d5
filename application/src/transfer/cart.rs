use time::OffsetDateTime;

use kernel::prelude::entity::{Cart, CartItem, DestructCart, DestructCartItem};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CartItemDto {
    pub id: i64,
    pub cart_id: i64,
    pub book_id: i64,
    pub qty: i32,
}

impl From<CartItem> for CartItemDto {
    fn from(value: CartItem) -> Self {
        let DestructCartItem {
            id,
            cart_id,
            book_id,
            qty,
        } = value.into_destruct();
        Self {
            id: id.into(),
            cart_id: cart_id.into(),
            book_id: book_id.into(),
            qty: qty.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CartDto {
    pub id: i64,
    pub customer_id: i64,
    pub created_at: OffsetDateTime,
    pub items: Vec<CartItemDto>,
}

impl From<Cart> for CartDto {
    fn from(value: Cart) -> Self {
        let DestructCart {
            id,
            customer_id,
            created_at,
            items,
        } = value.into_destruct();
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            created_at: created_at.into(),
            items: items.into_iter().map(CartItemDto::from).collect(),
        }
    }
}

pub struct GetCartDto {
    pub id: i64,
}

pub struct CreateCartDto {
    pub customer_id: i64,
}

pub struct UpdateCartDto {
    pub id: i64,
    pub customer_id: i64,
}

pub struct DeleteCartDto {
    pub id: i64,
}

pub struct AddCartItemDto {
    pub cart_id: i64,
    pub book_id: i64,
    pub qty: i32,
}

pub struct UpdateCartItemDto {
    pub cart_id: i64,
    pub item_id: i64,
    pub qty: i32,
}

pub struct DeleteCartItemDto {
    pub cart_id: i64,
    pub item_id: i64,
}
