use rust_decimal::Decimal;

use kernel::prelude::entity::{DestructOrder, DestructOrderItem, Order, OrderItem};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OrderItemDto {
    pub id: i64,
    pub order_id: i64,
    pub book_id: i64,
    pub qty: i32,
    pub price: Decimal,
}

impl From<OrderItem> for OrderItemDto {
    fn from(value: OrderItem) -> Self {
        let DestructOrderItem {
            id,
            order_id,
            book_id,
            qty,
            price,
        } = value.into_destruct();
        Self {
            id: id.into(),
            order_id: order_id.into(),
            book_id: book_id.into(),
            qty: qty.into(),
            price: price.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OrderDto {
    pub id: i64,
    pub customer_id: i64,
    pub source_id: i64,
    pub total: Decimal,
    pub items: Vec<OrderItemDto>,
}

impl OrderDto {
    pub fn new(order: Order, items: Vec<OrderItem>) -> Self {
        let DestructOrder {
            id,
            customer_id,
            source_id,
            total,
        } = order.into_destruct();
        Self {
            id: id.into(),
            customer_id: customer_id.into(),
            source_id: source_id.into(),
            total: total.into(),
            items: items.into_iter().map(OrderItemDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SourceKind {
    Cart,
    Wishlist,
}

pub struct CreateOrderDto {
    pub customer_id: i64,
    pub source_id: i64,
    pub source: SourceKind,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GiftReceiptDto {
    pub order: OrderDto,
    pub gift_target_customer_id: i64,
}

pub struct GetOrderDto {
    pub id: i64,
}

pub struct UpdateOrderDto {
    pub id: i64,
    pub customer_id: i64,
    pub source_id: i64,
    pub total: Decimal,
}

pub struct DeleteOrderDto {
    pub id: i64,
}
