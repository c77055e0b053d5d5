use crate::controller::Exhaust;
use application::transfer::{OrderDto, OrderItemDto};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    id: i64,
    order_id: i64,
    book_id: i64,
    qty: i32,
    price: Decimal,
}

impl From<OrderItemDto> for OrderItemResponse {
    fn from(value: OrderItemDto) -> Self {
        Self {
            id: value.id,
            order_id: value.order_id,
            book_id: value.book_id,
            qty: value.qty,
            price: value.price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    id: i64,
    customer_id: i64,
    /// Cart or wishlist the order was assembled from.
    cart_id: i64,
    total: Decimal,
    items: Vec<OrderItemResponse>,
}

impl From<OrderDto> for OrderResponse {
    fn from(value: OrderDto) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            cart_id: value.source_id,
            total: value.total,
            items: value.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

impl IntoResponse for OrderResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<OrderDto> for Presenter {
    type To = OrderResponse;
    fn emit(&self, input: OrderDto) -> Self::To {
        OrderResponse::from(input)
    }
}

impl Exhaust<Vec<OrderDto>> for Presenter {
    type To = Json<Vec<OrderResponse>>;
    fn emit(&self, input: Vec<OrderDto>) -> Self::To {
        Json(input.into_iter().map(OrderResponse::from).collect())
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
