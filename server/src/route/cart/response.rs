use crate::controller::Exhaust;
use application::transfer::{CartDto, CartItemDto};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CartItemResponse {
    id: i64,
    cart_id: i64,
    book_id: i64,
    qty: i32,
}

impl From<CartItemDto> for CartItemResponse {
    fn from(value: CartItemDto) -> Self {
        Self {
            id: value.id,
            cart_id: value.cart_id,
            book_id: value.book_id,
            qty: value.qty,
        }
    }
}

impl IntoResponse for CartItemResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    id: i64,
    customer_id: i64,
    /// Unix timestamp in seconds.
    created_at: i64,
    items: Vec<CartItemResponse>,
}

impl From<CartDto> for CartResponse {
    fn from(value: CartDto) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            created_at: value.created_at.unix_timestamp(),
            items: value.items.into_iter().map(CartItemResponse::from).collect(),
        }
    }
}

impl IntoResponse for CartResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<CartDto> for Presenter {
    type To = CartResponse;
    fn emit(&self, input: CartDto) -> Self::To {
        CartResponse::from(input)
    }
}

impl Exhaust<Option<CartDto>> for Presenter {
    type To = Option<CartResponse>;
    fn emit(&self, input: Option<CartDto>) -> Self::To {
        input.map(CartResponse::from)
    }
}

impl Exhaust<Vec<CartDto>> for Presenter {
    type To = Json<Vec<CartResponse>>;
    fn emit(&self, input: Vec<CartDto>) -> Self::To {
        Json(input.into_iter().map(CartResponse::from).collect())
    }
}

impl Exhaust<CartItemDto> for Presenter {
    type To = CartItemResponse;
    fn emit(&self, input: CartItemDto) -> Self::To {
        CartItemResponse::from(input)
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
