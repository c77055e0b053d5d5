use crate::controller::Exhaust;
use crate::route::order::response::OrderResponse;
use application::transfer::{GiftReceiptDto, WishlistDto, WishlistItemDto};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct WishlistItemResponse {
    id: i64,
    wishlist_id: i64,
    book_id: i64,
    qty: i32,
}

impl From<WishlistItemDto> for WishlistItemResponse {
    fn from(value: WishlistItemDto) -> Self {
        Self {
            id: value.id,
            wishlist_id: value.wishlist_id,
            book_id: value.book_id,
            qty: value.qty,
        }
    }
}

impl IntoResponse for WishlistItemResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    id: i64,
    customer_id: i64,
    items: Vec<WishlistItemResponse>,
}

impl From<WishlistDto> for WishlistResponse {
    fn from(value: WishlistDto) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            items: value
                .items
                .into_iter()
                .map(WishlistItemResponse::from)
                .collect(),
        }
    }
}

impl IntoResponse for WishlistResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct GiftResponse {
    order: OrderResponse,
    gift_target_customer_id: i64,
}

impl IntoResponse for GiftResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<WishlistDto> for Presenter {
    type To = WishlistResponse;
    fn emit(&self, input: WishlistDto) -> Self::To {
        WishlistResponse::from(input)
    }
}

impl Exhaust<Option<WishlistDto>> for Presenter {
    type To = Option<WishlistResponse>;
    fn emit(&self, input: Option<WishlistDto>) -> Self::To {
        input.map(WishlistResponse::from)
    }
}

impl Exhaust<Vec<WishlistDto>> for Presenter {
    type To = Json<Vec<WishlistResponse>>;
    fn emit(&self, input: Vec<WishlistDto>) -> Self::To {
        Json(input.into_iter().map(WishlistResponse::from).collect())
    }
}

impl Exhaust<WishlistItemDto> for Presenter {
    type To = WishlistItemResponse;
    fn emit(&self, input: WishlistItemDto) -> Self::To {
        WishlistItemResponse::from(input)
    }
}

impl Exhaust<GiftReceiptDto> for Presenter {
    type To = GiftResponse;
    fn emit(&self, input: GiftReceiptDto) -> Self::To {
        GiftResponse {
            order: OrderResponse::from(input.order),
            gift_target_customer_id: input.gift_target_customer_id,
        }
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
