use crate::controller::Intake;
use application::transfer::{
    AddWishlistItemDto, CreateWishlistDto, DeleteWishlistDto, DeleteWishlistItemDto, GetWishlistDto,
    GiftDto,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    customer_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    book_id: i64,
    #[serde(default = "one")]
    qty: i32,
}

fn one() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct GiftRequest {
    buyer_id: i64,
}

#[derive(Debug)]
pub struct GetRequest {
    id: i64,
}

impl GetRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: i64,
}

impl DeleteRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteItemRequest {
    id: i64,
    item_id: i64,
}

impl DeleteItemRequest {
    pub fn new(id: i64, item_id: i64) -> Self {
        Self { id, item_id }
    }
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateWishlistDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateWishlistDto {
            customer_id: input.customer_id,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetWishlistDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetWishlistDto { id: input.id }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteWishlistDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteWishlistDto { id: input.id }
    }
}

impl Intake<(i64, AddItemRequest)> for Transformer {
    type To = AddWishlistItemDto;
    fn emit(&self, input: (i64, AddItemRequest)) -> Self::To {
        let (wishlist_id, input) = input;
        AddWishlistItemDto {
            wishlist_id,
            book_id: input.book_id,
            qty: input.qty,
        }
    }
}

impl Intake<DeleteItemRequest> for Transformer {
    type To = DeleteWishlistItemDto;
    fn emit(&self, input: DeleteItemRequest) -> Self::To {
        DeleteWishlistItemDto {
            wishlist_id: input.id,
            item_id: input.item_id,
        }
    }
}

impl Intake<(i64, GiftRequest)> for Transformer {
    type To = GiftDto;
    fn emit(&self, input: (i64, GiftRequest)) -> Self::To {
        let (wishlist_id, input) = input;
        GiftDto {
            wishlist_id,
            buyer_id: input.buyer_id,
        }
    }
}
