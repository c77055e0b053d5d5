use crate::controller::Intake;
use application::transfer::{
    AddCartItemDto, CreateCartDto, DeleteCartDto, DeleteCartItemDto, GetCartDto, UpdateCartDto,
    UpdateCartItemDto,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    customer_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
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
pub struct UpdateItemRequest {
    qty: i32,
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
    type To = CreateCartDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateCartDto {
            customer_id: input.customer_id,
        }
    }
}

impl Intake<(i64, UpdateRequest)> for Transformer {
    type To = UpdateCartDto;
    fn emit(&self, input: (i64, UpdateRequest)) -> Self::To {
        let (id, input) = input;
        UpdateCartDto {
            id,
            customer_id: input.customer_id,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetCartDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetCartDto { id: input.id }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteCartDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteCartDto { id: input.id }
    }
}

impl Intake<(i64, AddItemRequest)> for Transformer {
    type To = AddCartItemDto;
    fn emit(&self, input: (i64, AddItemRequest)) -> Self::To {
        let (cart_id, input) = input;
        AddCartItemDto {
            cart_id,
            book_id: input.book_id,
            qty: input.qty,
        }
    }
}

impl Intake<(i64, i64, UpdateItemRequest)> for Transformer {
    type To = UpdateCartItemDto;
    fn emit(&self, input: (i64, i64, UpdateItemRequest)) -> Self::To {
        let (cart_id, item_id, input) = input;
        UpdateCartItemDto {
            cart_id,
            item_id,
            qty: input.qty,
        }
    }
}

impl Intake<DeleteItemRequest> for Transformer {
    type To = DeleteCartItemDto;
    fn emit(&self, input: DeleteItemRequest) -> Self::To {
        DeleteCartItemDto {
            cart_id: input.id,
            item_id: input.item_id,
        }
    }
}
