use crate::controller::Intake;
use application::transfer::{
    CreateOrderDto, DeleteOrderDto, GetOrderDto, SourceKind, UpdateOrderDto,
};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cart,
    Wishlist,
}

fn cart() -> Source {
    Source::Cart
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    customer_id: i64,
    source_id: i64,
    #[serde(default = "cart")]
    source: Source,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    customer_id: i64,
    source_id: i64,
    total: Decimal,
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

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateOrderDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateOrderDto {
            customer_id: input.customer_id,
            source_id: input.source_id,
            source: match input.source {
                Source::Cart => SourceKind::Cart,
                Source::Wishlist => SourceKind::Wishlist,
            },
        }
    }
}

impl Intake<(i64, UpdateRequest)> for Transformer {
    type To = UpdateOrderDto;
    fn emit(&self, input: (i64, UpdateRequest)) -> Self::To {
        let (id, input) = input;
        UpdateOrderDto {
            id,
            customer_id: input.customer_id,
            source_id: input.source_id,
            total: input.total,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetOrderDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetOrderDto { id: input.id }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteOrderDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteOrderDto { id: input.id }
    }
}
