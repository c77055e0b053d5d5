mod book;
mod cart;
mod common;
mod order;
mod wishlist;

pub use self::{book::*, cart::*, common::*, order::*, wishlist::*};
