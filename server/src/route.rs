mod book;
mod cart;
mod health;
mod order;
mod queue;
mod wishlist;

pub use self::{book::*, cart::*, health::*, order::*, queue::*, wishlist::*};
