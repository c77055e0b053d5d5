mod book;
mod cart;
mod checkout;
mod job;
mod order;
mod wishlist;

pub use self::{book::*, cart::*, checkout::*, job::*, order::*, wishlist::*};
