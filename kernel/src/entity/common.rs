mod customer_id;
mod price;
mod quantity;

pub use self::{customer_id::*, price::*, quantity::*};
