pub use crate::error::*;

mod assembler;
mod database;
mod entity;
mod error;
mod job;
mod modify;
mod mq;
mod query;
mod saga;
mod sequence;

#[cfg(feature = "prelude")]
pub mod prelude {
    pub mod entity {
        pub use crate::entity::*;
    }
}

#[cfg(feature = "interface")]
pub mod interface {
    pub mod assembler {
        pub use crate::assembler::*;
    }
    pub mod database {
        pub use crate::database::*;
    }
    pub mod query {
        pub use crate::query::*;
    }
    pub mod update {
        pub use crate::modify::*;
    }
    pub mod job {
        pub use crate::job::*;
    }
    pub mod mq {
        pub use crate::mq::*;
    }
    pub mod saga {
        pub use crate::saga::*;
    }
    pub mod sequence {
        pub use crate::sequence::*;
    }
}
