use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CartCreatedAt(OffsetDateTime);

impl CartCreatedAt {
    pub fn new(at: impl Into<OffsetDateTime>) -> Self {
        Self(at.into())
    }

    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }
}
