use std::future::Future;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use error_stack::ResultExt;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::KernelError;

use crate::env;
use crate::error::{ConvertError, DriverError};

pub use self::{book::*, order::*, sequence::*, wishlist::*};

mod book;
mod order;
mod sequence;
mod wishlist;

static POSTGRES_URL: &str = "POSTGRES_URL";

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const STATEMENT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL).convert_error()?;
        let pool = PgPoolOptions::new()
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(&url)
            .await
            .convert_error()
            .attach_printable("Failed to connect postgres")?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> error_stack::Result<(), KernelError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(DriverError::from)
            .convert_error()
            .attach_printable("Failed to apply migrations")
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresConnection;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let con = self.pool.acquire().await.convert_error()?;
        Ok(PostgresConnection(con))
    }
}

pub struct PostgresConnection(PoolConnection<Postgres>);

impl Transaction for PostgresConnection {}

impl Deref for PostgresConnection {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Runs one statement, giving up after [`STATEMENT_TIMEOUT`].
pub(in crate::database) async fn bounded<T, F>(statement: F) -> error_stack::Result<T, KernelError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    tokio::time::timeout(STATEMENT_TIMEOUT, statement)
        .await
        .convert_error()
        .attach_printable_lazy(|| format!("Statement exceeded {STATEMENT_TIMEOUT:?}"))?
        .convert_error()
}
