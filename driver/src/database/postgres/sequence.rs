use sqlx::PgConnection;

use kernel::interface::sequence::{SequenceGenerator, SequenceName};
use kernel::KernelError;

use crate::database::postgres::{bounded, PostgresConnection};

pub struct PostgresSequenceGenerator;

#[async_trait::async_trait]
impl SequenceGenerator for PostgresSequenceGenerator {
    type Transaction = PostgresConnection;

    async fn next(
        &self,
        con: &mut PostgresConnection,
        name: SequenceName,
    ) -> error_stack::Result<i64, KernelError> {
        PgSequenceInternal::next(con, name).await
    }
}

pub(in crate::database) struct PgSequenceInternal;

impl PgSequenceInternal {
    async fn next(
        con: &mut PgConnection,
        name: SequenceName,
    ) -> error_stack::Result<i64, KernelError> {
        // One statement: the row lock taken by the upsert serialises callers.
        bounded(
            sqlx::query_scalar::<_, i64>(
                // language=postgresql
                r#"
                INSERT INTO sequences (name, seq)
                VALUES ($1, 1)
                ON CONFLICT (name) DO UPDATE SET seq = sequences.seq + 1
                RETURNING seq
                "#,
            )
            .bind(name.as_str())
            .fetch_one(con),
        )
        .await
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::sequence::{SequenceGenerator, SequenceName};
    use kernel::KernelError;

    use crate::database::postgres::sequence::PostgresSequenceGenerator;
    use crate::database::postgres::PostgresDatabase;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn concurrent_callers_get_distinct_ids() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;

        let mut tasks = Vec::new();
        for _ in 0..20 {
            let db = db.clone();
            tasks.push(tokio::spawn(async move {
                let mut con = db.transact().await?;
                PostgresSequenceGenerator
                    .next(&mut con, SequenceName::Orders)
                    .await
            }));
        }

        let mut ids = HashSet::new();
        for task in tasks {
            let id = task.await.expect("task panicked")?;
            assert!(ids.insert(id), "id {id} was handed out twice");
        }
        assert_eq!(ids.len(), 20);
        Ok(())
    }
}
