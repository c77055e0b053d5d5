use kernel::interface::sequence::{SequenceGenerator, SequenceName};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;
use crate::error::ConvertError;

pub struct InMemorySequenceGenerator;

#[async_trait::async_trait]
impl SequenceGenerator for InMemorySequenceGenerator {
    type Transaction = InMemoryTransaction;

    async fn next(
        &self,
        con: &mut InMemoryTransaction,
        name: SequenceName,
    ) -> error_stack::Result<i64, KernelError> {
        let mut sequences = con.sequences.lock().convert_error()?;
        let seq = sequences.entry(name).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::sequence::{SequenceGenerator, SequenceName};
    use kernel::KernelError;

    use crate::database::memory::{InMemoryDatabase, InMemorySequenceGenerator};

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_get_distinct_increasing_ids() -> error_stack::Result<(), KernelError>
    {
        let db = InMemoryDatabase::new();
        let mut tasks = Vec::new();
        for _ in 0..64 {
            let db = db.clone();
            tasks.push(tokio::spawn(async move {
                let mut con = db.transact().await?;
                let mut seen = Vec::new();
                for _ in 0..10 {
                    seen.push(
                        InMemorySequenceGenerator
                            .next(&mut con, SequenceName::Orders)
                            .await?,
                    );
                }
                Ok::<_, error_stack::Report<KernelError>>(seen)
            }));
        }

        let mut ids = HashSet::new();
        for task in tasks {
            let seen = task.await.expect("task panicked")?;
            assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
            for id in seen {
                assert!(ids.insert(id), "id {id} was handed out twice");
            }
        }
        assert_eq!(ids.len(), 640);
        assert_eq!(ids.iter().max(), Some(&640));
        Ok(())
    }

    #[tokio::test]
    async fn names_count_independently() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        let a = InMemorySequenceGenerator
            .next(&mut con, SequenceName::Orders)
            .await?;
        let b = InMemorySequenceGenerator
            .next(&mut con, SequenceName::OrderItems)
            .await?;
        let c = InMemorySequenceGenerator
            .next(&mut con, SequenceName::Orders)
            .await?;
        assert_eq!((a, b, c), (1, 1, 2));
        Ok(())
    }
}
