use std::collections::BTreeMap;

use error_stack::Report;
use sqlx::PgConnection;

use kernel::interface::query::WishlistQuery;
use kernel::interface::update::WishlistModifier;
use kernel::prelude::entity::{
    BookId, CustomerId, Quantity, Wishlist, WishlistId, WishlistItem, WishlistItemId,
};
use kernel::KernelError;

use crate::database::postgres::{bounded, PostgresConnection};

pub struct PostgresWishlistRepository;

#[async_trait::async_trait]
impl WishlistQuery for PostgresWishlistRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &WishlistId,
    ) -> error_stack::Result<Option<Wishlist>, KernelError> {
        PgWishlistInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Wishlist>, KernelError> {
        PgWishlistInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl WishlistModifier for PostgresWishlistRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        wishlist: &Wishlist,
    ) -> error_stack::Result<(), KernelError> {
        PgWishlistInternal::create(con, wishlist).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        wishlist_id: &WishlistId,
    ) -> error_stack::Result<(), KernelError> {
        PgWishlistInternal::delete(con, wishlist_id).await
    }

    async fn add_item(
        &self,
        con: &mut PostgresConnection,
        item: &WishlistItem,
    ) -> error_stack::Result<WishlistItem, KernelError> {
        PgWishlistInternal::add_item(con, item).await
    }

    async fn delete_item(
        &self,
        con: &mut PostgresConnection,
        wishlist_id: &WishlistId,
        item_id: &WishlistItemId,
    ) -> error_stack::Result<(), KernelError> {
        PgWishlistInternal::delete_item(con, wishlist_id, item_id).await
    }
}

#[derive(sqlx::FromRow)]
struct WishlistRow {
    id: i64,
    customer_id: i64,
}

#[derive(sqlx::FromRow)]
struct WishlistItemRow {
    id: i64,
    wishlist_id: i64,
    book_id: i64,
    qty: i32,
}

impl From<WishlistItemRow> for WishlistItem {
    fn from(value: WishlistItemRow) -> Self {
        WishlistItem::new(
            WishlistItemId::new(value.id),
            WishlistId::new(value.wishlist_id),
            BookId::new(value.book_id),
            Quantity::new(value.qty),
        )
    }
}

pub(in crate::database) struct PgWishlistInternal;

impl PgWishlistInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &WishlistId,
    ) -> error_stack::Result<Option<Wishlist>, KernelError> {
        let row = bounded(
            sqlx::query_as::<_, WishlistRow>(
                // language=postgresql
                r#"
                SELECT id, customer_id
                FROM wishlists
                WHERE id = $1
                "#,
            )
            .bind(id.as_ref())
            .fetch_optional(&mut *con),
        )
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let items = bounded(
            sqlx::query_as::<_, WishlistItemRow>(
                // language=postgresql
                r#"
                SELECT id, wishlist_id, book_id, qty
                FROM wishlist_items
                WHERE wishlist_id = $1
                ORDER BY id
                "#,
            )
            .bind(id.as_ref())
            .fetch_all(con),
        )
        .await?;
        Ok(Some(Wishlist::new(
            WishlistId::new(row.id),
            CustomerId::new(row.customer_id),
            items.into_iter().map(WishlistItem::from).collect(),
        )))
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Wishlist>, KernelError> {
        let rows = bounded(
            sqlx::query_as::<_, WishlistRow>(
                // language=postgresql
                r#"
                SELECT id, customer_id
                FROM wishlists
                ORDER BY id
                "#,
            )
            .fetch_all(&mut *con),
        )
        .await?;
        let items = bounded(
            sqlx::query_as::<_, WishlistItemRow>(
                // language=postgresql
                r#"
                SELECT id, wishlist_id, book_id, qty
                FROM wishlist_items
                ORDER BY id
                "#,
            )
            .fetch_all(con),
        )
        .await?;

        let mut grouped: BTreeMap<i64, Vec<WishlistItem>> = BTreeMap::new();
        for item in items {
            grouped
                .entry(item.wishlist_id)
                .or_default()
                .push(WishlistItem::from(item));
        }
        let wishlists = rows
            .into_iter()
            .map(|row| {
                let items = grouped.remove(&row.id).unwrap_or_default();
                Wishlist::new(
                    WishlistId::new(row.id),
                    CustomerId::new(row.customer_id),
                    items,
                )
            })
            .collect();
        Ok(wishlists)
    }

    async fn create(
        con: &mut PgConnection,
        wishlist: &Wishlist,
    ) -> error_stack::Result<(), KernelError> {
        bounded(
            // language=postgresql
            sqlx::query(
                r#"
                INSERT INTO wishlists (id, customer_id)
                VALUES ($1, $2)
                "#,
            )
            .bind(wishlist.id().as_ref())
            .bind(wishlist.customer_id().as_ref())
            .execute(con),
        )
        .await?;
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        wishlist_id: &WishlistId,
    ) -> error_stack::Result<(), KernelError> {
        // Items and header go in one statement; the count is the header's.
        let result = bounded(
            // language=postgresql
            sqlx::query(
                r#"
                WITH items AS (
                    DELETE FROM wishlist_items
                    WHERE wishlist_id = $1
                )
                DELETE FROM wishlists
                WHERE id = $1
                "#,
            )
            .bind(wishlist_id.as_ref())
            .execute(con),
        )
        .await?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("wishlist {} not found", wishlist_id.as_ref())));
        }
        Ok(())
    }

    async fn add_item(
        con: &mut PgConnection,
        item: &WishlistItem,
    ) -> error_stack::Result<WishlistItem, KernelError> {
        let row = bounded(
            sqlx::query_as::<_, WishlistItemRow>(
                // language=postgresql
                r#"
                INSERT INTO wishlist_items (id, wishlist_id, book_id, qty)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (wishlist_id, book_id)
                    DO UPDATE SET qty = wishlist_items.qty + EXCLUDED.qty
                RETURNING id, wishlist_id, book_id, qty
                "#,
            )
            .bind(item.id().as_ref())
            .bind(item.wishlist_id().as_ref())
            .bind(item.book_id().as_ref())
            .bind(item.qty().as_ref())
            .fetch_one(con),
        )
        .await?;
        Ok(WishlistItem::from(row))
    }

    async fn delete_item(
        con: &mut PgConnection,
        wishlist_id: &WishlistId,
        item_id: &WishlistItemId,
    ) -> error_stack::Result<(), KernelError> {
        let result = bounded(
            // language=postgresql
            sqlx::query(
                r#"
                DELETE FROM wishlist_items
                WHERE id = $1 AND wishlist_id = $2
                "#,
            )
            .bind(item_id.as_ref())
            .bind(wishlist_id.as_ref())
            .execute(con),
        )
        .await?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound).attach_printable(format!(
                "item {} not found in wishlist {}",
                item_id.as_ref(),
                wishlist_id.as_ref()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::WishlistQuery;
    use kernel::interface::sequence::{SequenceGenerator, SequenceName};
    use kernel::interface::update::WishlistModifier;
    use kernel::prelude::entity::{
        BookId, CustomerId, Quantity, Wishlist, WishlistId, WishlistItem, WishlistItemId,
    };
    use kernel::KernelError;

    use crate::database::postgres::wishlist::PostgresWishlistRepository;
    use crate::database::postgres::{PostgresDatabase, PostgresSequenceGenerator};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let id = WishlistId::new(
            PostgresSequenceGenerator
                .next(&mut con, SequenceName::Wishlists)
                .await?,
        );
        let wishlist = Wishlist::new(id, CustomerId::new(9), Vec::new());
        PostgresWishlistRepository.create(&mut con, &wishlist).await?;

        let mut first = None;
        for _ in 0..2 {
            let item_id = PostgresSequenceGenerator
                .next(&mut con, SequenceName::WishlistItems)
                .await?;
            let item = WishlistItem::new(
                WishlistItemId::new(item_id),
                id,
                BookId::new(4),
                Quantity::new(1),
            );
            let stored = PostgresWishlistRepository.add_item(&mut con, &item).await?;
            first.get_or_insert(*stored.id());
            assert_eq!(stored.id(), first.as_ref().unwrap());
        }

        let found = PostgresWishlistRepository
            .find_by_id(&mut con, &id)
            .await?
            .unwrap();
        assert_eq!(found.items().len(), 1);
        assert_eq!(found.items()[0].qty(), &Quantity::new(2));

        PostgresWishlistRepository.delete(&mut con, &id).await?;
        assert!(PostgresWishlistRepository
            .find_by_id(&mut con, &id)
            .await?
            .is_none());
        let missing = PostgresWishlistRepository.delete(&mut con, &id).await;
        assert_eq!(
            missing.unwrap_err().current_context(),
            &KernelError::NotFound
        );
        Ok(())
    }
}
