use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::PgConnection;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookAuthor, BookDescription, BookGenre, BookId, BookTitle, Price,
};
use kernel::KernelError;

use crate::database::postgres::{bounded, PostgresConnection};

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresConnection;

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut PostgresConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await
    }

    async fn delete(
        &self,
        con: &mut PostgresConnection,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con, book_id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    genre: String,
    price: Decimal,
    description: String,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BookGenre::new(value.genre),
            Price::new(value.price),
            BookDescription::new(value.description),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = bounded(
            sqlx::query_as::<_, BookRow>(
                // language=postgresql
                r#"
                SELECT id, title, author, genre, price, description
                FROM books
                WHERE id = $1
                "#,
            )
            .bind(id.as_ref())
            .fetch_optional(con),
        )
        .await?;
        Ok(row.map(Book::from))
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = bounded(
            sqlx::query_as::<_, BookRow>(
                // language=postgresql
                r#"
                SELECT id, title, author, genre, price, description
                FROM books
                ORDER BY id
                "#,
            )
            .fetch_all(con),
        )
        .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        bounded(
            // language=postgresql
            sqlx::query(
                r#"
                INSERT INTO books (id, title, author, genre, price, description)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(book.id().as_ref())
            .bind(book.title().as_ref())
            .bind(book.author().as_ref())
            .bind(book.genre().as_ref())
            .bind(book.price().as_ref())
            .bind(book.description().as_ref())
            .execute(con),
        )
        .await?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        let result = bounded(
            // language=postgresql
            sqlx::query(
                r#"
                UPDATE books
                SET title = $2, author = $3, genre = $4, price = $5, description = $6
                WHERE id = $1
                "#,
            )
            .bind(book.id().as_ref())
            .bind(book.title().as_ref())
            .bind(book.author().as_ref())
            .bind(book.genre().as_ref())
            .bind(book.price().as_ref())
            .bind(book.description().as_ref())
            .execute(con),
        )
        .await?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("book {} not found", book.id().as_ref())));
        }
        Ok(())
    }

    async fn delete(con: &mut PgConnection, book_id: &BookId) -> error_stack::Result<(), KernelError> {
        let result = bounded(
            // language=postgresql
            sqlx::query(
                r#"
                DELETE FROM books
                WHERE id = $1
                "#,
            )
            .bind(book_id.as_ref())
            .execute(con),
        )
        .await?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("book {} not found", book_id.as_ref())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::sequence::{SequenceGenerator, SequenceName};
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookAuthor, BookDescription, BookGenre, BookId, BookTitle, Price,
    };
    use kernel::KernelError;

    use crate::database::postgres::book::PostgresBookRepository;
    use crate::database::postgres::{PostgresDatabase, PostgresSequenceGenerator};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;
        let id = PostgresSequenceGenerator
            .next(&mut con, SequenceName::Books)
            .await?;
        let id = BookId::new(id);
        let title = format!("test-{}", rand::random::<u32>());

        let book = Book::new(
            id,
            BookTitle::new(title),
            BookAuthor::new("author"),
            BookGenre::new("genre"),
            Price::new(dec!(12.50)),
            BookDescription::new(""),
        );
        PostgresBookRepository.create(&mut con, &book).await?;

        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book.clone()));

        let book = Book::new(
            id,
            BookTitle::new("renamed"),
            BookAuthor::new("author"),
            BookGenre::new("genre"),
            Price::new(dec!(15)),
            BookDescription::new("second edition"),
        );
        PostgresBookRepository.update(&mut con, &book).await?;

        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book));

        PostgresBookRepository.delete(&mut con, &id).await?;
        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());

        let missing = PostgresBookRepository.delete(&mut con, &id).await;
        assert_eq!(
            missing.unwrap_err().current_context(),
            &KernelError::NotFound
        );

        Ok(())
    }
}
