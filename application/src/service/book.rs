use error_stack::Report;
use rust_decimal::Decimal;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::sequence::{DependOnSequenceGenerator, SequenceGenerator, SequenceName};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookDescription, BookGenre, BookId, BookTitle, Price,
};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};

fn validate_book(
    title: &str,
    author: &str,
    price: &Decimal,
) -> error_stack::Result<(), KernelError> {
    if title.trim().is_empty() {
        return Err(Report::new(KernelError::Validation).attach_printable("title is required"));
    }
    if author.trim().is_empty() {
        return Err(Report::new(KernelError::Validation).attach_printable("author is required"));
    }
    if price.is_sign_negative() && !price.is_zero() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("price must not be negative: {price}")));
    }
    Ok(())
}

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;
        Ok(book.map(BookDto::from))
    }

    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetBookService for T where T: DependOnDatabaseConnection + DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnSequenceGenerator
    + DependOnBookModifier
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<i64, KernelError> {
        validate_book(&dto.title, &dto.author, &dto.price)?;
        let mut connection = self.database_connection().transact().await?;

        let id = self
            .sequence_generator()
            .next(&mut connection, SequenceName::Books)
            .await?;
        let book = Book::new(
            BookId::new(id),
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            BookGenre::new(dto.genre),
            Price::new(dto.price),
            BookDescription::new(dto.description),
        );
        self.book_modifier().create(&mut connection, &book).await?;

        Ok(id)
    }
}

impl<T> CreateBookService for T where
    T: DependOnDatabaseConnection + DependOnSequenceGenerator + DependOnBookModifier
{
}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookModifier
{
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<(), KernelError> {
        validate_book(&dto.title, &dto.author, &dto.price)?;
        let mut connection = self.database_connection().transact().await?;
        let book = Book::new(
            BookId::new(dto.id),
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            BookGenre::new(dto.genre),
            Price::new(dto.price),
            BookDescription::new(dto.description),
        );
        self.book_modifier().update(&mut connection, &book).await
    }
}

impl<T> UpdateBookService for T where T: DependOnDatabaseConnection + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookModifier
{
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BookId::new(dto.id);
        self.book_modifier().delete(&mut connection, &id).await
    }
}

impl<T> DeleteBookService for T where T: DependOnDatabaseConnection + DependOnBookModifier {}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;

    use kernel::KernelError;

    use crate::service::{CreateBookService, DeleteBookService, GetBookService, UpdateBookService};
    use crate::test_support::TestModule;
    use crate::transfer::{CreateBookDto, DeleteBookDto, GetBookDto, UpdateBookDto};

    fn create_dto(title: &str) -> CreateBookDto {
        CreateBookDto {
            title: title.to_string(),
            author: "Ursula K. Le Guin".to_string(),
            genre: "fantasy".to_string(),
            price: dec!(12.5),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn create_then_update_then_delete() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let id = module.create_book(create_dto("A Wizard of Earthsea")).await?;
        let other = module.create_book(create_dto("The Tombs of Atuan")).await?;
        assert_ne!(id, other);

        module
            .update_book(UpdateBookDto {
                id,
                title: "A Wizard of Earthsea".to_string(),
                author: "Ursula K. Le Guin".to_string(),
                genre: "fantasy".to_string(),
                price: dec!(14),
                description: "first of the cycle".to_string(),
            })
            .await?;
        let book = module.get_book(GetBookDto { id }).await?.expect("book exists");
        assert_eq!(book.price, dec!(14));
        assert_eq!(module.get_all_books().await?.len(), 2);

        module.delete_book(DeleteBookDto { id }).await?;
        assert!(module.get_book(GetBookDto { id }).await?.is_none());
        let again = module.delete_book(DeleteBookDto { id }).await;
        assert_eq!(again.unwrap_err().current_context(), &KernelError::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn rejects_missing_fields_and_negative_price() {
        let module = TestModule::new();
        let untitled = module.create_book(create_dto("  ")).await.unwrap_err();
        assert_eq!(untitled.current_context(), &KernelError::Validation);

        let mut negative = create_dto("Tehanu");
        negative.price = dec!(-1);
        let negative = module.create_book(negative).await.unwrap_err();
        assert_eq!(negative.current_context(), &KernelError::Validation);
    }
}
