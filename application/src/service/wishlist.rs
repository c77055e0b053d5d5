use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{BookQuery, DependOnBookQuery, DependOnWishlistQuery, WishlistQuery};
use kernel::interface::sequence::{DependOnSequenceGenerator, SequenceGenerator, SequenceName};
use kernel::interface::update::{DependOnWishlistModifier, WishlistModifier};
use kernel::prelude::entity::{
    BookId, CustomerId, Quantity, Wishlist, WishlistId, WishlistItem, WishlistItemId,
};
use kernel::KernelError;

use crate::service::cart::{validate_customer, validate_qty};
use crate::transfer::{
    AddWishlistItemDto, CreateWishlistDto, DeleteWishlistDto, DeleteWishlistItemDto,
    GetWishlistDto, WishlistDto, WishlistItemDto,
};

#[async_trait::async_trait]
pub trait GetWishlistService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnWishlistQuery
{
    async fn get_wishlist(
        &self,
        dto: GetWishlistDto,
    ) -> error_stack::Result<Option<WishlistDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let wishlist = self
            .wishlist_query()
            .find_by_id(&mut connection, &WishlistId::new(dto.id))
            .await?;
        Ok(wishlist.map(WishlistDto::from))
    }

    async fn get_all_wishlists(&self) -> error_stack::Result<Vec<WishlistDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let wishlists = self.wishlist_query().find_all(&mut connection).await?;
        Ok(wishlists.into_iter().map(WishlistDto::from).collect())
    }
}

impl<T> GetWishlistService for T where T: DependOnDatabaseConnection + DependOnWishlistQuery {}

#[async_trait::async_trait]
pub trait CreateWishlistService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnSequenceGenerator
    + DependOnWishlistModifier
{
    async fn create_wishlist(
        &self,
        dto: CreateWishlistDto,
    ) -> error_stack::Result<WishlistDto, KernelError> {
        let customer_id = CustomerId::new(dto.customer_id);
        validate_customer(&customer_id)?;
        let mut connection = self.database_connection().transact().await?;
        let id = self
            .sequence_generator()
            .next(&mut connection, SequenceName::Wishlists)
            .await?;
        let wishlist = Wishlist::new(WishlistId::new(id), customer_id, Vec::new());
        self.wishlist_modifier()
            .create(&mut connection, &wishlist)
            .await?;
        Ok(WishlistDto::from(wishlist))
    }
}

impl<T> CreateWishlistService for T where
    T: DependOnDatabaseConnection + DependOnSequenceGenerator + DependOnWishlistModifier
{
}

#[async_trait::async_trait]
pub trait UpdateWishlistService:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection
    + DependOnSequenceGenerator
    + DependOnBookQuery
    + DependOnWishlistQuery
    + DependOnWishlistModifier
{
    /// Adds a book, merging into the existing line for it.
    async fn add_wishlist_item(
        &self,
        dto: AddWishlistItemDto,
    ) -> error_stack::Result<WishlistItemDto, KernelError> {
        let qty = Quantity::new(dto.qty);
        validate_qty(&qty)?;
        let wishlist_id = WishlistId::new(dto.wishlist_id);
        let book_id = BookId::new(dto.book_id);
        let mut connection = self.database_connection().transact().await?;

        if self
            .wishlist_query()
            .find_by_id(&mut connection, &wishlist_id)
            .await?
            .is_none()
        {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("wishlist {} not found", dto.wishlist_id)));
        }
        if self
            .book_query()
            .find_by_id(&mut connection, &book_id)
            .await?
            .is_none()
        {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("book {} not found", dto.book_id)));
        }

        let id = self
            .sequence_generator()
            .next(&mut connection, SequenceName::WishlistItems)
            .await?;
        let item = WishlistItem::new(WishlistItemId::new(id), wishlist_id, book_id, qty);
        let stored = self
            .wishlist_modifier()
            .add_item(&mut connection, &item)
            .await?;
        Ok(WishlistItemDto::from(stored))
    }

    async fn delete_wishlist_item(
        &self,
        dto: DeleteWishlistItemDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        self.wishlist_modifier()
            .delete_item(
                &mut connection,
                &WishlistId::new(dto.wishlist_id),
                &WishlistItemId::new(dto.item_id),
            )
            .await
    }
}

impl<T> UpdateWishlistService for T where
    T: DependOnDatabaseConnection
        + DependOnSequenceGenerator
        + DependOnBookQuery
        + DependOnWishlistQuery
        + DependOnWishlistModifier
{
}

#[async_trait::async_trait]
pub trait DeleteWishlistService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnWishlistModifier
{
    /// Removes the wishlist together with its items.
    async fn delete_wishlist(
        &self,
        dto: DeleteWishlistDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        self.wishlist_modifier()
            .delete(&mut connection, &WishlistId::new(dto.id))
            .await
    }
}

impl<T> DeleteWishlistService for T where
    T: DependOnDatabaseConnection + DependOnWishlistModifier
{
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;

    use kernel::KernelError;

    use crate::service::{
        CreateWishlistService, DeleteWishlistService, GetWishlistService, UpdateWishlistService,
    };
    use crate::test_support::TestModule;
    use crate::transfer::{
        AddWishlistItemDto, CreateWishlistDto, DeleteWishlistDto, GetWishlistDto,
    };

    #[tokio::test]
    async fn repeated_add_increments_quantity() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let book = module.seed_book("Neuromancer", dec!(8)).await?;
        let wishlist = module
            .create_wishlist(CreateWishlistDto { customer_id: 2 })
            .await?;

        for _ in 0..3 {
            module
                .add_wishlist_item(AddWishlistItemDto {
                    wishlist_id: wishlist.id,
                    book_id: book,
                    qty: 1,
                })
                .await?;
        }

        let wishlist = module
            .get_wishlist(GetWishlistDto { id: wishlist.id })
            .await?
            .expect("wishlist exists");
        assert_eq!(wishlist.items.len(), 1);
        assert_eq!(wishlist.items[0].qty, 3);

        module
            .delete_wishlist(DeleteWishlistDto { id: wishlist.id })
            .await?;
        assert!(module.get_all_wishlists().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn rejects_unknown_wishlist_and_customer() {
        let module = TestModule::new();
        let missing = module
            .add_wishlist_item(AddWishlistItemDto {
                wishlist_id: 77,
                book_id: 1,
                qty: 1,
            })
            .await
            .unwrap_err();
        assert_eq!(missing.current_context(), &KernelError::NotFound);

        let anonymous = module
            .create_wishlist(CreateWishlistDto { customer_id: -1 })
            .await
            .unwrap_err();
        assert_eq!(anonymous.current_context(), &KernelError::Validation);
    }
}
