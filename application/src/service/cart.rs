use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{BookQuery, CartQuery, DependOnBookQuery, DependOnCartQuery};
use kernel::interface::update::{CartModifier, DependOnCartModifier};
use kernel::prelude::entity::{BookId, CartId, CartItemId, CustomerId, Quantity};
use kernel::KernelError;

use crate::transfer::{
    AddCartItemDto, CartDto, CartItemDto, CreateCartDto, DeleteCartDto, DeleteCartItemDto,
    GetCartDto, UpdateCartDto, UpdateCartItemDto,
};

pub(crate) fn validate_customer(customer_id: &CustomerId) -> error_stack::Result<(), KernelError> {
    if !customer_id.is_valid() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("invalid customer_id: {}", customer_id.as_ref())));
    }
    Ok(())
}

pub(crate) fn validate_qty(qty: &Quantity) -> error_stack::Result<(), KernelError> {
    if !qty.is_positive() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("qty must be positive: {}", qty.as_ref())));
    }
    Ok(())
}

#[async_trait::async_trait]
pub trait GetCartService: 'static + Sync + Send + DependOnCartQuery {
    async fn get_cart(&self, dto: GetCartDto) -> error_stack::Result<Option<CartDto>, KernelError> {
        let cart = self.cart_query().find_by_id(&CartId::new(dto.id)).await?;
        Ok(cart.map(CartDto::from))
    }

    async fn get_all_carts(&self) -> error_stack::Result<Vec<CartDto>, KernelError> {
        let carts = self.cart_query().find_all().await?;
        Ok(carts.into_iter().map(CartDto::from).collect())
    }
}

impl<T> GetCartService for T where T: DependOnCartQuery {}

#[async_trait::async_trait]
pub trait CreateCartService: 'static + Sync + Send + DependOnCartModifier {
    async fn create_cart(&self, dto: CreateCartDto) -> error_stack::Result<CartDto, KernelError> {
        let customer_id = CustomerId::new(dto.customer_id);
        validate_customer(&customer_id)?;
        let cart = self.cart_modifier().create(&customer_id).await?;
        Ok(CartDto::from(cart))
    }

    /// The customer's cart, created on first use.
    async fn get_or_create_cart(
        &self,
        dto: CreateCartDto,
    ) -> error_stack::Result<CartDto, KernelError> {
        let customer_id = CustomerId::new(dto.customer_id);
        validate_customer(&customer_id)?;
        let cart = self.cart_modifier().get_or_create(&customer_id).await?;
        Ok(CartDto::from(cart))
    }
}

impl<T> CreateCartService for T where T: DependOnCartModifier {}

#[async_trait::async_trait]
pub trait UpdateCartService:
    'static + Sync + Send + DependOnDatabaseConnection + DependOnBookQuery + DependOnCartModifier
{
    async fn update_cart(&self, dto: UpdateCartDto) -> error_stack::Result<CartDto, KernelError> {
        let customer_id = CustomerId::new(dto.customer_id);
        validate_customer(&customer_id)?;
        let cart = self
            .cart_modifier()
            .update(&CartId::new(dto.id), &customer_id)
            .await?;
        Ok(CartDto::from(cart))
    }

    async fn add_cart_item(
        &self,
        dto: AddCartItemDto,
    ) -> error_stack::Result<CartItemDto, KernelError> {
        let qty = Quantity::new(dto.qty);
        validate_qty(&qty)?;
        let book_id = BookId::new(dto.book_id);
        let mut connection = self.database_connection().transact().await?;
        if self
            .book_query()
            .find_by_id(&mut connection, &book_id)
            .await?
            .is_none()
        {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("book {} not found", dto.book_id)));
        }
        let item = self
            .cart_modifier()
            .add_item(&CartId::new(dto.cart_id), &book_id, &qty)
            .await?;
        Ok(CartItemDto::from(item))
    }

    async fn update_cart_item(
        &self,
        dto: UpdateCartItemDto,
    ) -> error_stack::Result<CartItemDto, KernelError> {
        let qty = Quantity::new(dto.qty);
        validate_qty(&qty)?;
        let item = self
            .cart_modifier()
            .update_item(&CartId::new(dto.cart_id), &CartItemId::new(dto.item_id), &qty)
            .await?;
        Ok(CartItemDto::from(item))
    }

    async fn delete_cart_item(
        &self,
        dto: DeleteCartItemDto,
    ) -> error_stack::Result<(), KernelError> {
        self.cart_modifier()
            .delete_item(&CartId::new(dto.cart_id), &CartItemId::new(dto.item_id))
            .await
    }
}

impl<T> UpdateCartService for T where
    T: DependOnDatabaseConnection + DependOnBookQuery + DependOnCartModifier
{
}

#[async_trait::async_trait]
pub trait DeleteCartService: 'static + Sync + Send + DependOnCartModifier {
    async fn delete_cart(&self, dto: DeleteCartDto) -> error_stack::Result<(), KernelError> {
        self.cart_modifier().delete(&CartId::new(dto.id)).await
    }
}

impl<T> DeleteCartService for T where T: DependOnCartModifier {}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use crate::service::{CreateCartService, GetCartService, UpdateCartService};
    use crate::test_support::TestModule;
    use crate::transfer::{AddCartItemDto, CreateCartDto, GetCartDto, UpdateCartItemDto};

    #[tokio::test]
    async fn add_item_requires_a_known_book() -> error_stack::Result<(), KernelError> {
        let module = TestModule::new();
        let book = module.seed_book("Dune", rust_decimal_macros::dec!(9.99)).await?;
        let cart = module
            .get_or_create_cart(CreateCartDto { customer_id: 4 })
            .await?;

        let missing = module
            .add_cart_item(AddCartItemDto {
                cart_id: cart.id,
                book_id: 404,
                qty: 1,
            })
            .await
            .unwrap_err();
        assert_eq!(missing.current_context(), &KernelError::NotFound);

        let zero = module
            .add_cart_item(AddCartItemDto {
                cart_id: cart.id,
                book_id: book,
                qty: 0,
            })
            .await
            .unwrap_err();
        assert_eq!(zero.current_context(), &KernelError::Validation);

        let item = module
            .add_cart_item(AddCartItemDto {
                cart_id: cart.id,
                book_id: book,
                qty: 2,
            })
            .await?;
        let item = module
            .update_cart_item(UpdateCartItemDto {
                cart_id: cart.id,
                item_id: item.id,
                qty: 5,
            })
            .await?;
        assert_eq!(item.qty, 5);

        let cart = module
            .get_cart(GetCartDto { id: cart.id })
            .await?
            .expect("cart exists");
        assert_eq!(cart.items.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn rejects_invalid_customer() {
        let module = TestModule::new();
        let report = module
            .create_cart(CreateCartDto { customer_id: 0 })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);
    }
}
