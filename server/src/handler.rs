use std::ops::Deref;
use std::sync::Arc;

use driver::database::{
    InMemoryCartRepository, PostgresBookRepository, PostgresDatabase, PostgresOrderItemRepository,
    PostgresOrderRepository, PostgresSequenceGenerator, PostgresWishlistRepository,
};
use driver::mq::InProcessDispatcher;
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::job::{DependOnOrderJobDispatcher, OrderJob};
use kernel::interface::query::{
    DependOnBookQuery, DependOnCartQuery, DependOnOrderItemQuery, DependOnOrderQuery,
    DependOnWishlistQuery,
};
use kernel::interface::sequence::DependOnSequenceGenerator;
use kernel::interface::update::{
    DependOnBookModifier, DependOnCartModifier, DependOnOrderItemModifier, DependOnOrderModifier,
    DependOnWishlistModifier,
};
use kernel::KernelError;
use vodca::References;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub async fn new(
        dispatcher: InProcessDispatcher<OrderJob>,
    ) -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init(dispatcher).await?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    pgpool: PostgresDatabase,
    carts: InMemoryCartRepository,
    dispatcher: InProcessDispatcher<OrderJob>,
}

impl Handler {
    pub async fn init(
        dispatcher: InProcessDispatcher<OrderJob>,
    ) -> error_stack::Result<Self, KernelError> {
        let pgpool = PostgresDatabase::new().await?;
        pgpool.migrate().await?;

        Ok(Self {
            pgpool,
            carts: InMemoryCartRepository::new(),
            dispatcher,
        })
    }
}

impl DependOnDatabaseConnection for Handler {
    type DatabaseConnection = PostgresDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.pgpool
    }
}

impl DependOnSequenceGenerator for Handler {
    type SequenceGenerator = PostgresSequenceGenerator;
    fn sequence_generator(&self) -> &Self::SequenceGenerator {
        &PostgresSequenceGenerator
    }
}

impl DependOnBookQuery for Handler {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for Handler {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl DependOnOrderQuery for Handler {
    type OrderQuery = PostgresOrderRepository;
    fn order_query(&self) -> &Self::OrderQuery {
        &PostgresOrderRepository
    }
}

impl DependOnOrderModifier for Handler {
    type OrderModifier = PostgresOrderRepository;
    fn order_modifier(&self) -> &Self::OrderModifier {
        &PostgresOrderRepository
    }
}

impl DependOnOrderItemQuery for Handler {
    type OrderItemQuery = PostgresOrderItemRepository;
    fn order_item_query(&self) -> &Self::OrderItemQuery {
        &PostgresOrderItemRepository
    }
}

impl DependOnOrderItemModifier for Handler {
    type OrderItemModifier = PostgresOrderItemRepository;
    fn order_item_modifier(&self) -> &Self::OrderItemModifier {
        &PostgresOrderItemRepository
    }
}

impl DependOnWishlistQuery for Handler {
    type WishlistQuery = PostgresWishlistRepository;
    fn wishlist_query(&self) -> &Self::WishlistQuery {
        &PostgresWishlistRepository
    }
}

impl DependOnWishlistModifier for Handler {
    type WishlistModifier = PostgresWishlistRepository;
    fn wishlist_modifier(&self) -> &Self::WishlistModifier {
        &PostgresWishlistRepository
    }
}

impl DependOnCartQuery for Handler {
    type CartQuery = InMemoryCartRepository;
    fn cart_query(&self) -> &Self::CartQuery {
        &self.carts
    }
}

impl DependOnCartModifier for Handler {
    type CartModifier = InMemoryCartRepository;
    fn cart_modifier(&self) -> &Self::CartModifier {
        &self.carts
    }
}

impl DependOnOrderJobDispatcher for Handler {
    type OrderJobDispatcher = InProcessDispatcher<OrderJob>;
    fn order_job_dispatcher(&self) -> &Self::OrderJobDispatcher {
        &self.dispatcher
    }
}
