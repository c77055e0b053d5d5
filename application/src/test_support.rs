use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use error_stack::Report;
use rust_decimal::Decimal;

use driver::database::{
    InMemoryBookRepository, InMemoryCartRepository, InMemoryDatabase, InMemoryOrderItemRepository,
    InMemoryOrderRepository, InMemorySequenceGenerator, InMemoryTransaction,
    InMemoryWishlistRepository,
};
use kernel::interface::database::DependOnDatabaseConnection;
use kernel::interface::job::{DependOnOrderJobDispatcher, OrderJob};
use kernel::interface::mq::{DispatchOutcome, JobDispatcher, QueueInfo, QueueStats};
use kernel::interface::query::{
    DependOnBookQuery, DependOnCartQuery, DependOnOrderItemQuery, DependOnOrderQuery,
    DependOnWishlistQuery,
};
use kernel::interface::sequence::DependOnSequenceGenerator;
use kernel::interface::update::{
    DependOnBookModifier, DependOnCartModifier, DependOnOrderItemModifier, DependOnOrderModifier,
    DependOnWishlistModifier, OrderItemModifier,
};
use kernel::prelude::entity::{OrderId, OrderItem, OrderItemId};
use kernel::KernelError;

use crate::service::CreateBookService;
use crate::transfer::CreateBookDto;

/// Keeps every job it receives instead of running it.
#[derive(Default)]
pub struct RecordingDispatcher {
    jobs: Mutex<Vec<OrderJob>>,
    full: bool,
}

impl JobDispatcher<OrderJob> for RecordingDispatcher {
    fn dispatch(&self, info: QueueInfo<OrderJob>) -> DispatchOutcome {
        if self.full {
            return DispatchOutcome::Dropped;
        }
        match self.jobs.lock() {
            Ok(mut jobs) => {
                jobs.push(info.into_destruct().data);
                DispatchOutcome::Queued
            }
            Err(_) => DispatchOutcome::Closed,
        }
    }

    fn stats(&self) -> QueueStats {
        QueueStats::default()
    }
}

/// Order line writer that fails on the `fail_at`-th insert (zero based) and,
/// with `fail_sweep`, on every delete by order.
#[derive(Default)]
pub struct FlakyOrderItemRepository {
    fail_at: Option<usize>,
    fail_sweep: bool,
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl OrderItemModifier for FlakyOrderItemRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        item: &OrderItem,
    ) -> error_stack::Result<(), KernelError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_at == Some(call) {
            return Err(Report::new(KernelError::Internal).attach_printable("injected failure"));
        }
        InMemoryOrderItemRepository.create(con, item).await
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        item_id: &OrderItemId,
    ) -> error_stack::Result<(), KernelError> {
        InMemoryOrderItemRepository.delete(con, item_id).await
    }

    async fn delete_by_order_id(
        &self,
        con: &mut InMemoryTransaction,
        order_id: &OrderId,
    ) -> error_stack::Result<u64, KernelError> {
        if self.fail_sweep {
            return Err(Report::new(KernelError::Timeout).attach_printable("injected failure"));
        }
        InMemoryOrderItemRepository
            .delete_by_order_id(con, order_id)
            .await
    }
}

/// Application module wired to the in-memory driver.
pub struct TestModule {
    database: InMemoryDatabase,
    sequence: InMemorySequenceGenerator,
    books: InMemoryBookRepository,
    orders: InMemoryOrderRepository,
    order_items: InMemoryOrderItemRepository,
    order_item_writer: FlakyOrderItemRepository,
    wishlists: InMemoryWishlistRepository,
    carts: InMemoryCartRepository,
    dispatcher: RecordingDispatcher,
}

impl TestModule {
    pub fn new() -> Self {
        Self::build(None, false, false)
    }

    /// Only the `index`-th order line insert (zero based) fails.
    pub fn failing_line_at(index: usize) -> Self {
        Self::build(Some(index), false, false)
    }

    /// Like [`TestModule::failing_line_at`], and deleting lines by order fails too.
    pub fn failing_line_and_sweep_at(index: usize) -> Self {
        Self::build(Some(index), true, false)
    }

    /// Deleting lines by order always fails.
    pub fn failing_sweep() -> Self {
        Self::build(None, true, false)
    }

    /// Every dispatch is dropped as if the queue were full.
    pub fn with_full_queue() -> Self {
        Self::build(None, false, true)
    }

    fn build(fail_at: Option<usize>, fail_sweep: bool, full: bool) -> Self {
        Self {
            database: InMemoryDatabase::new(),
            sequence: InMemorySequenceGenerator,
            books: InMemoryBookRepository,
            orders: InMemoryOrderRepository,
            order_items: InMemoryOrderItemRepository,
            order_item_writer: FlakyOrderItemRepository {
                fail_at,
                fail_sweep,
                calls: AtomicUsize::new(0),
            },
            wishlists: InMemoryWishlistRepository,
            carts: InMemoryCartRepository::new(),
            dispatcher: RecordingDispatcher {
                jobs: Mutex::new(Vec::new()),
                full,
            },
        }
    }

    pub async fn seed_book(
        &self,
        title: &str,
        price: Decimal,
    ) -> error_stack::Result<i64, KernelError> {
        self.create_book(CreateBookDto {
            title: title.to_string(),
            author: "Anonymous".to_string(),
            genre: "Fiction".to_string(),
            price,
            description: String::new(),
        })
        .await
    }

    pub fn jobs(&self) -> Vec<OrderJob> {
        self.dispatcher
            .jobs
            .lock()
            .map(|jobs| jobs.clone())
            .unwrap_or_default()
    }
}

impl DependOnDatabaseConnection for TestModule {
    type DatabaseConnection = InMemoryDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.database
    }
}

impl DependOnSequenceGenerator for TestModule {
    type SequenceGenerator = InMemorySequenceGenerator;
    fn sequence_generator(&self) -> &Self::SequenceGenerator {
        &self.sequence
    }
}

impl DependOnBookQuery for TestModule {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &self.books
    }
}

impl DependOnBookModifier for TestModule {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &self.books
    }
}

impl DependOnOrderQuery for TestModule {
    type OrderQuery = InMemoryOrderRepository;
    fn order_query(&self) -> &Self::OrderQuery {
        &self.orders
    }
}

impl DependOnOrderModifier for TestModule {
    type OrderModifier = InMemoryOrderRepository;
    fn order_modifier(&self) -> &Self::OrderModifier {
        &self.orders
    }
}

impl DependOnOrderItemQuery for TestModule {
    type OrderItemQuery = InMemoryOrderItemRepository;
    fn order_item_query(&self) -> &Self::OrderItemQuery {
        &self.order_items
    }
}

impl DependOnOrderItemModifier for TestModule {
    type OrderItemModifier = FlakyOrderItemRepository;
    fn order_item_modifier(&self) -> &Self::OrderItemModifier {
        &self.order_item_writer
    }
}

impl DependOnWishlistQuery for TestModule {
    type WishlistQuery = InMemoryWishlistRepository;
    fn wishlist_query(&self) -> &Self::WishlistQuery {
        &self.wishlists
    }
}

impl DependOnWishlistModifier for TestModule {
    type WishlistModifier = InMemoryWishlistRepository;
    fn wishlist_modifier(&self) -> &Self::WishlistModifier {
        &self.wishlists
    }
}

impl DependOnCartQuery for TestModule {
    type CartQuery = InMemoryCartRepository;
    fn cart_query(&self) -> &Self::CartQuery {
        &self.carts
    }
}

impl DependOnCartModifier for TestModule {
    type CartModifier = InMemoryCartRepository;
    fn cart_modifier(&self) -> &Self::CartModifier {
        &self.carts
    }
}

impl DependOnOrderJobDispatcher for TestModule {
    type OrderJobDispatcher = RecordingDispatcher;
    fn order_job_dispatcher(&self) -> &Self::OrderJobDispatcher {
        &self.dispatcher
    }
}
