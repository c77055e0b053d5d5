use crate::handler::AppModule;
use application::service::HandleOrderJobService;
use driver::mq::InProcessMessageQueue;
use kernel::interface::job::OrderJob;
use kernel::interface::mq::{MQConfig, MessageQueue};

pub type OrderQueue = InProcessMessageQueue<AppModule, OrderJob>;

pub fn init_order_queue(config: MQConfig) -> OrderQueue {
    InProcessMessageQueue::new("order_jobs", config)
}

pub fn start_order_workers(queue: &OrderQueue, module: AppModule) {
    queue.start_workers(module, |module: AppModule, job: OrderJob| async move {
        module.handle_order_job(job).await
    });
}
