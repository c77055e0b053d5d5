use error_stack::ResultExt;
use kernel::interface::mq::MQConfig;
use kernel::KernelError;

use crate::env_or;
use crate::error::ConvertError;

const ORDER_WORKER_COUNT: &str = "ORDER_WORKER_COUNT";
const ORDER_QUEUE_CAPACITY: &str = "ORDER_QUEUE_CAPACITY";
const SERVER_PORT: &str = "SERVER_PORT";

const DEFAULT_WORKER_COUNT: usize = 2;
const DEFAULT_QUEUE_CAPACITY: usize = 100;
const DEFAULT_SERVER_PORT: u16 = 8080;

pub fn order_queue_config() -> error_stack::Result<MQConfig, KernelError> {
    let worker_count = env_or(ORDER_WORKER_COUNT, DEFAULT_WORKER_COUNT)
        .convert_error()
        .attach_printable_lazy(|| format!("Failed to read {ORDER_WORKER_COUNT}"))?;
    let capacity = env_or(ORDER_QUEUE_CAPACITY, DEFAULT_QUEUE_CAPACITY)
        .convert_error()
        .attach_printable_lazy(|| format!("Failed to read {ORDER_QUEUE_CAPACITY}"))?;
    MQConfig::new(worker_count, capacity)
}

pub fn server_port() -> error_stack::Result<u16, KernelError> {
    env_or(SERVER_PORT, DEFAULT_SERVER_PORT)
        .convert_error()
        .attach_printable_lazy(|| format!("Failed to read {SERVER_PORT}"))
}
