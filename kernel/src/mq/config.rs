use crate::KernelError;
use error_stack::Report;
use vodca::References;

#[derive(Debug, Clone, References)]
pub struct MQConfig {
    worker_count: usize,
    capacity: usize,
}

impl MQConfig {
    pub fn new(worker_count: usize, capacity: usize) -> error_stack::Result<Self, KernelError> {
        if worker_count == 0 {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("worker_count must be at least 1"));
        }
        if capacity == 0 {
            return Err(
                Report::new(KernelError::Validation).attach_printable("capacity must be at least 1")
            );
        }
        Ok(Self {
            worker_count,
            capacity,
        })
    }
}

impl Default for MQConfig {
    fn default() -> Self {
        Self {
            worker_count: 2,
            capacity: 100,
        }
    }
}

#[cfg(test)]
mod test {
    use super::MQConfig;
    use crate::KernelError;

    #[test]
    fn rejects_empty_pool_or_queue() {
        let zero_workers = MQConfig::new(0, 10).unwrap_err();
        assert_eq!(zero_workers.current_context(), &KernelError::Validation);
        let zero_capacity = MQConfig::new(1, 0).unwrap_err();
        assert_eq!(zero_capacity.current_context(), &KernelError::Validation);

        let config = MQConfig::new(3, 7).unwrap();
        assert_eq!(config.worker_count(), &3);
        assert_eq!(config.capacity(), &7);
    }
}
