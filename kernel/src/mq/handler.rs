use crate::mq::ErrorOperation;
use std::future::Future;
use std::pin::Pin;

pub type HandlerResult =
    Pin<Box<dyn Future<Output = error_stack::Result<(), ErrorOperation>> + Send>>;

// Same shape as axum's `Handler`: any cloneable async closure `(module, job)`
// can be handed to the worker pool.
pub trait Handler<M, T>: 'static + Clone + Send + Sync {
    fn call(self, module: M, data: T) -> HandlerResult;
}

impl<Fn, Res, M, T> Handler<M, T> for Fn
where
    Fn: 'static + Clone + Send + Sync + FnOnce(M, T) -> Res,
    Res: Future<Output = error_stack::Result<(), ErrorOperation>> + Send + 'static,
    M: 'static + Send,
    T: 'static + Send,
{
    fn call(self, module: M, data: T) -> HandlerResult {
        Box::pin(async move { self(module, data).await })
    }
}
