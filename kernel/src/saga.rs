use crate::KernelError;
use error_stack::Report;
use tracing::{debug, error, warn};

/// One forward action of a [`Saga`] together with the action that undoes it.
#[async_trait::async_trait]
pub trait SagaStep<C: Send, S: Send>: Send + Sync {
    fn name(&self) -> &str;
    async fn execute(&self, con: &mut C, state: &mut S) -> error_stack::Result<(), KernelError>;
    async fn compensate(&self, con: &mut C, state: &mut S)
        -> error_stack::Result<(), KernelError>;
}

/// Ordered steps executed against one connection.
///
/// When a step fails, every step that already completed is compensated in
/// reverse order and the step's error is returned. If a compensation fails as
/// well the store may hold partial writes; that case is logged and reported as
/// [`KernelError::Internal`] carrying both the step error and the
/// compensation errors.
pub struct Saga<'a, C, S> {
    name: &'static str,
    steps: Vec<Box<dyn SagaStep<C, S> + 'a>>,
}

impl<'a, C: Send, S: Send> Saga<'a, C, S> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    pub fn step(mut self, step: impl SagaStep<C, S> + 'a) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub async fn run(self, con: &mut C, state: &mut S) -> error_stack::Result<(), KernelError> {
        let mut completed = Vec::with_capacity(self.steps.len());
        for step in self.steps.iter() {
            match step.execute(con, state).await {
                Ok(()) => {
                    debug!(saga = self.name, step = step.name(), "step completed");
                    completed.push(step);
                }
                Err(report) => {
                    warn!(
                        saga = self.name,
                        step = step.name(),
                        "step failed, compensating {} completed step(s)",
                        completed.len()
                    );
                    let mut failures: Option<Report<KernelError>> = None;
                    for done in completed.into_iter().rev() {
                        if let Err(compensation) = done.compensate(con, state).await {
                            error!(
                                saga = self.name,
                                step = done.name(),
                                "compensation failed, store may hold partial writes: {compensation:?}"
                            );
                            failures = Some(match failures.take() {
                                None => compensation,
                                Some(mut failures) => {
                                    failures.extend_one(compensation);
                                    failures
                                }
                            });
                        }
                    }
                    return match failures {
                        None => Err(report),
                        Some(failures) => {
                            let mut report = report
                                .change_context(KernelError::Internal)
                                .attach_printable(format!(
                                    "saga `{}` could not undo completed steps",
                                    self.name
                                ));
                            report.extend_one(failures);
                            Err(report)
                        }
                    };
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Saga, SagaStep};
    use crate::KernelError;
    use error_stack::Report;

    struct Record {
        name: &'static str,
        fail: bool,
        fail_compensation: bool,
    }

    impl Record {
        fn ok(name: &'static str) -> Self {
            Self {
                name,
                fail: false,
                fail_compensation: false,
            }
        }
    }

    #[async_trait::async_trait]
    impl SagaStep<(), Vec<String>> for Record {
        fn name(&self) -> &str {
            self.name
        }

        async fn execute(
            &self,
            _: &mut (),
            log: &mut Vec<String>,
        ) -> error_stack::Result<(), KernelError> {
            if self.fail {
                return Err(Report::new(KernelError::Validation));
            }
            log.push(format!("do {}", self.name));
            Ok(())
        }

        async fn compensate(
            &self,
            _: &mut (),
            log: &mut Vec<String>,
        ) -> error_stack::Result<(), KernelError> {
            if self.fail_compensation {
                return Err(Report::new(KernelError::Timeout));
            }
            log.push(format!("undo {}", self.name));
            Ok(())
        }
    }

    #[tokio::test]
    async fn runs_all_steps() {
        let mut log = Vec::new();
        Saga::new("test")
            .step(Record::ok("a"))
            .step(Record::ok("b"))
            .run(&mut (), &mut log)
            .await
            .unwrap();
        assert_eq!(log, vec!["do a", "do b"]);
    }

    #[tokio::test]
    async fn compensates_in_reverse_and_returns_step_error() {
        let mut log = Vec::new();
        let failing = Record {
            name: "c",
            fail: true,
            fail_compensation: false,
        };
        let report = Saga::new("test")
            .step(Record::ok("a"))
            .step(Record::ok("b"))
            .step(failing)
            .run(&mut (), &mut log)
            .await
            .unwrap_err();
        assert_eq!(log, vec!["do a", "do b", "undo b", "undo a"]);
        assert_eq!(report.current_context(), &KernelError::Validation);
    }

    #[tokio::test]
    async fn failed_compensation_is_internal() {
        let mut log = Vec::new();
        let stuck = Record {
            name: "a",
            fail: false,
            fail_compensation: true,
        };
        let failing = Record {
            name: "c",
            fail: true,
            fail_compensation: false,
        };
        let report = Saga::new("test")
            .step(stuck)
            .step(Record::ok("b"))
            .step(failing)
            .run(&mut (), &mut log)
            .await
            .unwrap_err();
        assert_eq!(log, vec!["do a", "do b", "undo b"]);
        assert_eq!(report.current_context(), &KernelError::Internal);
    }
}
