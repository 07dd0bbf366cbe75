use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use autobuild::engine::{BuildRequest, Trigger};
use autobuild::errors::Result;
use autobuild::exec::ExecutorBackend;

/// A fake executor that records which builds were requested and runs
/// nothing.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<BuildRequest>>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<BuildRequest> {
        self.executed.lock().unwrap().clone()
    }

    /// `(profile index, trigger label)` for every recorded request.
    pub fn triggers(&self) -> Vec<(usize, String)> {
        self.requests()
            .iter()
            .map(|r| (r.profile.index, r.trigger.label()))
            .collect()
    }

    pub fn init_count(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.trigger == Trigger::Init)
            .count()
    }
}

impl ExecutorBackend for FakeExecutor {
    fn spawn_build(
        &mut self,
        request: BuildRequest,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let executed = Arc::clone(&self.executed);

        Box::pin(async move {
            executed.lock().unwrap().push(request);
            Ok(())
        })
    }
}
