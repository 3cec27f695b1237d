//! Restarter that records requested restarts instead of running a command

use futures::future::BoxFuture;
use std::sync::Mutex;

use watchdog::{RestartActionError, Restarter};

pub struct RecordingRestarter {
    calls: Mutex<Vec<String>>,
    exit_code: i32,
}

impl RecordingRestarter {
    /// Every restart succeeds
    pub fn succeeding() -> Self {
        Self::with_exit_code(0)
    }

    /// Every restart fails with `exit_code`
    pub fn with_exit_code(exit_code: i32) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            exit_code,
        }
    }

    /// Service names passed to `restart`, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Restarter for RecordingRestarter {
    fn restart<'a>(
        &'a self,
        service_name: &'a str,
    ) -> BoxFuture<'a, Result<(), RestartActionError>> {
        self.calls.lock().unwrap().push(service_name.to_string());
        let result = if self.exit_code == 0 {
            Ok(())
        } else {
            Err(RestartActionError::NonZeroExit {
                service_name: service_name.to_string(),
                code: Some(self.exit_code),
                stderr: String::new(),
            })
        };
        Box::pin(async move { result })
    }
}
