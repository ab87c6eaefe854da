// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{future::Future, time::Duration};

use tokio::{task::JoinHandle, time};

/// A single cancelable timer slot. Scheduling replaces whatever was pending.
///
/// Cancelling only stops work that has not fired yet: once the delay has
/// elapsed the task runs detached and is left to finish.
#[derive(Default)]
pub(crate) struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            drop(tokio::spawn(task));
        }));
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a scheduled task is still waiting for its delay.
    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
