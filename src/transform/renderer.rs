//! Exclusive access to a sink.
//!
//! A renderer serves one document at a time. Callers queue on an async
//! mutex and give up with [`ReceiptError::RendererBusy`] once the
//! configured lock timeout passes.

use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use super::transform;
use crate::error::{ReceiptError, Result};
use crate::printer::PrinterConfig;
use crate::sink::CommandSink;

pub struct Renderer<S> {
    sink: Mutex<S>,
}

impl<S: CommandSink> Renderer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Wait up to `timeout` for exclusive use of the sink.
    pub async fn acquire(&self, timeout: Duration) -> Result<MutexGuard<'_, S>> {
        match tokio::time::timeout(timeout, self.sink.lock()).await {
            Ok(guard) => {
                debug!("renderer lock acquired");
                Ok(guard)
            }
            Err(_) => Err(ReceiptError::RendererBusy {
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }

    /// Transform a document once the sink is free.
    pub async fn transform(&self, doc: &str, config: &PrinterConfig) -> Result<()> {
        let mut sink = self.acquire(config.lock_timeout()).await?;
        transform(doc, config, &mut *sink).await
    }

    pub fn into_inner(self) -> S {
        self.sink.into_inner()
    }
}
