use std::io;
use std::sync::mpsc::Sender;
use std::sync::Arc;

use super::message::AppMessage;
use crate::kernel::deploy;
use crate::kernel::services::ports::{
    ArchiveEntry, ArchiveError, ArchiveWriter, DeployPlan, SourceControl,
};

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        Ok(Self { runtime, tx })
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn spawn_deploy(&self, client: Arc<dyn SourceControl>, plan: DeployPlan) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = deploy::deploy(client.as_ref(), &plan).await;
            if let Err(e) = &result {
                tracing::warn!(lab = %plan.lab_name, error = %e, "deploy failed");
            }
            let _ = tx.send(AppMessage::DeployFinished(result));
        });
    }

    pub fn spawn_archive(&self, writer: Arc<dyn ArchiveWriter>, entries: Vec<ArchiveEntry>) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = tokio::task::spawn_blocking(move || writer.write(&entries)).await;
            let result = match result {
                Ok(result) => result,
                Err(e) => Err(ArchiveError::Write(e.to_string())),
            };
            let _ = tx.send(AppMessage::ArchiveFinished(result));
        });
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/async_runtime.rs"]
mod tests;
