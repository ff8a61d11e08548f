//! A single editing session over persisted state.

use crate::kernel::error::Result;
use crate::kernel::markup::render_preview;
use crate::kernel::services::adapters::{
    AppMessage, AsyncRuntime, CmarkRenderer, GzipBundleWriter, PersistedState,
};
use crate::kernel::services::ports::{
    AppConfig, ArchiveWriter, KeyValueStore, MarkdownRenderer, SourceControl,
};
use crate::kernel::{AppState, Store};
use crate::models::TreeRow;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};

mod bridge;

pub struct Session {
    store: Store,
    storage: Box<dyn KeyValueStore>,
    runtime: AsyncRuntime,
    rx: Receiver<AppMessage>,
    source_control: Option<Arc<dyn SourceControl>>,
    archive_writer: Arc<dyn ArchiveWriter>,
    renderer: Box<dyn MarkdownRenderer>,
}

impl Session {
    pub fn open(storage: Box<dyn KeyValueStore>, config: &AppConfig) -> Result<Self> {
        let state = PersistedState::load(storage.as_ref()).into_app_state(config);
        let (tx, rx) = mpsc::channel();
        let runtime = AsyncRuntime::new(tx)?;
        Ok(Self {
            store: Store::new(state),
            storage,
            runtime,
            rx,
            source_control: None,
            archive_writer: Arc::new(GzipBundleWriter::default()),
            renderer: Box::new(CmarkRenderer::new()),
        })
    }

    pub fn with_source_control(mut self, client: Arc<dyn SourceControl>) -> Self {
        self.source_control = Some(client);
        self
    }

    pub fn with_archive_writer(mut self, writer: Arc<dyn ArchiveWriter>) -> Self {
        self.archive_writer = writer;
        self
    }

    pub fn with_renderer(mut self, renderer: Box<dyn MarkdownRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Drains finished background tasks. Returns whether state changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.rx.try_recv() {
            changed |= self.handle_message(msg);
        }
        changed
    }

    /// Blocks until no task is in flight or `timeout` elapses. Returns
    /// whether the session went idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_busy() {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return false;
            };
            match self.rx.recv_timeout(remaining) {
                Ok(msg) => {
                    self.handle_message(msg);
                }
                Err(_) => return false,
            }
        }
        true
    }

    pub fn is_busy(&self) -> bool {
        let ui = &self.store.state().ui;
        ui.deploy_in_flight || ui.archive_in_flight
    }

    /// HTML preview of the open file's generated Markdown.
    pub fn preview_html(&self) -> String {
        render_preview(self.renderer.as_ref(), &self.store.state().output)
    }

    pub fn tree_rows(&self) -> Vec<TreeRow> {
        self.store.state().tree().flatten_for_view()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/session.rs"]
mod tests;
