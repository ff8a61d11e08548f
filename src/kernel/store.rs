use super::error::LabError;
use super::state::Notice;
use super::{markup, Action, AppState, Effect};

mod files;
mod settings;
mod tasks;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    pub(crate) fn unchanged() -> Self {
        Self::default()
    }

    pub(crate) fn changed(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed: true,
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        let mut store = Self { state };
        store.refresh_output();
        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        let result = match action {
            Action::File(op) => self.reduce_file_op(op),
            Action::Confirm => self.reduce_confirm(),
            Action::Cancel => Ok(self.reduce_cancel()),
            Action::EditCurrent { content } => self.reduce_edit_current(&content),
            Action::ToggleFolder { path } => self.reduce_toggle_folder(&path),
            Action::InsertTemplate(template) => self.reduce_insert_template(template),
            Action::RestoreSubmission { id } => self.reduce_restore_submission(&id),
            Action::SetAutoDetect(enabled) => Ok(self.reduce_set_auto_detect(enabled)),
            Action::SetTheme(theme) => Ok(self.reduce_set_theme(theme)),
            Action::Deploy(request) => self.reduce_deploy(request),
            Action::DeployFinished(result) => Ok(self.reduce_deploy_finished(result)),
            Action::ExportArchive => self.reduce_export_archive(),
            Action::ArchiveFinished(result) => Ok(self.reduce_archive_finished(result)),
            Action::DismissNotice => Ok(DispatchResult {
                effects: Vec::new(),
                state_changed: self.state.ui.notice.take().is_some(),
            }),
        };

        match result {
            Ok(result) => result,
            Err(err) => {
                self.report(&err);
                DispatchResult::changed(Vec::new())
            }
        }
    }

    /// Surfaces an error raised outside dispatch, e.g. by persistence.
    pub fn report(&mut self, err: &LabError) {
        tracing::warn!(error = %err, "operation failed");
        self.state.ui.notice = Some(Notice::error(err.to_string()));
    }

    fn notify(&mut self, notice: Notice) {
        self.state.ui.notice = Some(notice);
    }

    /// Regenerates `output` from the open file. Returns whether it changed.
    fn refresh_output(&mut self) -> bool {
        let next = match self.state.current_file.as_deref() {
            Some(path) => match self.state.files.read(path) {
                Ok(content) => markup::convert(path, content, self.state.settings.auto_detect),
                Err(_) => String::new(),
            },
            None => String::new(),
        };
        if next == self.state.output {
            return false;
        }
        self.state.output = next;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
