use crate::kernel::action::FileOp;
use crate::kernel::effect::PersistKey;
use crate::kernel::error::{LabError, Result};
use crate::kernel::markup::Template;
use crate::kernel::state::{ConfirmDialogState, Notice, PendingAction};
use crate::kernel::Effect;
use crate::models::{path_key, FileRecord, FileStore, FileStoreError, PathChange};

use super::DispatchResult;

fn required(value: &str, what: &'static str) -> Result<String> {
    let value = path_key::normalize(value.trim());
    if value.is_empty() {
        return Err(LabError::EmptyInput(what));
    }
    Ok(value)
}

impl super::Store {
    pub(super) fn reduce_file_op(&mut self, op: FileOp) -> Result<DispatchResult> {
        match op {
            FileOp::CreateFile { path, content } => {
                let path = required(&path, "file path")?;
                self.state
                    .files
                    .create(FileRecord::file(&path, content))?;
                let mut effects = vec![Effect::Persist(PersistKey::Files)];
                if self.expand_ancestors(&path) {
                    effects.push(Effect::Persist(PersistKey::FolderExpansionState));
                }
                self.state.current_file = Some(path);
                self.refresh_output();
                effects.push(Effect::Persist(PersistKey::CurrentFile));
                Ok(DispatchResult::changed(effects))
            }
            FileOp::CreateFolder { path } => {
                let path = required(&path, "folder path")?;
                self.state.files.create(FileRecord::directory(&path))?;
                let mut effects = vec![Effect::Persist(PersistKey::Files)];
                if self.expand_ancestors(&path) {
                    effects.push(Effect::Persist(PersistKey::FolderExpansionState));
                }
                Ok(DispatchResult::changed(effects))
            }
            FileOp::Rename { path, new_name } => {
                let path = required(&path, "path")?;
                let new_name = new_name.trim();
                if new_name.is_empty() {
                    return Err(LabError::EmptyInput("new name"));
                }
                let change = self.state.files.rename(&path, new_name)?;
                Ok(self.apply_path_change(change))
            }
            FileOp::Move { source, target_dir } => {
                let source = required(&source, "source path")?;
                let target_dir = path_key::normalize(target_dir.trim());
                let change = self.state.files.move_to(&source, &target_dir)?;
                Ok(self.apply_path_change(change))
            }
            FileOp::RequestDelete { path } => {
                let path = required(&path, "path")?;
                let is_dir = match self.state.files.get(&path) {
                    Some(record) => record.is_directory,
                    None if is_folder(&self.state.files, &path) => true,
                    None => return Err(FileStoreError::NotFound(path).into()),
                };
                let message = if is_dir {
                    format!("Delete folder '{path}' and everything in it?")
                } else {
                    format!("Delete '{path}'?")
                };
                self.state.ui.confirm_dialog = ConfirmDialogState {
                    visible: true,
                    message,
                    on_confirm: Some(PendingAction::DeletePath { path, is_dir }),
                };
                Ok(DispatchResult::changed(Vec::new()))
            }
            FileOp::Open { path } => {
                let path = required(&path, "path")?;
                self.state.files.read(&path)?;
                if self.state.current_file.as_deref() == Some(path.as_str()) {
                    return Ok(DispatchResult::unchanged());
                }
                self.state.current_file = Some(path);
                self.refresh_output();
                Ok(DispatchResult::changed(vec![Effect::Persist(
                    PersistKey::CurrentFile,
                )]))
            }
        }
    }

    pub(super) fn reduce_confirm(&mut self) -> Result<DispatchResult> {
        let dialog = std::mem::take(&mut self.state.ui.confirm_dialog);
        let Some(pending) = dialog.on_confirm else {
            return Ok(DispatchResult {
                effects: Vec::new(),
                state_changed: dialog.visible,
            });
        };

        match pending {
            PendingAction::DeletePath { path, .. } => {
                let removed = self.state.files.delete(&path)?;
                let mut effects = vec![Effect::Persist(PersistKey::Files)];
                if self.state.expansion.forget(&removed) {
                    effects.push(Effect::Persist(PersistKey::FolderExpansionState));
                }
                let open_removed = self
                    .state
                    .current_file
                    .as_ref()
                    .is_some_and(|current| removed.contains(current));
                if open_removed {
                    self.state.current_file = None;
                    self.refresh_output();
                    effects.push(Effect::Persist(PersistKey::CurrentFile));
                }
                tracing::info!(path = %path, removed = removed.len(), "deleted");
                Ok(DispatchResult::changed(effects))
            }
        }
    }

    pub(super) fn reduce_cancel(&mut self) -> DispatchResult {
        let was_visible = self.state.ui.confirm_dialog.visible;
        self.state.ui.confirm_dialog = ConfirmDialogState::default();
        DispatchResult {
            effects: Vec::new(),
            state_changed: was_visible,
        }
    }

    pub(super) fn reduce_edit_current(&mut self, content: &str) -> Result<DispatchResult> {
        let path = self
            .state
            .current_file
            .clone()
            .ok_or(LabError::NoSelection)?;
        if !self.state.files.write(&path, content)? {
            return Ok(DispatchResult::unchanged());
        }
        self.refresh_output();
        Ok(DispatchResult::changed(vec![Effect::Persist(
            PersistKey::Files,
        )]))
    }

    pub(super) fn reduce_insert_template(&mut self, template: Template) -> Result<DispatchResult> {
        let current = self.state.current_content().ok_or(LabError::NoSelection)?;
        let next = template.insert_into(current);
        self.reduce_edit_current(&next)
    }

    pub(super) fn reduce_toggle_folder(&mut self, path: &str) -> Result<DispatchResult> {
        let path = required(path, "folder path")?;
        if !is_folder(&self.state.files, &path) {
            return Err(FileStoreError::NotADirectory(path).into());
        }
        self.state.expansion.toggle(&path);
        Ok(DispatchResult::changed(vec![Effect::Persist(
            PersistKey::FolderExpansionState,
        )]))
    }

    pub(super) fn reduce_restore_submission(&mut self, id: &str) -> Result<DispatchResult> {
        let submission = self
            .state
            .history
            .get(id)
            .cloned()
            .ok_or_else(|| LabError::SubmissionNotFound(id.to_string()))?;

        self.state.files.replace_all(submission.files);
        let mut effects = vec![Effect::Persist(PersistKey::Files)];
        let still_live = self
            .state
            .current_file
            .as_deref()
            .is_some_and(|path| self.state.files.read(path).is_ok());
        if !still_live && self.state.current_file.take().is_some() {
            effects.push(Effect::Persist(PersistKey::CurrentFile));
        }
        self.refresh_output();
        self.notify(Notice::info(format!(
            "Restored '{}' from {}",
            submission.lab_name,
            submission.timestamp.format("%Y-%m-%d %H:%M UTC")
        )));
        Ok(DispatchResult::changed(effects))
    }

    /// Follows a rename or move with the open-file pointer and folder flags.
    fn apply_path_change(&mut self, change: PathChange) -> DispatchResult {
        if change.is_noop() {
            return DispatchResult::unchanged();
        }
        let mut effects = vec![Effect::Persist(PersistKey::Files)];

        let moved_current = self
            .state
            .current_file
            .as_deref()
            .and_then(|current| change.resolve(current));
        if let Some(next) = moved_current {
            self.state.current_file = Some(next);
            self.refresh_output();
            effects.push(Effect::Persist(PersistKey::CurrentFile));
        }
        let mut expansion_changed = self.state.expansion.rebase(&change);
        expansion_changed |= self.expand_ancestors(&change.to);
        if expansion_changed {
            effects.push(Effect::Persist(PersistKey::FolderExpansionState));
        }

        tracing::debug!(
            from = %change.from,
            to = %change.to,
            count = change.moved.len(),
            "relocated"
        );
        DispatchResult::changed(effects)
    }

    /// Opens every folder above `path` so it is visible.
    fn expand_ancestors(&mut self, path: &str) -> bool {
        let mut changed = false;
        let mut ancestor = path_key::parent(path);
        while let Some(dir) = ancestor.filter(|dir| !dir.is_empty()) {
            changed |= self.state.expansion.set(dir, true);
            ancestor = path_key::parent(dir);
        }
        changed
    }
}

/// Folder records and implicit folders both count.
fn is_folder(files: &FileStore, path: &str) -> bool {
    match files.get(path) {
        Some(record) => record.is_directory,
        None => files.descendants(path).next().is_some(),
    }
}
