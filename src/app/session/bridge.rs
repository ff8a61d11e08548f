use super::Session;
use crate::kernel::error::LabError;
use crate::kernel::services::adapters::{save_key, AppMessage};
use crate::kernel::services::ports::DeployError;
use crate::kernel::{Action, Effect, PersistKey};
use std::collections::BTreeSet;

impl Session {
    /// Dispatches one action and runs its effects. Persistence completes
    /// before this returns; deploy and archive run in the background.
    pub fn handle(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        let mut state_changed = result.state_changed;

        let mut persist = BTreeSet::new();
        let mut follow_ups = Vec::new();
        for effect in result.effects {
            match effect {
                Effect::Persist(key) => {
                    persist.insert(key);
                }
                Effect::StartDeploy(plan) => match &self.source_control {
                    Some(client) => self.runtime.spawn_deploy(client.clone(), plan),
                    None => follow_ups.push(Action::DeployFinished(Err(DeployError::Network(
                        "no source control configured".to_string(),
                    )))),
                },
                Effect::StartArchive(entries) => {
                    self.runtime
                        .spawn_archive(self.archive_writer.clone(), entries);
                }
            }
        }
        if !persist.is_empty() {
            state_changed |= self.persist(persist);
        }

        for action in follow_ups {
            state_changed |= self.handle(action);
        }
        state_changed
    }

    pub(super) fn handle_message(&mut self, msg: AppMessage) -> bool {
        let action = match msg {
            AppMessage::DeployFinished(result) => Action::DeployFinished(result),
            AppMessage::ArchiveFinished(result) => Action::ArchiveFinished(result),
        };
        self.handle(action)
    }

    /// Writes each key once. Failures become notices; memory stays as is.
    fn persist(&mut self, keys: BTreeSet<PersistKey>) -> bool {
        let mut failed = false;
        for key in keys {
            if let Err(e) = save_key(self.storage.as_mut(), key, self.store.state()) {
                self.store.report(&LabError::Storage(e));
                failed = true;
            }
        }
        failed
    }
}
