//! Deploy and archive export: start an async task, then fold its result back.

use crate::kernel::action::DeployRequest;
use crate::kernel::deploy;
use crate::kernel::effect::PersistKey;
use crate::kernel::error::{LabError, Result};
use crate::kernel::services::ports::{
    ArchiveBlob, ArchiveEntry, ArchiveError, DeployError, DeployOutcome,
};
use crate::kernel::state::Notice;
use crate::kernel::Effect;
use crate::models::Submission;

use super::DispatchResult;

impl super::Store {
    pub(super) fn reduce_deploy(&mut self, request: DeployRequest) -> Result<DispatchResult> {
        if self.state.ui.deploy_in_flight {
            return Err(LabError::Busy("deployment"));
        }
        let plan = deploy::plan(&self.state.files, &request, &self.state.base_branch)?;

        tracing::info!(
            lab = %plan.lab_name,
            namespace = %plan.namespace,
            files = plan.blobs.len(),
            "deploy started"
        );
        self.state.ui.deploy_in_flight = true;
        self.state.ui.pending_submission = Some(Submission::capture(
            &plan.lab_name,
            &plan.author_name,
            &self.state.files,
        ));
        self.notify(Notice::info(format!(
            "Deploying {} file(s) to {}",
            plan.blobs.len(),
            plan.namespace
        )));
        Ok(DispatchResult::changed(vec![Effect::StartDeploy(plan)]))
    }

    pub(super) fn reduce_deploy_finished(
        &mut self,
        result: std::result::Result<DeployOutcome, DeployError>,
    ) -> DispatchResult {
        self.state.ui.deploy_in_flight = false;
        let snapshot = self.state.ui.pending_submission.take();
        match result {
            Ok(outcome) => {
                let submission = snapshot.unwrap_or_else(|| {
                    Submission::capture(&outcome.lab_name, &outcome.author_name, &self.state.files)
                });
                self.state.history.record(submission);
                let short = outcome.commit.get(..7).unwrap_or(outcome.commit.as_str());
                self.notify(Notice::info(format!(
                    "Deployed {} file(s) of '{}' ({short})",
                    outcome.files, outcome.lab_name
                )));
                DispatchResult::changed(vec![Effect::Persist(PersistKey::PreviousSubmissions)])
            }
            Err(err) => {
                self.report(&LabError::NetworkFailure(err.to_string()));
                DispatchResult::changed(Vec::new())
            }
        }
    }

    pub(super) fn reduce_export_archive(&mut self) -> Result<DispatchResult> {
        if self.state.ui.archive_in_flight {
            return Err(LabError::Busy("archive export"));
        }
        if self.state.files.is_empty() {
            return Err(LabError::NoSelection);
        }
        let entries = ArchiveEntry::collect(&self.state.files);
        self.state.ui.archive_in_flight = true;
        Ok(DispatchResult::changed(vec![Effect::StartArchive(entries)]))
    }

    pub(super) fn reduce_archive_finished(
        &mut self,
        result: std::result::Result<ArchiveBlob, ArchiveError>,
    ) -> DispatchResult {
        self.state.ui.archive_in_flight = false;
        match result {
            Ok(blob) => {
                self.notify(Notice::info(format!(
                    "Archive ready: {} ({} bytes)",
                    blob.file_name,
                    blob.bytes.len()
                )));
                self.state.last_archive = Some(blob);
            }
            Err(err) => {
                tracing::warn!(error = %err, "archive export failed");
                self.notify(Notice::error(err.to_string()));
            }
        }
        DispatchResult::changed(Vec::new())
    }
}
