//! Publishing a lab to a source-control branch.
//!
//! Planning is synchronous and pure; the remote sequence runs on the runtime.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::kernel::action::DeployRequest;
use crate::kernel::error::{LabError, Result};
use crate::kernel::services::ports::{
    DeployError, DeployOutcome, DeployPlan, SourceControl, TreeBlob,
};
use crate::models::{path_key, FileStore, FileStoreError};

fn whitespace_regex() -> &'static Regex {
    static RE_WS: OnceLock<Regex> = OnceLock::new();
    RE_WS.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// `{lab}/` or `{lab}-{author}/`, whitespace runs replaced by `_`.
pub fn namespace(lab_name: &str, author_name: &str) -> String {
    let lab = whitespace_regex().replace_all(lab_name.trim(), "_");
    let author = author_name.trim();
    if author.is_empty() {
        format!("{lab}/")
    } else {
        let author = whitespace_regex().replace_all(author, "_");
        format!("{lab}-{author}/")
    }
}

/// Files covered by `selected`, in path order. A folder pulls in every file beneath it.
pub fn select_files(files: &FileStore, selected: &[String]) -> Result<Vec<TreeBlob>> {
    let mut picked = BTreeSet::new();
    for path in selected {
        let path = path_key::normalize(path);
        let record = files
            .get(&path)
            .ok_or_else(|| FileStoreError::NotFound(path.clone()))?;
        if record.is_directory {
            picked.extend(
                files
                    .descendants(&path)
                    .filter(|r| !r.is_directory)
                    .map(|r| r.path.clone()),
            );
        } else {
            picked.insert(path);
        }
    }

    Ok(picked
        .into_iter()
        .filter_map(|path| {
            let content = files.read(&path).ok()?.to_string();
            Some(TreeBlob { path, content })
        })
        .collect())
}

pub fn plan(files: &FileStore, request: &DeployRequest, branch: &str) -> Result<DeployPlan> {
    let lab_name = request.lab_name.trim();
    if lab_name.is_empty() {
        return Err(LabError::EmptyInput("lab name"));
    }
    if request.selected.is_empty() {
        return Err(LabError::NoSelection);
    }
    let selected = select_files(files, &request.selected)?;
    if selected.is_empty() {
        return Err(LabError::NoSelection);
    }

    let namespace = namespace(lab_name, &request.author_name);
    let blobs = selected
        .into_iter()
        .map(|blob| TreeBlob {
            path: format!("{namespace}{}", blob.path),
            content: blob.content,
        })
        .collect();
    let message = if request.message.trim().is_empty() {
        format!("Deploy {lab_name}")
    } else {
        request.message.trim().to_string()
    };

    Ok(DeployPlan {
        lab_name: lab_name.to_string(),
        author_name: request.author_name.trim().to_string(),
        branch: branch.to_string(),
        message,
        namespace,
        blobs,
    })
}

/// Head, tree, commit, branch update. Stops at the first failure.
pub async fn deploy(
    client: &dyn SourceControl,
    plan: &DeployPlan,
) -> std::result::Result<DeployOutcome, DeployError> {
    let head = client.branch_head(&plan.branch).await?;
    tracing::debug!(branch = %plan.branch, head = %head, "deploy: branch head");
    let tree = client.create_tree(&head, &plan.blobs).await?;
    let commit = client.create_commit(&plan.message, &tree, &head).await?;
    client.update_branch(&plan.branch, &commit).await?;
    tracing::info!(
        lab = %plan.lab_name,
        branch = %plan.branch,
        commit = %commit,
        files = plan.blobs.len(),
        "deploy finished"
    );

    Ok(DeployOutcome {
        lab_name: plan.lab_name.clone(),
        author_name: plan.author_name.clone(),
        commit,
        files: plan.blobs.len(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/deploy.rs"]
mod tests;
