//! Lab layout and the platform's `index.json` descriptor.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::models::{path_key, FileStore};

pub const INDEX_FILE: &str = "index.json";
pub const INTRO_FILE: &str = "intro.md";
pub const SETUP_FILE: &str = "setup.sh";
pub const FOREGROUND_FILE: &str = "foreground.sh";
pub const FINISH_FILE: &str = "finish.md";
pub const STEP_TEXT_FILE: &str = "text.md";
pub const STEP_VERIFY_FILE: &str = "verify.sh";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexJson {
    pub title: String,
    pub description: String,
    pub details: IndexDetails,
    pub backend: IndexBackend,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<IndexIntro>,
    #[serde(default)]
    pub steps: Vec<IndexStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<IndexFinish>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexIntro {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStep {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFinish {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexBackend {
    pub imageid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabStepFile {
    pub number: u32,
    pub folder: String,
    pub text_file: Option<String>,
    pub verify_file: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabFiles {
    pub intro_file: Option<String>,
    pub setup_file: Option<String>,
    pub foreground_file: Option<String>,
    pub finish_file: Option<String>,
    /// Ordered by step number.
    pub steps: Vec<LabStepFile>,
}

fn step_folder_regex() -> &'static Regex {
    static RE_STEP: OnceLock<Regex> = OnceLock::new();
    RE_STEP.get_or_init(|| Regex::new(r"^step(\d+)$").expect("valid step folder regex"))
}

fn step_number(folder: &str) -> Option<u32> {
    step_folder_regex()
        .captures(folder)
        .and_then(|caps| caps[1].parse().ok())
}

/// Classifies top-level lab files. Step folders may be implicit.
pub fn scan_lab_files(files: &FileStore) -> LabFiles {
    let mut lab = LabFiles::default();
    let mut steps: BTreeMap<u32, LabStepFile> = BTreeMap::new();

    for record in files.iter() {
        let segments: Vec<&str> = path_key::segments(&record.path).collect();
        match segments.as_slice() {
            [name] if !record.is_directory => {
                let slot = match *name {
                    INTRO_FILE => &mut lab.intro_file,
                    SETUP_FILE => &mut lab.setup_file,
                    FOREGROUND_FILE => &mut lab.foreground_file,
                    FINISH_FILE => &mut lab.finish_file,
                    _ => continue,
                };
                *slot = Some(record.path.clone());
            }
            [folder, rest @ ..] => {
                let Some(number) = step_number(folder) else {
                    continue;
                };
                let step = steps.entry(number).or_insert_with(|| LabStepFile {
                    number,
                    folder: folder.to_string(),
                    ..LabStepFile::default()
                });
                match rest {
                    [STEP_TEXT_FILE] if !record.is_directory => {
                        step.text_file = Some(record.path.clone())
                    }
                    [STEP_VERIFY_FILE] if !record.is_directory => {
                        step.verify_file = Some(record.path.clone())
                    }
                    _ => {}
                }
            }
            [] => {}
        }
    }

    lab.steps = steps.into_values().collect();
    lab
}

pub fn generate_index(title: &str, description: &str, imageid: &str, lab: &LabFiles) -> IndexJson {
    let intro = lab.intro_file.as_ref().map(|text| IndexIntro {
        text: text.clone(),
        background: lab.setup_file.clone(),
        foreground: lab.foreground_file.clone(),
    });
    let steps = lab
        .steps
        .iter()
        .map(|step| IndexStep {
            title: format!("Step {}", step.number),
            text: step.text_file.clone(),
            verify: step.verify_file.clone(),
        })
        .collect();
    let finish = lab
        .finish_file
        .as_ref()
        .map(|text| IndexFinish { text: text.clone() });

    IndexJson {
        title: title.to_string(),
        description: description.to_string(),
        details: IndexDetails {
            intro,
            steps,
            finish,
        },
        backend: IndexBackend {
            imageid: imageid.to_string(),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/lab.rs"]
mod tests;
