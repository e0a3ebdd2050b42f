//! Snapshot document codec
//!
//! Serializes a `TimetableChoices` snapshot to the versioned JSON document
//! format and back. The document stores blocks in their canonical string
//! form and choices as option indices; everything read back goes through
//! the domain constructors, so a hand-edited document that violates an
//! invariant fails with the same errors as any other construction.

use serde::{Deserialize, Serialize};

use crate::domain::block::TimetableBlock;
use crate::domain::class::{Accent, TimetableClass, TimetableOption};
use crate::domain::error::DomainError;
use crate::domain::{Timetable, TimetableChoices};

/// The document version this build reads and writes.
pub const SNAPSHOT_VERSION: &str = "2";

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDoc {
    version: String,
    classes: Vec<ClassDoc>,
    /// One entry per class in timetable order; absent when nothing is
    /// chosen yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    choices: Option<Vec<Option<usize>>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ClassDoc {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    color: String,
    options: Vec<OptionDoc>,
    #[serde(default, skip_serializing_if = "is_false")]
    optional: bool,
}

/// A single-block option is stored as a bare block string, a multi-block
/// option as an array of them.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum OptionDoc {
    Single(String),
    Multi(Vec<String>),
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Serializes a snapshot to the JSON document form.
pub fn to_json(snapshot: &TimetableChoices) -> Result<String, DomainError> {
    let classes = snapshot
        .timetable()
        .classes()
        .iter()
        .map(|class| ClassDoc {
            name: class.name().to_string(),
            kind: class.kind().to_string(),
            color: class.accent().name().to_string(),
            options: class
                .options()
                .iter()
                .map(|option| match option.blocks() {
                    [block] => OptionDoc::Single(block.to_string()),
                    blocks => OptionDoc::Multi(blocks.iter().map(|b| b.to_string()).collect()),
                })
                .collect(),
            optional: class.is_optional(),
        })
        .collect();

    let indices = snapshot.choice_indices()?;
    let doc = SnapshotDoc {
        version: SNAPSHOT_VERSION.to_string(),
        classes,
        choices: indices.iter().any(Option::is_some).then_some(indices),
    };

    serde_json::to_string_pretty(&doc).map_err(|e| DomainError::MalformedDocument(e.to_string()))
}

/// Parses a JSON document into a validated snapshot.
pub fn from_json(input: &str) -> Result<TimetableChoices, DomainError> {
    let doc: SnapshotDoc =
        serde_json::from_str(input).map_err(|e| DomainError::MalformedDocument(e.to_string()))?;
    if doc.version != SNAPSHOT_VERSION {
        return Err(DomainError::UnsupportedVersion(doc.version));
    }

    let mut classes = Vec::with_capacity(doc.classes.len());
    for class_doc in doc.classes {
        let accent = Accent::parse(&class_doc.color)?;
        let mut options = Vec::with_capacity(class_doc.options.len());
        for option_doc in class_doc.options {
            let blocks = match option_doc {
                OptionDoc::Single(text) => vec![TimetableBlock::parse(&text)?],
                OptionDoc::Multi(texts) => texts
                    .iter()
                    .map(|text| TimetableBlock::parse(text))
                    .collect::<Result<_, _>>()?,
            };
            options.push(TimetableOption::new(blocks)?);
        }
        classes.push(TimetableClass::new(
            class_doc.name,
            class_doc.kind,
            accent,
            options,
            class_doc.optional,
        )?);
    }

    let timetable = Timetable::new(classes);
    match doc.choices {
        None => Ok(TimetableChoices::unselected(timetable)),
        Some(indices) => TimetableChoices::from_indices(timetable, &indices),
    }
}
