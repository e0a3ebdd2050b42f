//! Classes, options and accent colors
//!
//! A `TimetableOption` is one schedulable alternative (for example a lecture
//! plus its lab); a `TimetableClass` is a named unit offering one or more
//! distinct options. Both validate eagerly on construction.

use std::fmt;

use crate::domain::block::TimetableBlock;
use crate::domain::error::DomainError;

/// One of the eight accent colors a class can be shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accent {
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Purple,
    Pink,
}

impl Accent {
    pub const ALL: [Accent; 8] = [
        Accent::Red,
        Accent::Orange,
        Accent::Yellow,
        Accent::Green,
        Accent::Teal,
        Accent::Blue,
        Accent::Purple,
        Accent::Pink,
    ];

    /// Lowercase name used in the snapshot format.
    pub fn name(&self) -> &'static str {
        match self {
            Accent::Red => "red",
            Accent::Orange => "orange",
            Accent::Yellow => "yellow",
            Accent::Green => "green",
            Accent::Teal => "teal",
            Accent::Blue => "blue",
            Accent::Purple => "purple",
            Accent::Pink => "pink",
        }
    }

    /// Parses a lowercase accent name.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|accent| accent.name() == name)
            .ok_or_else(|| DomainError::UnknownAccent(name.to_string()))
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A non-empty list of unique blocks forming one schedulable alternative.
///
/// Options compare element-wise in order: the same blocks in a different
/// order are a different option.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimetableOption {
    blocks: Vec<TimetableBlock>,
}

impl TimetableOption {
    /// Creates an option from its blocks.
    ///
    /// # Errors
    /// - the block list is empty
    /// - the list contains duplicate blocks
    /// - two blocks of the option clash with each other
    pub fn new(blocks: Vec<TimetableBlock>) -> Result<Self, DomainError> {
        if blocks.is_empty() {
            return Err(DomainError::EmptyOption);
        }
        for (i, a) in blocks.iter().enumerate() {
            for b in &blocks[i + 1..] {
                if a == b {
                    return Err(DomainError::DuplicateBlocks);
                }
                if a.clashes_with(b) {
                    return Err(DomainError::SelfClashingOption);
                }
            }
        }
        Ok(Self { blocks })
    }

    /// Convenience constructor for the common single-block option.
    pub fn single(block: TimetableBlock) -> Self {
        Self {
            blocks: vec![block],
        }
    }

    pub fn blocks(&self) -> &[TimetableBlock] {
        &self.blocks
    }
}

/// A named schedulable unit the user must (or, if `optional`, may) pick one
/// option for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimetableClass {
    name: String,
    kind: String,
    accent: Accent,
    options: Vec<TimetableOption>,
    optional: bool,
}

impl TimetableClass {
    /// Creates a class.
    ///
    /// # Errors
    /// - the option list is empty
    /// - two options are equal
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        accent: Accent,
        options: Vec<TimetableOption>,
        optional: bool,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if options.is_empty() {
            return Err(DomainError::NoOptions(name));
        }
        for (i, a) in options.iter().enumerate() {
            if options[i + 1..].contains(a) {
                return Err(DomainError::DuplicateOptions(name));
            }
        }
        Ok(Self {
            name,
            kind: kind.into(),
            accent,
            options,
            optional,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The class type label shown to the user, e.g. "Lecture".
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn accent(&self) -> Accent {
        self.accent
    }

    pub fn options(&self) -> &[TimetableOption] {
        &self.options
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// True when any option of this class consists of more than one block.
    /// Suggestion blocks are labelled in that case so the user can tell
    /// which blocks belong together.
    pub fn has_multi_block_options(&self) -> bool {
        self.options.iter().any(|option| option.blocks().len() > 1)
    }
}
