//! Timetables and the current set of choices
//!
//! `TimetableChoices` is the immutable snapshot the rest of the system
//! works from: a timetable plus exactly one choice per class. Every
//! mutation (`with_choice`, `with_class`, `without_class`) produces a new
//! snapshot; violating inputs fail before any state changes. Clash and
//! allocation queries are pure and re-derived on demand.

use crate::domain::block::TimetableBlock;
use crate::domain::class::{TimetableClass, TimetableOption};
use crate::domain::error::DomainError;

/// An ordered list of classes. May be empty; value-duplicate classes are
/// permitted at this level (uniqueness is enforced by the editing
/// operations that require it).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Timetable {
    classes: Vec<TimetableClass>,
}

impl Timetable {
    pub fn new(classes: Vec<TimetableClass>) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &[TimetableClass] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Position of the first class equal to `class` by value.
    pub fn position_of(&self, class: &TimetableClass) -> Option<usize> {
        self.classes.iter().position(|c| c == class)
    }

    pub fn contains(&self, class: &TimetableClass) -> bool {
        self.classes.contains(class)
    }

    /// All blocks of all options of all classes. The grid layout engine
    /// spans this set, not just the chosen blocks, so alternatives stay
    /// visible during a drag.
    pub fn all_blocks(&self) -> impl Iterator<Item = &TimetableBlock> {
        self.classes
            .iter()
            .flat_map(|class| class.options())
            .flat_map(|option| option.blocks())
    }
}

/// The option currently selected for one class, or none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableChoice {
    class: TimetableClass,
    option: Option<TimetableOption>,
}

impl TimetableChoice {
    /// Creates a choice. A non-null option must be one of the class's own
    /// options.
    pub fn new(
        class: TimetableClass,
        option: Option<TimetableOption>,
    ) -> Result<Self, DomainError> {
        if let Some(option) = &option {
            if !class.options().contains(option) {
                return Err(DomainError::ForeignOption(class.name().to_string()));
            }
        }
        Ok(Self { class, option })
    }

    /// A choice with no option selected.
    pub fn unselected(class: TimetableClass) -> Self {
        Self {
            class,
            option: None,
        }
    }

    pub fn class(&self) -> &TimetableClass {
        &self.class
    }

    pub fn option(&self) -> Option<&TimetableOption> {
        self.option.as_ref()
    }
}

/// An immutable snapshot of a timetable together with one choice per class.
///
/// Choices are stored in timetable order regardless of the order they were
/// supplied in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableChoices {
    timetable: Timetable,
    choices: Vec<TimetableChoice>,
}

impl TimetableChoices {
    /// Creates a snapshot from explicit choices.
    ///
    /// The choices must cover the timetable's classes exactly one-to-one;
    /// order does not matter.
    pub fn new(
        timetable: Timetable,
        choices: Vec<TimetableChoice>,
    ) -> Result<Self, DomainError> {
        if choices.len() != timetable.len() {
            return Err(DomainError::ChoiceCountMismatch {
                expected: timetable.len(),
                got: choices.len(),
            });
        }

        for choice in &choices {
            let in_timetable = timetable
                .classes()
                .iter()
                .filter(|c| *c == choice.class())
                .count();
            if in_timetable == 0 {
                return Err(DomainError::ChoiceMismatch);
            }
            let in_choices = choices
                .iter()
                .filter(|c| c.class() == choice.class())
                .count();
            if in_choices > in_timetable {
                return Err(DomainError::DuplicateChoice(
                    choice.class().name().to_string(),
                ));
            }
        }

        // Reorder into timetable order, consuming each supplied choice once.
        let mut remaining = choices;
        let mut ordered = Vec::with_capacity(timetable.len());
        for class in timetable.classes() {
            let index = remaining
                .iter()
                .position(|choice| choice.class() == class)
                .ok_or(DomainError::ChoiceMismatch)?;
            ordered.push(remaining.swap_remove(index));
        }

        Ok(Self {
            timetable,
            choices: ordered,
        })
    }

    /// Creates a snapshot from a parallel array of option indices, one per
    /// class in timetable order (`None` for "no option selected").
    pub fn from_indices(
        timetable: Timetable,
        indices: &[Option<usize>],
    ) -> Result<Self, DomainError> {
        if indices.len() != timetable.len() {
            return Err(DomainError::ChoiceCountMismatch {
                expected: timetable.len(),
                got: indices.len(),
            });
        }

        let mut choices = Vec::with_capacity(indices.len());
        for (class, index) in timetable.classes().iter().zip(indices) {
            let option = match index {
                None => None,
                Some(i) => Some(class.options().get(*i).cloned().ok_or_else(|| {
                    DomainError::ChoiceIndexOutOfRange {
                        class: class.name().to_string(),
                        index: *i,
                    }
                })?),
            };
            choices.push(TimetableChoice { class: class.clone(), option });
        }

        Ok(Self { timetable, choices })
    }

    /// Creates a snapshot with every choice defaulted to "none selected".
    pub fn unselected(timetable: Timetable) -> Self {
        let choices = timetable
            .classes()
            .iter()
            .map(|class| TimetableChoice::unselected(class.clone()))
            .collect();
        Self { timetable, choices }
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// Choices in timetable order.
    pub fn choices(&self) -> &[TimetableChoice] {
        &self.choices
    }

    /// The option currently selected for `class`.
    pub fn chosen_option(&self, class: &TimetableClass) -> Result<Option<&TimetableOption>, DomainError> {
        let position = self
            .timetable
            .position_of(class)
            .ok_or_else(|| DomainError::UnknownClass(class.name().to_string()))?;
        Ok(self.choices[position].option())
    }

    /// The stored choices as option indices, one per class in timetable
    /// order. This is the form the snapshot serialization stores.
    pub fn choice_indices(&self) -> Result<Vec<Option<usize>>, DomainError> {
        self.choices
            .iter()
            .map(|choice| match choice.option() {
                None => Ok(None),
                Some(option) => choice
                    .class()
                    .options()
                    .iter()
                    .position(|o| o == option)
                    .map(Some)
                    .ok_or_else(|| DomainError::ForeignOption(choice.class().name().to_string())),
            })
            .collect()
    }

    /// A new snapshot with the choice for `class` replaced.
    pub fn with_choice(
        &self,
        class: &TimetableClass,
        option: Option<&TimetableOption>,
    ) -> Result<Self, DomainError> {
        let position = self
            .timetable
            .position_of(class)
            .ok_or_else(|| DomainError::UnknownClass(class.name().to_string()))?;
        let replacement = TimetableChoice::new(class.clone(), option.cloned())?;

        let mut choices = self.choices.clone();
        choices[position] = replacement;
        Ok(Self {
            timetable: self.timetable.clone(),
            choices,
        })
    }

    /// A new snapshot with a class added (`old_class` is `None`) or
    /// replaced. A replaced class keeps its choice when the chosen option
    /// still exists in the edited class; otherwise the choice resets.
    pub fn with_class(
        &self,
        new_class: TimetableClass,
        old_class: Option<&TimetableClass>,
    ) -> Result<Self, DomainError> {
        match old_class {
            None => {
                if self.timetable.contains(&new_class) {
                    return Err(DomainError::DuplicateClass(new_class.name().to_string()));
                }
                let mut classes = self.timetable.classes.clone();
                let mut choices = self.choices.clone();
                choices.push(TimetableChoice::unselected(new_class.clone()));
                classes.push(new_class);
                Ok(Self {
                    timetable: Timetable::new(classes),
                    choices,
                })
            }
            Some(old_class) => {
                let position = self
                    .timetable
                    .position_of(old_class)
                    .ok_or_else(|| DomainError::UnknownClass(old_class.name().to_string()))?;
                if new_class != *old_class && self.timetable.contains(&new_class) {
                    return Err(DomainError::DuplicateClass(new_class.name().to_string()));
                }

                let carried = self.choices[position]
                    .option()
                    .filter(|option| new_class.options().contains(option))
                    .cloned();

                let mut classes = self.timetable.classes.clone();
                let mut choices = self.choices.clone();
                choices[position] = TimetableChoice {
                    class: new_class.clone(),
                    option: carried,
                };
                classes[position] = new_class;
                Ok(Self {
                    timetable: Timetable::new(classes),
                    choices,
                })
            }
        }
    }

    /// A new snapshot with `class` and its choice removed.
    pub fn without_class(&self, class: &TimetableClass) -> Result<Self, DomainError> {
        let position = self
            .timetable
            .position_of(class)
            .ok_or_else(|| DomainError::UnknownClass(class.name().to_string()))?;

        let mut classes = self.timetable.classes.clone();
        let mut choices = self.choices.clone();
        classes.remove(position);
        choices.remove(position);
        Ok(Self {
            timetable: Timetable::new(classes),
            choices,
        })
    }

    /// All blocks that participate in a clash between the chosen options of
    /// two different classes. Each offending block appears once, in
    /// discovery order.
    pub fn clashing_blocks(&self) -> Vec<TimetableBlock> {
        let mut clashing: Vec<TimetableBlock> = Vec::new();
        let mut note = |block: &TimetableBlock, out: &mut Vec<TimetableBlock>| {
            if !out.contains(block) {
                out.push(*block);
            }
        };

        for (i, first) in self.choices.iter().enumerate() {
            let Some(a) = first.option() else { continue };
            for second in &self.choices[i + 1..] {
                let Some(b) = second.option() else { continue };
                for block_a in a.blocks() {
                    for block_b in b.blocks() {
                        if block_a.clashes_with(block_b) {
                            note(block_a, &mut clashing);
                            note(block_b, &mut clashing);
                        }
                    }
                }
            }
        }
        clashing
    }

    /// Non-optional classes that have no option selected.
    pub fn unallocated_mandatory_classes(&self) -> Vec<&TimetableClass> {
        self.choices
            .iter()
            .filter(|choice| !choice.class().is_optional() && choice.option().is_none())
            .map(|choice| choice.class())
            .collect()
    }
}
