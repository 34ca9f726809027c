use indexmap::{map::Entry, IndexMap};
use serde::Serialize;

use crate::{
    error::{ParseError, Result},
    merge::merge_classes,
    types::{class_id, ClassObject, UnionObject},
};

/// The type graph: every class and union discovered so far, in discovery order.
///
/// Each walker step builds its own registry and hands it to its caller, which folds it into its
/// own with [ParseResult::merge]. A registry is consumed by that fold and never touched again.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    pub classes: IndexMap<String, ClassObject>,
    pub unions: IndexMap<String, UnionObject>,
}

impl ParseResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a class, merging it with an existing class of the same id.
    pub fn add_class(mut self, class: ClassObject) -> Result<Self> {
        match self.classes.entry(class.id.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(class);
            }
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();

                if existing.is_input != class.is_input || existing.operation != class.operation {
                    return Err(ParseError::ConflictingClasses { name: class.name });
                }

                merge_classes(existing, class);
            }
        }

        Ok(self)
    }

    pub fn add_union(mut self, union: UnionObject) -> Result<Self> {
        match self.unions.entry(union.name.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(union);
                Ok(self)
            }
            Entry::Occupied(_) => Err(ParseError::DuplicateUnion { name: union.name }),
        }
    }

    /// Folds `other` into `self`, classes first, in `other`'s insertion order.
    pub fn merge(self, other: ParseResult) -> Result<Self> {
        let ParseResult { classes, unions } = other;

        let result = classes.into_values().try_fold(self, ParseResult::add_class)?;

        unions.into_values().try_fold(result, ParseResult::add_union)
    }

    pub fn class(&self, id: &str) -> Option<&ClassObject> {
        self.classes.get(id)
    }

    pub fn output_class(&self, name: &str) -> Option<&ClassObject> {
        self.classes.get(&class_id(name, false))
    }

    /// Input object classes and operations.
    pub fn input_class(&self, name: &str) -> Option<&ClassObject> {
        self.classes.get(&class_id(name, true))
    }

    pub fn operations(&self) -> impl Iterator<Item = &ClassObject> {
        self.classes.values().filter(|class| class.operation.is_some())
    }
}
