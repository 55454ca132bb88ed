use crate::anki::NoteField;

use super::saved_state::ViewId;

/// A labelled value row, positioned by `ord` within the active note type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub content: String,
    pub ord: usize,
}

impl Field {
    pub fn new(name: &str, content: &str, ord: usize) -> Self {
        Self { name: name.to_string(), content: content.to_string(), ord }
    }

    pub(crate) fn from_note_field(field: NoteField, ord: usize) -> Self {
        Self { name: field.name, content: field.value, ord }
    }
}

/// A row handed to the view host. Restored rows carry the opaque state saved before the
/// previous teardown; the host applies it to a fresh row and assigns a new id.
#[derive(Debug, Clone, PartialEq)]
pub enum EditLine<S> {
    Computed(Field),
    Restored { ord: usize, previous_id: ViewId, state: Option<S> },
}

impl<S> EditLine<S> {
    pub fn ord(&self) -> usize {
        match self {
            EditLine::Computed(field) => field.ord,
            EditLine::Restored { ord, .. } => *ord,
        }
    }

    pub fn field(&self) -> Option<&Field> {
        match self {
            EditLine::Computed(field) => Some(field),
            EditLine::Restored { .. } => None,
        }
    }

    pub fn is_restored(&self) -> bool {
        matches!(self, EditLine::Restored { .. })
    }
}
