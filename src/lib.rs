pub mod anki;
pub mod core;
pub mod noteeditor;
pub mod persistence;
pub mod settings;

pub use anki::{
    Model,
    Note,
    NoteField,
    TemplateFieldMap,
};
pub use crate::core::{
    FieldStateError,
    Result,
};
pub use noteeditor::{
    EditLine,
    Field,
    FieldChangeType,
    FieldState,
    SavedInstanceState,
    SlotRemapTable,
};
pub use settings::FieldStateSettings;
