pub mod types;

pub use types::{
    FieldDefinition,
    Model,
    Note,
    NoteField,
    TemplateFieldMap,
};
