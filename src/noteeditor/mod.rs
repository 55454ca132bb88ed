pub mod change_type;
pub mod field;
pub mod field_state;
pub mod remap;
pub mod saved_state;


pub use change_type::{
    ChangeKind,
    FieldChangeType,
    ModelChange,
    SlotRemapTable,
};
pub use field::{
    EditLine,
    Field,
};
pub use field_state::FieldState;
pub use remap::remap_fields;
pub use saved_state::{
    capture,
    capture_bundle,
    InstanceStateBundle,
    RestorableRowState,
    RowStateLookup,
    SavedInstanceState,
    ViewHierarchyState,
    ViewId,
};
