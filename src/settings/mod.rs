pub mod data;

pub use data::{
    FieldStateSettings,
    DEFAULT_REMAP_LABEL_MIN_OLD_FIELDS,
    DEFAULT_REMAP_LABEL_TEMPLATE,
};
