pub mod errors;

pub use errors::{
    FieldStateError,
    Result,
};
