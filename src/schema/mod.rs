//! Product schema and payload validation.

mod validator;

pub use validator::{
    validate_full, validate_partial, FieldError, Payload, ProductPatch, ValidatedProduct,
    ValidationErrors,
};
