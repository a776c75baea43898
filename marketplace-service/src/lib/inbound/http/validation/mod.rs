pub mod errors;
pub mod extractor;
pub mod sanitize;
pub mod validators;

pub use errors::check;
pub use errors::FieldError;
pub use errors::FieldOrder;
pub use extractor::ValidatedJson;
pub use sanitize::Sanitize;
