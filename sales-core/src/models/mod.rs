mod consultant_share;
mod input_data;
mod profile;

pub use consultant_share::{ConsultantShare, ConsultantShareError};
pub use input_data::{FieldError, FieldKind, FieldValue, InputData, InputField};
pub use profile::{Profile, ProfileDefaults, ProfileVariant};
