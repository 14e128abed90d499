//! Plausibility validation of converted cell values.

pub mod issue;
pub mod validator;

pub use issue::Issue;
pub use validator::{
    Validator, validate_dates, validate_marital_status, validate_mother_tongue,
    validate_person_name,
};
