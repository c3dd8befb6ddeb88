pub mod validator;

pub use validator::{quiet_validate, validate};
