mod registrant_email;
mod region;
mod registration;

pub use registrant_email::RegistrantEmail;
pub use region::Region;
pub use registration::{Registration, ValidationError};
