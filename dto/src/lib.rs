pub mod application_result;
pub mod formatting;
pub mod wizard;
