pub mod notify;
pub mod sanction;
