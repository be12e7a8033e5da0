//! Athlete profile: the physiological and psychological baseline every routine
//! is generated from. One profile per account.

pub mod handlers;
pub mod store;
pub mod validation;
