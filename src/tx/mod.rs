//! Transaction construction and the signing/submission pipeline.

mod builder;
mod signing;

pub use builder::TransactionBuilder;
pub use signing::{sign_and_submit_transaction, sign_transaction, submit_signed_transaction};
