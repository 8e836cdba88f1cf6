//! Order request types shared by the builder and the signer.

pub mod order;

pub use order::*;
