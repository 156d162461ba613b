//! Order placement.
//!
//! `OrderService::place_order` is the one operation in this crate with a
//! real correctness invariant: stock must never be oversold. The sequence is
//!
//! 1. validate the request (`InvalidRequest`),
//! 2. take the product's lock,
//! 3. load the product (`NotFound`),
//! 4. check stock (`InsufficientStock`),
//! 5. write the decremented product and the new order in one batch.
//!
//! Nothing is written unless step 5 is reached, and step 5 is all-or-nothing.
//! The product update also carries the version read in step 3, so a writer
//! that skipped the lock would get a conflict rather than a lost update.

mod error;
mod order;
mod service;

pub use error::OrderError;
pub use order::{Order, PlacedOrder};
pub use service::OrderService;
