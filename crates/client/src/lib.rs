mod client;
mod context;
mod error;
mod exchange;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use client::PaymentClient;
pub use context::{ApiContext, Mode};
pub use error::{ParseModeError, PayRestError, RequestFailed};
pub use exchange::Exchange;
