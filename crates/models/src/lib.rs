#[macro_use]
mod macros;

mod batch;
mod error;
mod patch;
mod payment;
mod pointer;

pub use batch::PatchBatch;
pub use error::{ErrorDetails, ErrorResponse, PatchError};
pub use patch::Patch;
pub use payment::{
    Address, Amount, CreditCard, Details, FundingInstrument, Links, Payee, Payer, PayerInfo,
    Payment, Transaction,
};
pub use pointer::parse_pointer;
