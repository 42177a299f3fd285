mod config;
mod handler_payment;
mod render;
mod sample;
mod server;
mod state;

pub use config::ServerConfig;
pub use render::render_result;
pub use sample::{credit_card_payment, run_sample, Outcome, SampleResult};
pub use server::{create_app, create_server};
