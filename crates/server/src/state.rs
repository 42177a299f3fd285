use std::sync::Arc;

use client::PaymentClient;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) client: Arc<PaymentClient>,
}
