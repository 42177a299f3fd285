use poem::{
    handler,
    web::{Data, Html},
};

use crate::{render_result, sample, state::State};

#[handler]
pub(crate) async fn handler_payment(state: Data<&State>) -> Html<String> {
    tracing::debug!(title = sample::TITLE, "run sample");

    let result = sample::run_sample(&state.client, &sample::credit_card_payment()).await;
    Html(render_result(&result))
}
