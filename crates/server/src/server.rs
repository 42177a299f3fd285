use std::{future::Future, io::Result as IoResult, sync::Arc};

use client::PaymentClient;
use poem::{
    endpoint::make_sync,
    get,
    listener::TcpListener,
    middleware::{NormalizePath, TrailingSlash},
    Endpoint, EndpointExt, Route, Server,
};

use crate::{handler_payment::handler_payment, state::State, ServerConfig};

/// Routes of the sample application, calling the remote API through `client`.
pub fn create_app(client: PaymentClient) -> impl Endpoint {
    Route::new()
        .at(
            "/payments/credit-card",
            get(handler_payment).post(handler_payment),
        )
        .at("/health", get(make_sync(|_| "OK")))
        .with(NormalizePath::new(TrailingSlash::Trim))
        .data(State {
            client: Arc::new(client),
        })
}

pub fn create_server(config: ServerConfig) -> impl Future<Output = IoResult<()>> {
    let context = config.api_context();
    tracing::info!(
        mode = %context.mode(),
        endpoint = context.base_url(),
        "api context"
    );
    let app = create_app(PaymentClient::new(context));

    tracing::info!(bind = config.bind.as_str(), "listening");
    let server = Server::new(TcpListener::bind(config.bind));
    server.run(app)
}

#[cfg(test)]
mod tests {
    use client::{mock::MockService, ApiContext, Mode};
    use poem::test::TestClient;

    use super::*;

    fn app(mock: &MockService) -> impl Endpoint {
        create_app(PaymentClient::new(
            ApiContext::new("client-id", "client-secret", Mode::Sandbox).endpoint(mock.url()),
        ))
    }

    #[tokio::test]
    async fn get_and_post_create_payment() {
        let mock = MockService::start().await;
        let cli = TestClient::new(app(&mock));

        let resp = cli.get("/payments/credit-card").send().await;
        resp.assert_status_is_ok();
        let html = resp.0.into_body().into_string().await.unwrap();
        assert!(html.contains("<code>PAY-1</code> with state <code>approved</code>"));
        assert!(html.contains("4669424246660779"));

        let resp = cli.post("/payments/credit-card/").send().await;
        resp.assert_status_is_ok();
        let html = resp.0.into_body().into_string().await.unwrap();
        assert!(html.contains("<code>PAY-2</code>"));
    }

    #[tokio::test]
    async fn failure_is_rendered() {
        let cli = TestClient::new(create_app(PaymentClient::new(
            ApiContext::new("client-id", "client-secret", Mode::Sandbox)
                .endpoint("http://127.0.0.1:1"),
        )));

        let resp = cli.get("/payments/credit-card").send().await;
        resp.assert_status_is_ok();
        let html = resp.0.into_body().into_string().await.unwrap();
        assert!(html.contains("<h2>Error</h2>"));
        assert!(html.contains("<h2>Request</h2>"));
        assert!(!html.contains("<h2>Response</h2>"));
    }

    #[tokio::test]
    async fn health() {
        let mock = MockService::start().await;
        let cli = TestClient::new(app(&mock));

        let resp = cli.get("/health").send().await;
        resp.assert_status_is_ok();
        resp.assert_text("OK").await;
    }
}
