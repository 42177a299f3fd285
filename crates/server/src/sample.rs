use client::PaymentClient;
use models::{
    Address, Amount, CreditCard, Details, FundingInstrument, Payee, Payer, Payment, Transaction,
};

pub(crate) const TITLE: &str = "Payment with Credit Card";

/// Outcome of one run of the sample, ready to be rendered.
#[derive(Debug)]
pub struct SampleResult {
    pub title: &'static str,
    pub request: Option<String>,
    pub outcome: Outcome,
}

#[derive(Debug)]
pub enum Outcome {
    Created { payment: Payment, response: String },
    Failed { message: String },
}

/// A sale paid directly with a credit card, on behalf of a third-party payee.
pub fn credit_card_payment() -> Payment {
    let billing_address = Address::default()
        .city("Johnstown")
        .country_code("US")
        .line1("52 N Main ST")
        .postal_code("43210")
        .state("OH");

    let credit_card = CreditCard::default()
        .billing_address(billing_address)
        // Sent as the string "012". An integer literal `012` would be octal in
        // some languages and reach the service as 10.
        .cvv2("012")
        .expire_month(11)
        .expire_year(2018)
        .first_name("Joe")
        .last_name("Shopper")
        .number("4669424246660779")
        .card_type("visa");

    // Total must equal shipping + tax + subtotal.
    let amount = Amount::default()
        .currency("USD")
        .total("7")
        .details(Details::default().shipping("1").subtotal("5").tax("1"));

    let transaction = Transaction::default()
        .amount(amount)
        .payee(Payee::default().email("stevendcoffey-facilitator@gmail.com"))
        .description("This is the payment transaction description.");

    let payer = Payer::default()
        .funding_instruments(vec![FundingInstrument::default().credit_card(credit_card)])
        .payment_method("credit_card");

    Payment::default()
        .intent("sale")
        .payer(payer)
        .transactions(vec![transaction])
}

/// Creates `payment` and captures either the created resource or the
/// failure. Errors are never propagated past this point.
pub async fn run_sample(client: &PaymentClient, payment: &Payment) -> SampleResult {
    match client.create_payment(payment).await {
        Ok(exchange) => {
            tracing::info!(
                id = exchange.resource.id.as_deref().unwrap_or_default(),
                state = exchange.resource.state.as_deref().unwrap_or_default(),
                "created payment"
            );
            SampleResult {
                title: TITLE,
                request: exchange.request,
                outcome: Outcome::Created {
                    payment: exchange.resource,
                    response: exchange.response,
                },
            }
        }
        Err(err) => SampleResult {
            title: TITLE,
            outcome: Outcome::Failed {
                message: err.to_string(),
            },
            request: err.request,
        },
    }
}

#[cfg(test)]
mod tests {
    use client::{
        mock::{MockConfig, MockService},
        ApiContext, Mode,
    };
    use serde_json::json;

    use super::*;

    #[test]
    fn payment_graph() {
        let value = serde_json::to_value(credit_card_payment()).unwrap();
        assert_eq!(value["intent"], "sale");
        assert_eq!(value["payer"]["payment_method"], "credit_card");
        assert_eq!(
            value["payer"]["funding_instruments"][0]["credit_card"],
            json!({
                "number": "4669424246660779",
                "type": "visa",
                "expire_month": 11,
                "expire_year": 2018,
                "cvv2": "012",
                "first_name": "Joe",
                "last_name": "Shopper",
                "billing_address": {
                    "line1": "52 N Main ST",
                    "city": "Johnstown",
                    "country_code": "US",
                    "postal_code": "43210",
                    "state": "OH"
                }
            })
        );
        assert_eq!(
            value["transactions"][0]["amount"],
            json!({
                "currency": "USD",
                "total": "7",
                "details": { "shipping": "1", "subtotal": "5", "tax": "1" }
            })
        );
        assert_eq!(
            value["transactions"][0]["payee"]["email"],
            "stevendcoffey-facilitator@gmail.com"
        );
    }

    #[tokio::test]
    async fn created() {
        let mock = MockService::start_with(MockConfig {
            payment_state: "pending".to_string(),
            ..MockConfig::default()
        })
        .await;
        let client = PaymentClient::new(
            ApiContext::new("client-id", "client-secret", Mode::Sandbox).endpoint(mock.url()),
        );

        let result = run_sample(&client, &credit_card_payment()).await;
        assert_eq!(result.title, "Payment with Credit Card");
        assert_eq!(
            serde_json::from_str::<Payment>(result.request.as_deref().unwrap()).unwrap(),
            credit_card_payment()
        );
        match result.outcome {
            Outcome::Created { payment, response } => {
                assert_eq!(payment.id.as_deref(), Some("PAY-1"));
                // The remote state is reported as is.
                assert_eq!(payment.state.as_deref(), Some("pending"));
                assert_eq!(serde_json::from_str::<Payment>(&response).unwrap(), payment);
            }
            Outcome::Failed { message } => panic!("unexpected failure: {}", message),
        }
    }

    #[tokio::test]
    async fn missing_payer() {
        let mock = MockService::start().await;
        let client = PaymentClient::new(
            ApiContext::new("client-id", "client-secret", Mode::Sandbox).endpoint(mock.url()),
        );

        let mut payment = credit_card_payment();
        payment.payer = None;
        let result = run_sample(&client, &payment).await;

        assert_eq!(
            serde_json::from_str::<Payment>(result.request.as_deref().unwrap()).unwrap(),
            payment
        );
        match result.outcome {
            Outcome::Failed { message } => {
                assert_eq!(message, "Invalid request - see details (status 400)")
            }
            Outcome::Created { .. } => panic!("expected failure"),
        }
    }
}
