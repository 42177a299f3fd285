use crate::{Outcome, SampleResult};

/// Renders a sample run as a standalone HTML page.
pub fn render_result(result: &SampleResult) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(result.title)));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(result.title)));

    match &result.outcome {
        Outcome::Created { payment, .. } => html.push_str(&format!(
            "<p class=\"success\">Created payment <code>{}</code> with state <code>{}</code></p>\n",
            escape(payment.id.as_deref().unwrap_or_default()),
            escape(payment.state.as_deref().unwrap_or_default()),
        )),
        Outcome::Failed { message } => html.push_str(&format!(
            "<h2>Error</h2>\n<pre class=\"error\">{}</pre>\n",
            escape(message)
        )),
    }

    if let Some(request) = &result.request {
        html.push_str(&format!(
            "<h2>Request</h2>\n<pre class=\"request\">{}</pre>\n",
            escape(&pretty(request))
        ));
    }
    if let Outcome::Created { response, .. } = &result.outcome {
        html.push_str(&format!(
            "<h2>Response</h2>\n<pre class=\"response\">{}</pre>\n",
            escape(&pretty(response))
        ));
    }

    html.push_str("</body>\n</html>\n");
    html
}

// Bodies that are not JSON are shown as sent.
fn pretty(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| body.to_string())
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            ch => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use models::Payment;

    use super::*;

    #[test]
    fn created() {
        let html = render_result(&SampleResult {
            title: "Payment with Credit Card",
            request: Some(r#"{"intent":"sale"}"#.to_string()),
            outcome: Outcome::Created {
                payment: Payment::default().id("PAY-1").state("approved"),
                response: r#"{"id":"PAY-1","state":"approved"}"#.to_string(),
            },
        });

        assert!(html.contains("<h1>Payment with Credit Card</h1>"));
        assert!(html.contains("<code>PAY-1</code> with state <code>approved</code>"));
        assert!(html.contains("&quot;intent&quot;: &quot;sale&quot;"));
        assert!(html.contains("<pre class=\"response\">"));
        assert!(!html.contains("<h2>Error</h2>"));
    }

    #[test]
    fn failed() {
        let html = render_result(&SampleResult {
            title: "Payment with Credit Card",
            request: Some("<not json>".to_string()),
            outcome: Outcome::Failed {
                message: "Invalid request - see details (status 400)".to_string(),
            },
        });

        assert!(html.contains(
            "<pre class=\"error\">Invalid request - see details (status 400)</pre>"
        ));
        assert!(html.contains("<pre class=\"request\">&lt;not json&gt;</pre>"));
        assert!(!html.contains("<h2>Response</h2>"));
    }

    #[test]
    fn failed_without_request() {
        let html = render_result(&SampleResult {
            title: "Payment with Credit Card",
            request: None,
            outcome: Outcome::Failed {
                message: "error sending request".to_string(),
            },
        });
        assert!(!html.contains("<h2>Request</h2>"));
    }
}
