use crate::domain::ports::{
    CheckoutSession, CheckoutSessionParams, CheckoutSessionStatus, PaymentService,
};
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use tracing::error;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Stripe Checkout over the REST API. Form-encoded requests, bearer-key
/// auth; session metadata carries the enrolment payload end to end.
pub struct StripeCheckoutService {
    client: Client,
    secret_key: String,
}

impl StripeCheckoutService {
    pub fn new(secret_key: String) -> Self {
        Self {
            client: Client::new(),
            secret_key,
        }
    }
}

#[async_trait]
impl PaymentService for StripeCheckoutService {
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, AppError> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".into(), "payment".into()),
            ("payment_method_types[0]".into(), "card".into()),
            (
                "line_items[0][price_data][currency]".into(),
                params.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]".into(),
                params.product_name.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]".into(),
                params.amount_cents.to_string(),
            ),
            ("line_items[0][quantity]".into(), "1".into()),
            ("success_url".into(), params.success_url.clone()),
            ("cancel_url".into(), params.cancel_url.clone()),
        ];
        for (key, value) in &params.metadata {
            form.push((format!("metadata[{key}]"), value.clone()));
        }

        let response = self
            .client
            .post(format!("{STRIPE_API_BASE}/checkout/sessions"))
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!("Stripe request failed: {}", e);
                AppError::InternalWithMsg("Could not start payment session".into())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Stripe checkout session failed ({}): {}", status, body);
            return Err(AppError::InternalWithMsg(
                "Could not start payment session".into(),
            ));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            error!("Stripe response decode failed: {}", e);
            AppError::InternalWithMsg("Could not start payment session".into())
        })?;

        let id = body["id"].as_str().unwrap_or_default().to_string();
        let url = body["url"].as_str().unwrap_or_default().to_string();
        if id.is_empty() || url.is_empty() {
            return Err(AppError::InternalWithMsg(
                "Stripe returned an incomplete checkout session".into(),
            ));
        }

        Ok(CheckoutSession { id, url })
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSessionStatus, AppError> {
        let response = self
            .client
            .get(format!("{STRIPE_API_BASE}/checkout/sessions/{session_id}"))
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| {
                error!("Stripe request failed: {}", e);
                AppError::InternalWithMsg("Could not verify payment session".into())
            })?;

        if !response.status().is_success() {
            return Err(AppError::Validation("Payment session not found".into()));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            error!("Stripe response decode failed: {}", e);
            AppError::InternalWithMsg("Could not verify payment session".into())
        })?;

        let payment_status = body["payment_status"].as_str().unwrap_or_default().to_string();
        let metadata: HashMap<String, String> = body["metadata"]
            .as_object()
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Ok(CheckoutSessionStatus {
            payment_status,
            metadata,
        })
    }
}
