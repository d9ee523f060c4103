//! Order dispatch pipeline.
//!
//! Takes a decoded order notification and:
//! 1. Validates the required fields
//! 2. Claims the order id in the processed-orders ledger (exactly-once)
//! 3. Normalizes the destination phone (test override wins)
//! 4. Runs the pix or boleto message sequence, in strict order, with a
//!    pause between sends
//! 5. Marks the order processed only after the whole sequence completed

use std::time::Duration;

use courier_common::phone::normalize_phone;
use courier_common::types::{
    DispatchOutcome, FailReason, OrderNotification, Payment, SkipReason,
};
use courier_gateway::{GatewayClient, GatewayError};

use crate::compose;
use crate::ledger::{ProcessedOrders, Reservation};

/// Filename under which the billet document is attached.
const BILLET_FILENAME: &str = "boleto.pdf";

/// Runs the notification dispatch pipeline for one order at a time.
///
/// Dispatches for different order ids may run concurrently; the ledger
/// serializes dispatches that share an id.
pub struct Dispatcher {
    gateway: GatewayClient,
    ledger: ProcessedOrders,
    send_pause: Duration,
    /// Explicit test override; when set, every message goes to this number
    /// instead of the order's own phone.
    test_number: Option<String>,
}

impl Dispatcher {
    pub fn new(
        gateway: GatewayClient,
        ledger: ProcessedOrders,
        send_pause: Duration,
        test_number: Option<String>,
    ) -> Self {
        Self {
            gateway,
            ledger,
            send_pause,
            test_number,
        }
    }

    /// Process one order notification end to end.
    ///
    /// Never panics and never returns `Err`: every failure mode is folded
    /// into the returned [`DispatchOutcome`]. Messages already delivered
    /// when a later send fails are not rolled back; the order is simply
    /// left unmarked so the failure is visible.
    pub async fn process_order(&self, order: &OrderNotification) -> DispatchOutcome {
        // Validating
        if order.id.trim().is_empty() {
            tracing::error!("Rejecting notification without an order id");
            return DispatchOutcome::Failed {
                reason: FailReason::InvalidPayload,
                detail: "order id is empty".to_string(),
            };
        }
        let order_id = order.id.as_str();

        // Deduplicating
        match self.ledger.try_reserve(order_id).await {
            Ok(Reservation::Acquired) => {}
            Ok(Reservation::AlreadyProcessed) => {
                tracing::info!(order_id, "Order already processed — skipping");
                return DispatchOutcome::Skipped {
                    reason: SkipReason::AlreadyProcessed,
                };
            }
            Err(err) => {
                tracing::error!(order_id, error = %err, "Ledger check failed");
                return DispatchOutcome::Failed {
                    reason: FailReason::LedgerUnavailable,
                    detail: err.to_string(),
                };
            }
        }

        // Normalizing
        let number = self.destination_number(order);
        if number.is_empty() {
            tracing::warn!(order_id, "No usable phone number — skipping");
            self.ledger.abandon(order_id).await;
            return DispatchOutcome::Skipped {
                reason: SkipReason::MissingPhone,
            };
        }

        // PixFlow / BoletoFlow
        if let Err(outcome) = self.run_flow(order, &number).await {
            self.ledger.abandon(order_id).await;
            tracing::error!(order_id, outcome = %outcome, "Dispatch failed mid-sequence");
            return outcome;
        }

        // Finalizing
        if let Err(err) = self.ledger.commit(order_id).await {
            tracing::error!(order_id, error = %err, "Ledger mark failed after delivery");
            return DispatchOutcome::Failed {
                reason: FailReason::LedgerUnavailable,
                detail: err.to_string(),
            };
        }

        tracing::info!(order_id, "Dispatch completed");
        DispatchOutcome::Completed
    }

    /// Resolve the destination: test override first, else the order's phone.
    fn destination_number(&self, order: &OrderNotification) -> String {
        let raw = self
            .test_number
            .as_deref()
            .filter(|number| !number.is_empty())
            .unwrap_or(&order.customer_phone);
        normalize_phone(raw)
    }

    async fn run_flow(&self, order: &OrderNotification, number: &str) -> Result<(), DispatchOutcome> {
        let order_id = order.id.as_str();

        match &order.payment {
            Payment::Pix { code } => {
                tracing::info!(order_id, number, "Starting pix flow");
                self.send_greeting(order, number, compose::PIX_INSTRUCTION)
                    .await?;
                self.pause().await;
                self.send_step(number, &compose::wrap_pix_code(code)).await?;
                self.pause().await;
                self.send_step(number, &compose::closing()).await?;
            }
            Payment::BankBillet { code, document_url } => {
                tracing::info!(order_id, number, "Starting boleto flow");
                self.send_greeting(order, number, compose::BOLETO_INSTRUCTION)
                    .await?;
                self.pause().await;
                self.send_step(number, &compose::plain_payload(code)).await?;
                self.pause().await;

                tracing::debug!(order_id, %document_url, "Fetching billet document");
                let document =
                    self.gateway
                        .fetch_document(document_url)
                        .await
                        .map_err(|err| DispatchOutcome::Failed {
                            reason: FailReason::BoletoDownloadFailed,
                            detail: err.to_string(),
                        })?;

                self.gateway
                    .send_media(number, document, BILLET_FILENAME)
                    .await
                    .map_err(failure)?;
                self.pause().await;
                self.send_step(number, &compose::closing()).await?;
            }
            Payment::Other { kind } => {
                // Unknown payment types send nothing but still finalize.
                // TODO: confirm with the store whether these orders should
                // fail loudly instead of being swallowed.
                tracing::warn!(order_id, payment_type = %kind, "Unrecognized payment type — no messages sent");
            }
        }

        Ok(())
    }

    async fn send_greeting(
        &self,
        order: &OrderNotification,
        number: &str,
        instruction: &str,
    ) -> Result<(), DispatchOutcome> {
        let message = compose::greeting(
            compose::first_name(&order.customer_name),
            &order.id,
            &order.total_amount,
            &order.items,
            instruction,
        );
        self.send_step(number, &message).await
    }

    async fn send_step(&self, number: &str, body: &str) -> Result<(), DispatchOutcome> {
        // A skipped send (empty destination) is a no-op, not a hard failure
        self.gateway
            .send_text(number, body)
            .await
            .map(|_| ())
            .map_err(failure)
    }

    async fn pause(&self) {
        if !self.send_pause.is_zero() {
            tokio::time::sleep(self.send_pause).await;
        }
    }
}

/// Map a gateway error to the dispatch failure it aborts the flow with.
fn failure(err: GatewayError) -> DispatchOutcome {
    let reason = match &err {
        GatewayError::MissingToken => FailReason::MissingToken,
        GatewayError::Document { .. } => FailReason::BoletoDownloadFailed,
        GatewayError::Request(_) | GatewayError::Status { .. } => FailReason::SendFailed,
    };

    DispatchOutcome::Failed {
        reason,
        detail: err.to_string(),
    }
}
