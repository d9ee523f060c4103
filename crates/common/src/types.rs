use serde::Serialize;

/// Payment method attached to an order, discriminated by the store's
/// internal payment-type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Payment {
    /// Instant payment identified by a copy-and-paste code.
    Pix { code: String },
    /// Payment slip identified by a barcode digit line plus a printable
    /// document hosted at `document_url`.
    BankBillet { code: String, document_url: String },
    /// Any payment-type tag the dispatcher does not recognize.
    Other { kind: String },
}

/// A single line item of an order, in store display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub product: String,
    pub quantity: u32,
}

/// An order-created notification as decoded from the inbound webhook body.
///
/// `id` is the sole idempotency key: two notifications carrying the same id
/// are the same order, whatever the other fields say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderNotification {
    pub id: String,
    pub customer_name: String,
    /// Raw phone string as sent by the store; may be empty or malformed.
    pub customer_phone: String,
    /// Total amount as a display string, never parsed as currency.
    pub total_amount: String,
    pub items: Vec<OrderItem>,
    pub payment: Payment,
}

/// Why a dispatch was skipped without sending anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    AlreadyProcessed,
    MissingPhone,
}

/// Why a dispatch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    /// Structurally malformed notification (missing order id).
    InvalidPayload,
    /// No gateway credential configured; aborted before any network call.
    MissingToken,
    /// The gateway rejected a text or media send mid-sequence.
    SendFailed,
    /// The billet document could not be fetched.
    BoletoDownloadFailed,
    /// The processed-orders store could not be read or written.
    LedgerUnavailable,
}

/// Result of one dispatch invocation. Constructed once, returned to the
/// caller, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Completed,
    Skipped { reason: SkipReason },
    Failed { reason: FailReason, detail: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::AlreadyProcessed => write!(f, "already_processed"),
            SkipReason::MissingPhone => write!(f, "missing_phone"),
        }
    }
}

impl std::fmt::Display for FailReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailReason::InvalidPayload => write!(f, "invalid_payload"),
            FailReason::MissingToken => write!(f, "missing_token"),
            FailReason::SendFailed => write!(f, "send_failed"),
            FailReason::BoletoDownloadFailed => write!(f, "boleto_download_failed"),
            FailReason::LedgerUnavailable => write!(f, "ledger_unavailable"),
        }
    }
}

impl std::fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchOutcome::Completed => write!(f, "completed"),
            DispatchOutcome::Skipped { reason } => write!(f, "skipped:{reason}"),
            DispatchOutcome::Failed { reason, .. } => write!(f, "failed:{reason}"),
        }
    }
}
