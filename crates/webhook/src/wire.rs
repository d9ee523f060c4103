//! Wire format of the store's order-created webhook.
//!
//! Field names follow the store's payload verbatim; `into_order` maps the
//! envelope onto the typed notification the dispatcher consumes. Every field
//! except the payment block defaults when absent — only a missing order id
//! is fatal, and the dispatcher enforces that.

use serde::Deserialize;

use courier_common::types::{OrderItem, OrderNotification, Payment};

#[derive(Debug, Deserialize)]
pub struct WebhookEnvelope {
    pub data: OrderData,
}

#[derive(Debug, Default, Deserialize)]
pub struct OrderData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub cliente: CustomerData,
    #[serde(default)]
    pub valor_total: TotalData,
    #[serde(default)]
    pub produtos: Vec<ProductData>,
    #[serde(default)]
    pub pagamento: PaymentData,
}

#[derive(Debug, Default, Deserialize)]
pub struct CustomerData {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub telefone1: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TotalData {
    #[serde(default)]
    pub total: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductData {
    #[serde(default)]
    pub produto: String,
    #[serde(default)]
    pub qtd: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaymentData {
    #[serde(default)]
    pub tipo_interno: String,
    #[serde(default)]
    pub linha_digitavel: String,
    #[serde(rename = "paymentLink", default)]
    pub payment_link: String,
}

impl WebhookEnvelope {
    /// Map the wire envelope onto the dispatcher's notification type.
    pub fn into_order(self) -> OrderNotification {
        let data = self.data;

        let payment = match data.pagamento.tipo_interno.as_str() {
            "pix" => Payment::Pix {
                code: data.pagamento.linha_digitavel,
            },
            "bank_billet" => Payment::BankBillet {
                code: data.pagamento.linha_digitavel,
                document_url: data.pagamento.payment_link,
            },
            other => Payment::Other {
                kind: other.to_string(),
            },
        };

        OrderNotification {
            id: data.id,
            customer_name: data.cliente.nome,
            customer_phone: data.cliente.telefone1,
            total_amount: data.valor_total.total,
            items: data
                .produtos
                .into_iter()
                .map(|product| OrderItem {
                    product: product.produto,
                    quantity: product.qtd,
                })
                .collect(),
            payment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_pix_envelope() {
        let envelope: WebhookEnvelope = serde_json::from_value(serde_json::json!({
            "data": {
                "id": "10490102",
                "cliente": { "nome": "Maria Clara", "telefone1": "(16)99624-6673" },
                "valor_total": { "total": "189,90" },
                "produtos": [
                    { "produto": "Shampoo Sólido", "qtd": 2 },
                    { "produto": "Sabonete", "qtd": 1 }
                ],
                "pagamento": { "tipo_interno": "pix", "linha_digitavel": "0002...CODE" }
            }
        }))
        .unwrap();

        let order = envelope.into_order();
        assert_eq!(order.id, "10490102");
        assert_eq!(order.customer_phone, "(16)99624-6673");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].product, "Shampoo Sólido");
        assert_eq!(
            order.payment,
            Payment::Pix {
                code: "0002...CODE".to_string()
            }
        );
    }

    #[test]
    fn test_decode_bank_billet_envelope() {
        let envelope: WebhookEnvelope = serde_json::from_value(serde_json::json!({
            "data": {
                "id": "10490103",
                "pagamento": {
                    "tipo_interno": "bank_billet",
                    "linha_digitavel": "23793.38128",
                    "paymentLink": "https://example.com/boleto.pdf"
                }
            }
        }))
        .unwrap();

        let order = envelope.into_order();
        assert_eq!(
            order.payment,
            Payment::BankBillet {
                code: "23793.38128".to_string(),
                document_url: "https://example.com/boleto.pdf".to_string()
            }
        );
        assert!(order.items.is_empty());
        assert_eq!(order.customer_name, "");
    }

    #[test]
    fn test_unknown_payment_type_maps_to_other() {
        let envelope: WebhookEnvelope = serde_json::from_value(serde_json::json!({
            "data": {
                "id": "1",
                "pagamento": { "tipo_interno": "credit_card" }
            }
        }))
        .unwrap();

        assert_eq!(
            envelope.into_order().payment,
            Payment::Other {
                kind: "credit_card".to_string()
            }
        );
    }

    #[test]
    fn test_envelope_without_data_is_rejected() {
        let result = serde_json::from_value::<WebhookEnvelope>(serde_json::json!({
            "event": "ping"
        }));
        assert!(result.is_err());
    }
}
