//! Message templates for order notifications.
//!
//! Pure string builders; everything network-facing lives in the dispatcher.

use courier_common::types::OrderItem;

/// Instruction sentence for pix orders.
pub const PIX_INSTRUCTION: &str =
    "Para concluir rapidinho, é só pagar usando o Pix Copia e Cola abaixo:";

/// Instruction sentence for bank-billet orders.
pub const BOLETO_INSTRUCTION: &str =
    "Para concluir rapidinho, é só pagar usando o código de barras abaixo:";

/// Return the first whitespace-delimited token of a full name, or an empty
/// string for blank input.
pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or("")
}

/// One `- {product} (qtd {qty})` bullet per item, newline-joined, preserving
/// insertion order.
pub fn item_lines(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|item| format!("- {} (qtd {})", item.product, item.quantity))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The greeting message: order summary plus the payment-specific
/// instruction chosen by the caller.
pub fn greeting(
    first_name: &str,
    order_id: &str,
    total: &str,
    items: &[OrderItem],
    instruction: &str,
) -> String {
    let lines = item_lines(items);
    let formatted_items = if lines.is_empty() {
        String::new()
    } else {
        format!("\n{lines}")
    };

    format!(
        "Oi, {first_name}! 🌺✨\n\
         Aqui é a Carol da Sarat.\n\
         Espero que esteja tudo bem?\n\
         Que alegria ver seu pedido chegando pra gente 💛\n\
         Aqui estão os dados certinhos do seu pedido {order_id}:\n\n\
         📦 Pedido: {order_id}\n\
         🧾 Valor total: R$ {total}\n\
         🛍️ Itens:{formatted_items}\n\n\
         {instruction}"
    )
}

/// Wrap a pix copy-and-paste code in a monospace fence, escaping the
/// asterisk runs of masked codes so the receiving client does not render
/// them as formatting.
pub fn wrap_pix_code(code: &str) -> String {
    let escaped = code.replace("***", "\\*\\*\\*");
    format!("```{escaped}```")
}

/// Billet barcode digit line, sent verbatim.
pub fn plain_payload(code: &str) -> String {
    code.to_string()
}

/// Courtesy message closing every flow, identical for both payment types.
pub fn closing() -> String {
    "Qualquer dúvida é só me chamar por aqui, tá bom? 💛\n\
     Obrigada pela confiança! 🌺"
        .to_string()
}
