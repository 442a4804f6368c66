//! Terminal presentation of cart views and action outcomes.

use std::fmt::Display;
use std::io::Write;

use marmita_storefront::{CartRenderer, CartView, Catalog, Outcome, Overlays};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Writes each rendered cart view to `out`.
pub struct TerminalRenderer<W> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> TerminalRenderer<W> {
    pub const fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CartRenderer for TerminalRenderer<W> {
    fn render(&mut self, view: &CartView) {
        let result = match self.format {
            OutputFormat::Text => write_view(&mut self.out, view),
            OutputFormat::Json => writeln!(self.out, "{}", json!({ "view": view })),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to write cart view");
        }
    }
}

fn write_view(out: &mut impl Write, view: &CartView) -> std::io::Result<()> {
    writeln!(out, "── Carrinho ({} itens) ──", view.item_count)?;
    if view.show_empty_state {
        writeln!(out, "  {}", marmita_storefront::view::EMPTY_CART_MESSAGE)?;
    }
    for row in &view.rows {
        writeln!(
            out,
            "  {:<28} Qtd: {:<3} {:>12}",
            row.name, row.quantity, row.line_price
        )?;
    }
    let checkout = if view.checkout_enabled {
        "finalizar pedido"
    } else {
        "finalizar pedido indisponível"
    };
    writeln!(out, "  Total: {}   [{checkout}]", view.total)
}

/// Describe an outcome for the shopper.
pub fn describe(outcome: &Outcome, catalog: &Catalog) -> String {
    let name = |id: &marmita_core::ProductId| {
        catalog
            .get(id)
            .map_or_else(|| id.to_string(), |p| p.name.clone())
    };

    match outcome {
        Outcome::Added { product_id } => format!("+ {} adicionado ao carrinho", name(product_id)),
        Outcome::AllergyPrompt {
            product_id,
            allergen,
        } => format!(
            "? {} contém \"{allergen}\", que está na sua lista de alergias. \
             Adicionar mesmo assim? (confirm_pending_addition / cancel_pending_addition)",
            name(product_id)
        ),
        Outcome::Removed { product_id } => format!("- {} removido", name(product_id)),
        Outcome::PendingDiscarded { product_id } => {
            format!("x {} não foi adicionado", name(product_id))
        }
        Outcome::NothingPending => "(nenhum item aguardando confirmação)".to_string(),
        Outcome::Surfaces { overlays } => describe_overlays(*overlays),
        Outcome::OrderPlaced { order } => format!(
            "Pedido enviado com sucesso! (Esta é uma simulação) #{} · {} · {}",
            order.order_id, order.total, order.payment
        ),
        Outcome::PreferencesSaved { preferences } => format!(
            "Preferências salvas · alergias: [{}] · objetivos: [{}]",
            preferences.allergies,
            preferences.goals.join(", ")
        ),
    }
}

fn describe_overlays(overlays: Overlays) -> String {
    let state = |open: bool| if open { "aberto" } else { "fechado" };
    format!(
        "[carrinho: {} · login: {} · checkout: {}]",
        state(overlays.cart_panel),
        state(overlays.login),
        state(overlays.checkout)
    )
}

/// Write an outcome line in the requested format.
pub fn write_outcome(
    out: &mut impl Write,
    format: OutputFormat,
    outcome: &Outcome,
    catalog: &Catalog,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", describe(outcome, catalog)),
        OutputFormat::Json => writeln!(out, "{}", json!(outcome)),
    }
}

/// Write a notice: a user-facing error or an unreadable input line.
pub fn write_notice(
    out: &mut impl Write,
    format: OutputFormat,
    line: usize,
    message: &impl Display,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "! {message}"),
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "notice": message.to_string(), "line": line })
        ),
    }
}
