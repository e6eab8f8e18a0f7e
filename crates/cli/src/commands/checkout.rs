//! `checkout` subcommand: scripted cart operations followed by checkout.

use std::path::PathBuf;
use std::str::FromStr;

use yogurt_shop_core::{Cart, Catalog, ProductId, Receipt};

/// Error parsing a cart operation argument.
#[derive(Debug, thiserror::Error)]
pub enum CartOpParseError {
    #[error("expected OP:ID, got '{0}'")]
    Malformed(String),
    #[error("unknown operation '{0}' (expected add, inc or dec)")]
    UnknownOp(String),
    #[error("invalid product id '{0}'")]
    InvalidId(String),
}

/// A single cart operation given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOp {
    Add(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
}

impl FromStr for CartOp {
    type Err = CartOpParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, id) = s
            .split_once(':')
            .ok_or_else(|| CartOpParseError::Malformed(s.to_string()))?;
        let id: ProductId = id
            .parse()
            .map_err(|_| CartOpParseError::InvalidId(id.to_string()))?;

        match op.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Self::Add(id)),
            "inc" | "increase" => Ok(Self::Increase(id)),
            "dec" | "decrease" => Ok(Self::Decrease(id)),
            other => Err(CartOpParseError::UnknownOp(other.to_string())),
        }
    }
}

/// Apply `ops` in order to `cart`.
///
/// Unknown ids on `add` are logged and skipped; `inc`/`dec` on a product
/// that is not in the cart do nothing. Returns the number of skipped adds.
pub fn apply(cart: &mut Cart, catalog: &Catalog, ops: &[CartOp]) -> usize {
    let mut skipped = 0;
    for op in ops {
        match *op {
            CartOp::Add(id) => {
                if let Err(e) = cart.add(catalog, id) {
                    tracing::warn!(product_id = %id, "Skipping add: {e}");
                    skipped += 1;
                }
            }
            CartOp::Increase(id) => {
                if cart.increase(id).is_none() {
                    tracing::debug!(product_id = %id, "Increase ignored, not in cart");
                }
            }
            CartOp::Decrease(id) => {
                if cart.decrease(id).is_none() {
                    tracing::debug!(product_id = %id, "Decrease ignored, not in cart");
                }
            }
        }
    }
    skipped
}

/// Run the operations against a fresh cart and print the receipt.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the final cart is
/// empty.
pub async fn run(catalog: Option<PathBuf>, ops: &[CartOp]) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = super::load_catalog(catalog).await?;

    let mut cart = Cart::new();
    apply(&mut cart, &catalog, ops);

    let receipt = yogurt_shop_core::checkout(&mut cart)?;
    tracing::info!(
        order_number = %receipt.order_number,
        total_items = receipt.total_items,
        total = receipt.total.pesos(),
        "Checkout complete"
    );

    #[allow(clippy::print_stdout)]
    {
        println!("{}", render_receipt(&receipt));
    }
    Ok(())
}

fn render_receipt(receipt: &Receipt) -> String {
    let mut lines = vec![format!("Pedido {}", receipt.order_number)];
    lines.extend(receipt.entries.iter().map(|entry| {
        format!(
            "  {} {} x{}  {}",
            entry.glyph(),
            entry.name(),
            entry.quantity(),
            entry.line_total()
        )
    }));
    lines.push(String::new());
    lines.push(receipt.confirmation());
    lines.join("\n")
}
