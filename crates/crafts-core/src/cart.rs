use crate::model::{CartLine, Product};

/// In-memory shopping cart keyed by product id.
///
/// Lines are kept in the order products were first added. Every mutation goes
/// through the methods below, which guarantee that no two lines share an id
/// and that no line has a quantity below 1. Totals are derived on every read.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`. An existing line is incremented; otherwise a
    /// new line snapshots the product's title, price and thumbnail.
    pub fn add(&mut self, product: &Product) {
        match self.position(product.id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.quantity = line.quantity.saturating_add(1);
            }
            None => self.lines.push(CartLine::from_product(product)),
        }
        tracing::debug!(id = product.id, "cart: add");
    }

    /// Remove the line for `id`. Absent ids are ignored.
    pub fn remove(&mut self, id: u64) {
        self.lines.retain(|line| line.id != id);
    }

    /// Overwrite the quantity for `id`. Anything below 1 removes the line.
    /// Absent ids are ignored.
    pub fn set_quantity(&mut self, id: u64, quantity: i64) {
        if quantity < 1 {
            self.remove(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(idx) = self.position(id) {
            self.lines[idx].quantity = quantity;
        }
    }

    /// The cart panel's "+" button.
    pub fn increment(&mut self, id: u64) {
        if let Some(line) = self.get(id) {
            let next = i64::from(line.quantity) + 1;
            self.set_quantity(id, next);
        }
    }

    /// The cart panel's "−" button. Dropping to zero removes the line.
    pub fn decrement(&mut self, id: u64) {
        if let Some(line) = self.get(id) {
            let next = i64::from(line.quantity) - 1;
            self.set_quantity(id, next);
        }
    }

    /// Sum of price × quantity over all lines.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Sum of quantities, shown on the header badge.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.lines.iter().position(|l| l.id == id)
    }
}
