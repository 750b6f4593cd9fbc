use serde::{Deserialize, Serialize};

/// A catalog product as served by the remote API. Read-only for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub thumbnail: String,
}

impl Product {
    pub fn new(id: u64, title: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category: category.into(),
            price,
            discount_percentage: 0.0,
            rating: 0.0,
            thumbnail: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_discount(mut self, percentage: f64) -> Self {
        self.discount_percentage = percentage;
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }

    /// Rounded discount for the "NN% OFF" badge, or `None` when there is no discount.
    pub fn discount_badge(&self) -> Option<u32> {
        if self.discount_percentage > 0.0 {
            Some(self.discount_percentage.round() as u32)
        } else {
            None
        }
    }
}

/// One product in the cart. Title, price and thumbnail are copied from the
/// product when it is first added and never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub thumbnail: String,
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot a product into a fresh line with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            thumbnail: product.thumbnail.clone(),
            quantity: 1,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
