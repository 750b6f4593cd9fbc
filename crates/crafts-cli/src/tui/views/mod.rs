pub mod about;
pub mod cart;
pub mod chat;
pub mod home;
pub mod shop;

/// Money as shown everywhere in the UI: dollars with two decimals.
pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}
