pub mod category_bar;
pub mod header;
pub mod help_bar;
pub mod search_input;
