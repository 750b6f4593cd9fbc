use crafts_core::model::Product;

/// Actions the UI sends to the catalog worker task.
///
/// Every request carries the generation it was issued under so that results
/// for a view the user already left can be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncAction {
    /// Featured products for the home page.
    LoadFeatured { generation: u64 },
    /// The shop listing and its category names, fetched back to back.
    LoadShop { generation: u64, limit: usize },
}

/// Results the worker sends back to the UI. Errors are already flattened to
/// text: the UI only ever shows a static failure message.
#[derive(Debug)]
pub enum AsyncResult {
    Featured {
        generation: u64,
        result: Result<Vec<Product>, String>,
    },
    Products {
        generation: u64,
        result: Result<Vec<Product>, String>,
    },
    Categories {
        generation: u64,
        result: Result<Vec<String>, String>,
    },
}

impl AsyncResult {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Featured { generation, .. }
            | Self::Products { generation, .. }
            | Self::Categories { generation, .. } => *generation,
        }
    }
}
