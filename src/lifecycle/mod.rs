//! Lifecycle rules: support status and support program.

mod program;
mod status;

pub use program::{lifecycle_type_from_products, E4S_PRODUCT_IDS, ELS_PRODUCT_IDS, EUS_PRODUCT_IDS};
pub use status::{calculate_support_status, near_retirement_window};
