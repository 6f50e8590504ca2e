//! Support program from installed product certificates.

use crate::model::{InstalledProduct, LifecycleType};

/// Product IDs of Extended Update Support.
pub const EUS_PRODUCT_IDS: &[&str] = &["70", "73", "75"];

/// Product IDs of Extended Life-cycle Support.
pub const ELS_PRODUCT_IDS: &[&str] = &["204"];

/// Product IDs of Update Services for SAP Solutions.
pub const E4S_PRODUCT_IDS: &[&str] = &["241"];

/// Support program of a host.
///
/// Checked in the order EUS, ELS, E4S; a later match overrides an earlier
/// one, so E4S wins over everything. No match is mainline.
#[must_use]
pub fn lifecycle_type_from_products(products: &[InstalledProduct]) -> LifecycleType {
    let has_any = |ids: &[&str]| {
        products
            .iter()
            .filter_map(|product| product.id.as_deref())
            .any(|id| ids.contains(&id))
    };

    let mut lifecycle = LifecycleType::Mainline;
    if has_any(EUS_PRODUCT_IDS) {
        lifecycle = LifecycleType::Eus;
    }
    if has_any(ELS_PRODUCT_IDS) {
        lifecycle = LifecycleType::Els;
    }
    if has_any(E4S_PRODUCT_IDS) {
        lifecycle = LifecycleType::E4s;
    }
    lifecycle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products(ids: &[&str]) -> Vec<InstalledProduct> {
        ids.iter()
            .map(|id| InstalledProduct {
                id: Some((*id).to_string()),
            })
            .collect()
    }

    #[test]
    fn test_mainline_default() {
        assert_eq!(lifecycle_type_from_products(&[]), LifecycleType::Mainline);
        assert_eq!(lifecycle_type_from_products(&products(&["479"])), LifecycleType::Mainline);
        assert_eq!(
            lifecycle_type_from_products(&[InstalledProduct { id: None }]),
            LifecycleType::Mainline
        );
    }

    #[test]
    fn test_precedence() {
        assert_eq!(lifecycle_type_from_products(&products(&["479", "73"])), LifecycleType::Eus);
        assert_eq!(lifecycle_type_from_products(&products(&["70", "204"])), LifecycleType::Els);
        assert_eq!(
            lifecycle_type_from_products(&products(&["241", "204", "75"])),
            LifecycleType::E4s
        );
    }
}
