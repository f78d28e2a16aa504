use std::collections::HashSet;
use vortexl2_domain::{default_catalog, normalize_catalog};

mod helpers;
use helpers::candidate;

#[test]
fn test_normalize_keeps_first_occurrence() {
    let raw = vec![
        candidate("A", "1.1.1.1"),
        candidate("B", "1.1.1.1"),
        candidate("C", "0.0.0.0"),
        candidate("D", "2.2.2.2"),
    ];

    let normalized = normalize_catalog(&raw);

    assert_eq!(normalized.len(), 2);
    assert_eq!(normalized[0].name.as_ref(), "A");
    assert_eq!(normalized[0].address.as_ref(), "1.1.1.1");
    assert_eq!(normalized[1].name.as_ref(), "D");
}

#[test]
fn test_normalize_trims_and_drops_empty() {
    let raw = vec![
        candidate(" Spaced ", "  9.9.9.9 "),
        candidate("Empty", "   "),
        candidate("Dup", "9.9.9.9"),
    ];

    let normalized = normalize_catalog(&raw);

    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].name.as_ref(), "Spaced");
    assert_eq!(normalized[0].address.as_ref(), "9.9.9.9");
}

#[test]
fn test_default_catalog_addresses_unique() {
    let catalog = default_catalog();
    assert!(!catalog.is_empty());

    let unique: HashSet<&str> = catalog.iter().map(|c| c.address.as_ref()).collect();
    assert_eq!(unique.len(), catalog.len());
    assert!(catalog.iter().all(|c| c.address.as_ref() != "0.0.0.0"));
}

#[test]
fn test_default_catalog_is_normalized_idempotently() {
    let catalog = default_catalog();
    assert_eq!(normalize_catalog(&catalog), catalog);
}
