use nanoflow_quantity::{Quantity, QuantityIndex, Scope};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_identifier_names_are_valid(name in "[A-Za-z_][A-Za-z0-9_]{0,30}") {
        prop_assert!(Quantity::is_valid_name(&name));
    }

    #[test]
    fn prop_at_most_one_writer_per_scope(
        claims in proptest::collection::vec((0..4usize, 0..6usize, 0..3usize), 0..40)
    ) {
        let scopes = ["global", "em", "mt", "tt"];
        let mut index = QuantityIndex::new();

        for (scope_idx, quantity_idx, producer_idx) in claims {
            let scope = Scope::from_static(scopes[scope_idx]);
            let quantity = Quantity::new(format!("q{quantity_idx}"), Default::default());
            let producer = format!("P{producer_idx}");

            let before = index.writer(&scope, &quantity).map(str::to_string);
            let result = index.claim(&scope, &quantity, &producer);

            // Invariant: a successful claim never replaces an existing writer
            match before {
                Some(owner) if owner != producer => prop_assert!(result.is_err()),
                _ => {
                    if result.is_ok() {
                        prop_assert_eq!(index.writer(&scope, &quantity), Some(producer.as_str()));
                    }
                }
            }
        }
    }
}
