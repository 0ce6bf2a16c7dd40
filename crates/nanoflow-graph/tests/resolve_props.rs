use nanoflow_graph::{ProducerRegistry, ResolveRequest, Resolver};
use nanoflow_quantity::Scope;
use nanoflow_test_utils::linear_chain;
use proptest::prelude::*;

fn chain_registry(len: usize) -> ProducerRegistry {
    let mut registry = ProducerRegistry::new();
    registry.register_all(linear_chain(len)).unwrap();
    registry
}

proptest! {
    #[test]
    fn prop_order_is_topological(
        order in (1..24usize).prop_flat_map(|len| Just((0..len).collect::<Vec<_>>()).prop_shuffle())
    ) {
        let registry = chain_registry(order.len());
        let names: Vec<String> = order.iter().map(|i| format!("Step{i}")).collect();
        let request = ResolveRequest::new().scope(Scope::GLOBAL, names, Vec::<String>::new());

        let plan = Resolver::new(&registry).resolve(&request).unwrap();
        let global = plan.global().unwrap();

        prop_assert_eq!(global.producers.len(), order.len());
        for i in 1..order.len() {
            let before = global.position(&format!("Step{}", i - 1)).unwrap();
            let after = global.position(&format!("Step{i}")).unwrap();
            prop_assert!(before < after);
        }
    }

    #[test]
    fn prop_resolution_is_deterministic(len in 1..16usize, seed in any::<u64>()) {
        let registry = chain_registry(len);
        let mut names: Vec<String> = (0..len).map(|i| format!("Step{i}")).collect();
        names.rotate_left((seed as usize) % len);
        let request = ResolveRequest::new().scope(Scope::GLOBAL, names, Vec::<String>::new());

        let first = Resolver::new(&registry).resolve(&request).unwrap();
        let second = Resolver::new(&registry).resolve(&request).unwrap();
        prop_assert_eq!(first.global().unwrap().names(), second.global().unwrap().names());
    }

    #[test]
    fn prop_pruning_keeps_only_ancestors(len in 2..16usize, target in 0..16usize) {
        let target = target % len;
        let registry = chain_registry(len);
        let names: Vec<String> = (0..len).map(|i| format!("Step{i}")).collect();
        let request = ResolveRequest::new().scope(Scope::GLOBAL, names, [format!("step{target}")]);

        let plan = Resolver::new(&registry).resolve(&request).unwrap();
        let global = plan.global().unwrap();

        prop_assert_eq!(global.producers.len(), target + 1);
        prop_assert_eq!(global.pruned.len(), len - target - 1);
    }
}
