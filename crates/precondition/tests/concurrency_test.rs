//! Concurrent resolution through the shared operation cache.

use std::sync::{Arc, Barrier};
use std::thread;

use precondition::ops::BoundOperation;
use precondition::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
struct Ticket(u32);

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

precondition::describe_scalar!(Ticket => "Ticket", ordered);

#[test]
fn threads_resolving_a_fresh_type_agree() {
    let ops = Arc::new(Operations::new());
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = (0..2)
        .map(|i| {
            let ops = Arc::clone(&ops);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                ops.compare_values(&Ticket(i), &Ticket(1)).unwrap()
            })
        })
        .collect();
    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(outcomes, vec![CompareOutcome::LessThan, CompareOutcome::Equal]);
    // Both threads may have computed a binding; only one is kept.
    assert_eq!(ops.cache().len(), 1);
    assert!(ops.cache().resolutions() >= 1);
    assert!(matches!(
        ops.resolve(&Ticket::describe(), OperationKind::Compare),
        BoundOperation::Compare(_)
    ));
}

#[test]
fn checks_run_from_many_threads() {
    thread::scope(|scope| {
        for t in 0..8_u32 {
            scope.spawn(move || {
                let values: Vec<Ticket> = (0..100).map(|n| Ticket(n * t)).collect();
                requires(values, "tickets")
                    .each()
                    .is_greater_or_equal(Ticket(0))
                    .unwrap();
            });
        }
    });
}
