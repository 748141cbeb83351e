use std::collections::VecDeque;

use nexus_fifo::{Fifo, PushError, TryPopError};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Push(u32),
    Pop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![any::<u32>().prop_map(Op::Push), Just(Op::Pop)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Single-threaded runs match a `VecDeque` bounded at the same capacity.
    #[test]
    fn matches_bounded_model(
        capacity in 1usize..16,
        ops in prop::collection::vec(op(), 0..300),
    ) {
        let fifo = Fifo::<u32>::new(capacity);
        let mut model = VecDeque::with_capacity(capacity);

        for op in ops {
            match op {
                Op::Push(v) => {
                    let result = fifo.push(v);
                    if model.len() == capacity {
                        prop_assert!(matches!(result, Err(PushError::Full(x)) if x == v));
                    } else {
                        // Uncontended: only Full can reject.
                        prop_assert!(result.is_ok());
                        model.push_back(v);
                    }
                }
                Op::Pop => {
                    let result = fifo.try_pop();
                    match model.pop_front() {
                        Some(expected) => prop_assert_eq!(result, Ok(expected)),
                        None => prop_assert_eq!(result, Err(TryPopError::Empty)),
                    }
                }
            }

            prop_assert_eq!(fifo.population(), model.len());
            prop_assert!(fifo.population() <= capacity);
        }
    }

    /// Everything pushed comes back out in order, for any fill/drain pattern.
    #[test]
    fn drains_in_push_order(values in prop::collection::vec(any::<u64>(), 1..64)) {
        let fifo = Fifo::<u64>::new(values.len());

        for &v in &values {
            prop_assert!(fifo.push(v).is_ok());
        }
        prop_assert!(fifo.is_full());

        let drained: Vec<u64> = std::iter::from_fn(|| fifo.try_pop().ok()).collect();
        prop_assert_eq!(drained, values);
        prop_assert!(fifo.is_empty());
    }
}
