//! Property-based invariant tests for `ObservableBox`.
//!
//! 1. Every write notifies every live subscriber exactly once, in write
//!    order, including writes of an equal value.
//! 2. Subscribing never replays: a subscriber sees only writes made after
//!    it subscribed.
//! 3. A disposed subscriber sees nothing afterwards; others are unaffected.
//! 4. `version()` counts writes and `get()` returns the last one.

use fakenft_harness::Recorder;
use fakenft_runtime::{ObservableBox, SubscriptionHandle};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Write(u8),
    Subscribe,
    /// Dispose the n-th subscription ever made (modulo the count), if live.
    Dispose(usize),
}

// ── Strategies ────────────────────────────────────────────────────────────

fn op_strategy() -> impl Strategy<Value = Op> {
    // Tiny value range so repeated equal writes are common.
    prop_oneof![
        4 => (0u8..3).prop_map(Op::Write),
        2 => Just(Op::Subscribe),
        1 => any::<usize>().prop_map(Op::Dispose),
    ]
}

struct Tracked {
    recorder: Recorder<u8>,
    handle: Option<SubscriptionHandle>,
    expected: Vec<u8>,
}

proptest! {
    #[test]
    fn notifications_match_writes(
        initial in 0u8..3,
        ops in proptest::collection::vec(op_strategy(), 0..64),
    ) {
        let source = ObservableBox::new(initial);
        let mut tracked: Vec<Tracked> = Vec::new();
        let mut writes = 0u64;
        let mut last = initial;

        for op in ops {
            match op {
                Op::Write(value) => {
                    source.set(value);
                    writes += 1;
                    last = value;
                    for t in tracked.iter_mut().filter(|t| t.handle.is_some()) {
                        t.expected.push(value);
                    }
                }
                Op::Subscribe => {
                    let recorder = Recorder::new();
                    let handle = recorder.attach(&source.read_only());
                    tracked.push(Tracked { recorder, handle: Some(handle), expected: Vec::new() });
                }
                Op::Dispose(n) => {
                    if !tracked.is_empty() {
                        let index = n % tracked.len();
                        if let Some(handle) = tracked[index].handle.take() {
                            handle.dispose();
                        }
                    }
                }
            }
        }

        prop_assert_eq!(source.version(), writes);
        prop_assert_eq!(source.get(), last);
        let live = tracked.iter().filter(|t| t.handle.is_some()).count();
        prop_assert_eq!(source.subscriber_count(), live);
        for t in &tracked {
            prop_assert_eq!(t.recorder.values(), t.expected.clone());
        }
    }

    #[test]
    fn late_subscriber_sees_no_replay(
        before in proptest::collection::vec(any::<u8>(), 0..16),
        after in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        let source = ObservableBox::new(0u8);
        for value in &before {
            source.set(*value);
        }

        let recorder = Recorder::new();
        let _sub = recorder.attach(&source.read_only());
        prop_assert_eq!(recorder.count(), 0);

        for value in &after {
            source.set(*value);
        }
        prop_assert_eq!(recorder.values(), after);
    }

    #[test]
    fn dropping_handles_detaches_in_any_order(
        subscribers in 1usize..8,
        order in any::<u64>(),
    ) {
        let source = ObservableBox::new(0u8);
        let mut handles: Vec<_> = (0..subscribers)
            .map(|_| source.subscribe(|_| {}))
            .collect();
        prop_assert_eq!(source.subscriber_count(), subscribers);

        let mut seed = order;
        while !handles.is_empty() {
            let index = usize::try_from(seed % handles.len() as u64).unwrap_or(0);
            seed = seed.rotate_left(7) ^ 0x9e37_79b9;
            drop(handles.swap_remove(index));
            prop_assert_eq!(source.subscriber_count(), handles.len());
        }

        source.set(1);
        prop_assert_eq!(source.version(), 1);
    }
}
