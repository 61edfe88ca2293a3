use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// Metrics
/// Ephemeral, thread-local counters for predicate construction and evaluation.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct EventState {
    pub ops: EventOps,
    /// Leaf predicates built, keyed by predicate kind.
    pub kinds: BTreeMap<String, u64>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Construction
    pub predicates_built: u64,

    // Resolution
    pub paths_resolved: u64,
    pub segments_walked: u64,
    pub resolve_failures: u64,

    // Evaluation
    pub rows_evaluated: u64,
    pub rows_matched: u64,
}

///
/// EventReport
/// Point-in-time copy of the counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub kinds: BTreeMap<String, u64>,
}

thread_local! {
    static STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    STATE.with(|cell| f(&cell.borrow()))
}

pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    STATE.with(|cell| f(&mut cell.borrow_mut()))
}

pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

pub(crate) fn report() -> EventReport {
    with_state(|m| EventReport {
        ops: m.ops.clone(),
        kinds: m.kinds.clone(),
    })
}
