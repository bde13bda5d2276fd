//! Scoped graph context for relational calls
//!
//! While a verb runs, the graph it operates on is published on a
//! thread-local stack so code in the table engine can learn which table it
//! is working on. Frames are pushed by [`enter`] and popped when the
//! returned [`ContextGuard`] is dropped, on normal return and on early
//! error return alike. Outside verb execution the stack is empty.

use super::context::ActiveContext;
use std::cell::RefCell;
use std::marker::PhantomData;
use tracing::trace;

/// Snapshot of the graph a verb is running against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphFrame {
    pub verb: &'static str,
    pub active: ActiveContext,
}

thread_local! {
    static FRAMES: RefCell<Vec<GraphFrame>> = const { RefCell::new(Vec::new()) };
}

/// Pops its frame on drop. Not `Send`: the frame lives on this thread's stack.
#[must_use = "the frame is popped as soon as the guard is dropped"]
pub struct ContextGuard {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        FRAMES.with(|frames| {
            let mut frames = frames.borrow_mut();
            debug_assert_eq!(frames.len(), self.depth, "graph frames released out of order");
            if let Some(frame) = frames.pop() {
                trace!("Leaving {} on {} table", frame.verb, frame.active);
            }
        });
    }
}

/// Publish a frame for the duration of the returned guard
pub fn enter(frame: GraphFrame) -> ContextGuard {
    trace!("Entering {} on {} table", frame.verb, frame.active);
    let depth = FRAMES.with(|frames| {
        let mut frames = frames.borrow_mut();
        frames.push(frame);
        frames.len()
    });
    ContextGuard {
        depth,
        _not_send: PhantomData,
    }
}

/// Active context of the innermost frame
pub fn current_active() -> Option<ActiveContext> {
    with_frame(|frame| frame.active)
}

/// Run `f` against the innermost frame, if any
pub fn with_frame<R>(f: impl FnOnce(&GraphFrame) -> R) -> Option<R> {
    FRAMES.with(|frames| frames.borrow().last().map(f))
}

/// Number of frames on this thread
pub fn depth() -> usize {
    FRAMES.with(|frames| frames.borrow().len())
}
