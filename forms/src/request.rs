//! At most one in-flight request per input field.
//!
//! Each field owns a [`RequestSlot`]. Starting a request cancels the previous
//! token, which fires its abort hooks (the browser client hooks
//! `AbortController::abort` there). [`guarded`] turns whatever the request
//! produced into [`Outcome::Cancelled`] once it has been superseded, so a
//! stale response never overwrites a fresh one.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }
}

type AbortHook = Box<dyn FnOnce()>;

#[derive(Default)]
struct TokenState {
    cancelled: Cell<bool>,
    hooks: RefCell<Vec<AbortHook>>,
}

/// Cancellation flag shared between a request and whoever may supersede it
#[derive(Clone, Default)]
pub struct CancellationToken {
    state: Rc<TokenState>,
}

impl std::fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }

    pub fn cancel(&self) {
        if self.state.cancelled.replace(true) {
            return;
        }
        let hooks: Vec<AbortHook> = self.state.hooks.borrow_mut().drain(..).collect();
        for hook in hooks {
            hook();
        }
    }

    /// Runs `hook` on cancellation, or right away if already cancelled
    pub fn on_cancel<F: FnOnce() + 'static>(&self, hook: F) {
        if self.is_cancelled() {
            hook();
        } else {
            self.state.hooks.borrow_mut().push(Box::new(hook));
        }
    }
}

#[derive(Debug, Default)]
pub struct RequestSlot {
    current: RefCell<Option<CancellationToken>>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, cancelling the one in flight
    pub fn begin(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let previous = self.current.replace(Some(token.clone()));
        if let Some(previous) = previous {
            previous.cancel();
        }
        token
    }

    /// Cancels the request in flight without starting another
    pub fn cancel(&self) {
        let previous = self.current.borrow_mut().take();
        if let Some(previous) = previous {
            previous.cancel();
        }
    }
}

/// Awaits `request` and drops its result if `token` was cancelled meanwhile
pub async fn guarded<F: Future>(token: &CancellationToken, request: F) -> Outcome<F::Output> {
    if token.is_cancelled() {
        return Outcome::Cancelled;
    }
    let output = request.await;
    if token.is_cancelled() {
        Outcome::Cancelled
    } else {
        Outcome::Completed(output)
    }
}
