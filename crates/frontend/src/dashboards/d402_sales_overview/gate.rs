//! Per-scope single-flight gate and staleness tokens
//!
//! Every scope (summary, chart, top items) owns its own [`ScopeRefresher`], so
//! refreshes of different scopes run side by side while one scope never has
//! two requests on the wire.

use super::error::GatewayError;
use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshScope {
    Summary,
    Chart,
    TopItems,
}

impl RefreshScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Chart => "chart",
            Self::TopItems => "top_items",
        }
    }
}

impl fmt::Display for RefreshScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-flight guard for one scope
#[derive(Debug)]
pub struct RefreshGate {
    scope: RefreshScope,
    busy: Rc<Cell<bool>>,
}

impl RefreshGate {
    pub fn new(scope: RefreshScope) -> Self {
        Self {
            scope,
            busy: Rc::new(Cell::new(false)),
        }
    }

    /// None while another refresh of this scope holds the gate
    pub fn try_acquire(&self) -> Option<RefreshPermit> {
        if self.busy.get() {
            return None;
        }
        self.busy.set(true);
        Some(RefreshPermit {
            scope: self.scope,
            busy: Rc::clone(&self.busy),
        })
    }

    pub fn release(&self) {
        self.busy.set(false);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

/// Held for the duration of one refresh; dropping it releases the gate
#[derive(Debug)]
pub struct RefreshPermit {
    scope: RefreshScope,
    busy: Rc<Cell<bool>>,
}

impl RefreshPermit {
    pub fn scope(&self) -> RefreshScope {
        self.scope
    }
}

impl Drop for RefreshPermit {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshToken(u64);

/// Monotonic token counter for one scope
#[derive(Debug, Default)]
pub struct RefreshTokens {
    latest: Cell<u64>,
}

impl RefreshTokens {
    pub fn mint(&self) -> RefreshToken {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        RefreshToken(next)
    }

    pub fn is_current(&self, token: RefreshToken) -> bool {
        token.0 == self.latest.get()
    }

    /// Make every token minted so far stale
    pub fn invalidate(&self) {
        self.latest.set(self.latest.get() + 1);
    }
}

/// What happened to one refresh request
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Response accepted and rendered
    Applied,
    /// Response arrived after a newer request for the same scope and was dropped
    Stale,
    /// Scope was busy; the running refresh will replay with the latest state
    Coalesced,
    /// Request failed; previously rendered values are kept
    Failed(GatewayError),
}

/// Gate + tokens + replay flag for one scope
#[derive(Debug)]
pub struct ScopeRefresher {
    scope: RefreshScope,
    gate: RefreshGate,
    tokens: RefreshTokens,
    rerun: Cell<bool>,
}

impl ScopeRefresher {
    pub fn new(scope: RefreshScope) -> Self {
        Self {
            scope,
            gate: RefreshGate::new(scope),
            tokens: RefreshTokens::default(),
            rerun: Cell::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Run one refresh for this scope.
    ///
    /// `fetch` is called again for every replay so it must read the scope's
    /// state when invoked, not capture it up front. `apply` only ever sees
    /// results whose token is still current.
    pub async fn run<T, F, Fut, A>(&self, mut fetch: F, mut apply: A) -> RefreshOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
        A: FnMut(T),
    {
        let Some(_permit) = self.gate.try_acquire() else {
            // No second request on the wire: the in-flight answer is for an
            // outdated state, so it is invalidated and replayed afterwards.
            self.tokens.invalidate();
            self.rerun.set(true);
            log::debug!("{}: refresh in flight, request coalesced", self.scope);
            return RefreshOutcome::Coalesced;
        };

        loop {
            self.rerun.set(false);
            let token = self.tokens.mint();
            let result = fetch().await;

            let outcome = if !self.tokens.is_current(token) {
                log::debug!("{}: dropping stale response {:?}", self.scope, token);
                RefreshOutcome::Stale
            } else {
                match result {
                    Ok(value) => {
                        apply(value);
                        RefreshOutcome::Applied
                    }
                    Err(err) => {
                        log::warn!("{}: refresh failed: {}", self.scope, err);
                        RefreshOutcome::Failed(err)
                    }
                }
            };

            if !self.rerun.get() {
                return outcome;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;

    #[test]
    fn test_gate_blocks_until_released() {
        let gate = RefreshGate::new(RefreshScope::Chart);
        let permit = gate.try_acquire();
        assert!(permit.is_some());
        assert!(gate.is_busy());
        assert!(gate.try_acquire().is_none());

        drop(permit);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn test_explicit_release() {
        let gate = RefreshGate::new(RefreshScope::Summary);
        let permit = gate.try_acquire().unwrap();
        assert_eq!(permit.scope(), RefreshScope::Summary);
        std::mem::forget(permit);
        assert!(gate.try_acquire().is_none());
        gate.release();
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn test_gates_are_independent_per_scope() {
        let summary = RefreshGate::new(RefreshScope::Summary);
        let chart = RefreshGate::new(RefreshScope::Chart);
        let top = RefreshGate::new(RefreshScope::TopItems);
        let _a = summary.try_acquire().unwrap();
        let _b = chart.try_acquire().unwrap();
        assert!(top.try_acquire().is_some());
    }

    #[test]
    fn test_tokens_are_monotonic() {
        let tokens = RefreshTokens::default();
        let first = tokens.mint();
        assert!(tokens.is_current(first));
        let second = tokens.mint();
        assert!(second > first);
        assert!(!tokens.is_current(first));
        assert!(tokens.is_current(second));
        tokens.invalidate();
        assert!(!tokens.is_current(second));
    }

    #[test]
    fn test_run_applies_and_releases() {
        let refresher = ScopeRefresher::new(RefreshScope::Chart);
        let applied = RefCell::new(Vec::new());
        let outcome = block_on(refresher.run(
            || async { Ok::<_, GatewayError>(5) },
            |v| applied.borrow_mut().push(v),
        ));
        assert_eq!(outcome, RefreshOutcome::Applied);
        assert_eq!(*applied.borrow(), vec![5]);
        assert!(!refresher.is_busy());
    }

    #[test]
    fn test_run_failure_releases_gate_without_apply() {
        let refresher = ScopeRefresher::new(RefreshScope::Summary);
        let applied = Cell::new(false);
        let outcome = block_on(refresher.run(
            || async { Err::<u32, _>(GatewayError::Http(500)) },
            |_| applied.set(true),
        ));
        assert_eq!(outcome, RefreshOutcome::Failed(GatewayError::Http(500)));
        assert!(!applied.get());
        assert!(!refresher.is_busy());
    }

    #[test]
    fn test_overlapping_run_is_coalesced_and_only_latest_applies() {
        let refresher = Rc::new(ScopeRefresher::new(RefreshScope::Summary));
        let state = Rc::new(Cell::new(1u32));
        let applied = Rc::new(RefCell::new(Vec::new()));
        let pending = Rc::new(RefCell::new(Vec::<oneshot::Sender<u32>>::new()));
        let outcomes = Rc::new(RefCell::new(Vec::new()));

        let start = {
            let refresher = Rc::clone(&refresher);
            let state = Rc::clone(&state);
            let applied = Rc::clone(&applied);
            let pending = Rc::clone(&pending);
            let outcomes = Rc::clone(&outcomes);
            move || {
                let refresher = Rc::clone(&refresher);
                let state = Rc::clone(&state);
                let applied = Rc::clone(&applied);
                let pending = Rc::clone(&pending);
                let outcomes = Rc::clone(&outcomes);
                async move {
                    let outcome = refresher
                        .run(
                            || {
                                let (tx, rx) = oneshot::channel();
                                pending.borrow_mut().push(tx);
                                let requested = state.get();
                                async move {
                                    let answered = rx.await.map_err(|_| {
                                        GatewayError::Transport("cancelled".into())
                                    })?;
                                    Ok::<_, GatewayError>((requested, answered))
                                }
                            },
                            |value| applied.borrow_mut().push(value),
                        )
                        .await;
                    outcomes.borrow_mut().push(outcome);
                }
            }
        };

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        spawner.spawn_local(start()).unwrap();
        pool.run_until_stalled();
        assert_eq!(pending.borrow().len(), 1);

        // Newer state arrives while the first request is still on the wire
        state.set(2);
        spawner.spawn_local(start()).unwrap();
        pool.run_until_stalled();
        assert_eq!(pending.borrow().len(), 1, "no duplicate network call");
        assert_eq!(*outcomes.borrow(), vec![RefreshOutcome::Coalesced]);

        // Old answer comes back: dropped, replay issued for state 2
        let first = pending.borrow_mut().remove(0);
        first.send(100).unwrap();
        pool.run_until_stalled();
        assert!(applied.borrow().is_empty());
        assert_eq!(pending.borrow().len(), 1);

        let second = pending.borrow_mut().remove(0);
        second.send(200).unwrap();
        pool.run_until_stalled();
        assert_eq!(*applied.borrow(), vec![(2, 200)]);
        assert_eq!(outcomes.borrow().last(), Some(&RefreshOutcome::Applied));
        assert!(!refresher.is_busy());
    }
}
