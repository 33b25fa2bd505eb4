//! Last-writer-wins publication of fetched routes.
//!
//! Route fetches can resolve out of order when pickup or drop-off change
//! while a request is in flight. [`RouteSession`] hands every request a
//! [`RouteTicket`] carrying a monotonic generation; a completed request is
//! published only if no newer ticket has been issued since.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::{Directions, MapsError};

/// Proof that a route request was started, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTicket {
    generation: u64,
}

impl RouteTicket {
    /// Generation captured when the request started.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of [`RouteSession::complete`].
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The result was current and is now published.
    Applied(Arc<Directions>),
    /// A newer request superseded this one; the result was discarded.
    Stale {
        /// Generation of the discarded request.
        ticket: u64,
        /// Generation that is current now.
        current: u64,
    },
}

impl Completion {
    /// Whether the result was published.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Holds the currently published directions and the request generation.
///
/// The session is `Send + Sync`; tickets may be completed from any thread.
///
/// # Examples
/// ```
/// use wayfare_core::{Completion, Directions, Route, RouteSession};
///
/// # fn main() -> Result<(), wayfare_core::MapsError> {
/// let session = RouteSession::new();
/// let older = session.begin();
/// let newer = session.begin();
///
/// let applied = session.complete(newer, Ok(Directions::from_route(Route::empty())))?;
/// assert!(applied.is_applied());
/// let stale = session.complete(older, Ok(Directions::from_route(Route::empty())))?;
/// assert!(matches!(stale, Completion::Stale { .. }));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RouteSession {
    generation: AtomicU64,
    published: Mutex<Option<Arc<Directions>>>,
}

impl RouteSession {
    /// Construct an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, superseding every earlier ticket.
    pub fn begin(&self) -> RouteTicket {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        RouteTicket { generation }
    }

    /// Generation of the most recently issued ticket.
    #[must_use]
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Whether `ticket` is still the newest request.
    #[must_use]
    pub fn is_current(&self, ticket: RouteTicket) -> bool {
        ticket.generation == self.current_generation()
    }

    /// Finish a request.
    ///
    /// Stale results are discarded whether they succeeded or failed. A
    /// current success replaces the published directions; a current failure
    /// clears them so an outdated route is not left on screen.
    ///
    /// # Errors
    ///
    /// Returns the request's [`MapsError`] when the ticket is current and the
    /// request failed.
    pub fn complete(
        &self,
        ticket: RouteTicket,
        result: Result<Directions, MapsError>,
    ) -> Result<Completion, MapsError> {
        let mut published = self
            .published
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let current = self.current_generation();
        if ticket.generation != current {
            log::debug!(
                "discarding route for request {} (current request is {current})",
                ticket.generation
            );
            return Ok(Completion::Stale {
                ticket: ticket.generation,
                current,
            });
        }
        match result {
            Ok(directions) => {
                let directions = Arc::new(directions);
                *published = Some(Arc::clone(&directions));
                Ok(Completion::Applied(directions))
            }
            Err(err) => {
                *published = None;
                Err(err)
            }
        }
    }

    /// Supersede in-flight requests and drop the published directions.
    pub fn invalidate(&self) {
        let mut published = self
            .published
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.generation.fetch_add(1, Ordering::AcqRel);
        *published = None;
    }

    /// Directions currently published, if any.
    #[must_use]
    pub fn current(&self) -> Option<Arc<Directions>> {
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinate, Route};
    use rstest::{fixture, rstest};
    use std::thread;

    fn directions(len: usize) -> Directions {
        let route = (0..len)
            .map(|i| Coordinate::new(i as f64 * 0.01, 0.0).expect("valid"))
            .collect::<Route>();
        Directions::from_route(route)
    }

    #[fixture]
    fn session() -> RouteSession {
        RouteSession::new()
    }

    #[rstest]
    fn current_ticket_is_applied(session: RouteSession) {
        let ticket = session.begin();
        let outcome = session.complete(ticket, Ok(directions(3))).expect("ok");
        assert!(outcome.is_applied());
        assert_eq!(session.current().map(|d| d.route.len()), Some(3));
    }

    #[rstest]
    fn older_ticket_resolving_last_is_discarded(session: RouteSession) {
        let older = session.begin();
        let newer = session.begin();
        session.complete(newer, Ok(directions(5))).expect("ok");

        let outcome = session.complete(older, Ok(directions(2))).expect("ok");
        assert_eq!(
            outcome,
            Completion::Stale {
                ticket: older.generation(),
                current: newer.generation()
            }
        );
        assert_eq!(session.current().map(|d| d.route.len()), Some(5));
    }

    #[rstest]
    fn stale_failures_are_swallowed(session: RouteSession) {
        let older = session.begin();
        let _newer = session.begin();
        let outcome = session
            .complete(
                older,
                Err(MapsError::RouteNotFound {
                    status: "ZERO_RESULTS".into(),
                }),
            )
            .expect("stale errors are not reported");
        assert!(!outcome.is_applied());
    }

    #[rstest]
    fn current_failure_clears_the_published_route(session: RouteSession) {
        let first = session.begin();
        session.complete(first, Ok(directions(4))).expect("ok");

        let second = session.begin();
        let err = session
            .complete(
                second,
                Err(MapsError::ApiConfiguration {
                    message: String::new(),
                }),
            )
            .expect_err("current failure is reported");
        assert!(err.is_configuration_error());
        assert!(session.current().is_none());
    }

    #[rstest]
    fn invalidate_supersedes_in_flight_requests(session: RouteSession) {
        let ticket = session.begin();
        session.invalidate();
        assert!(!session.is_current(ticket));
        let outcome = session.complete(ticket, Ok(directions(2))).expect("ok");
        assert!(!outcome.is_applied());
        assert!(session.current().is_none());
    }

    #[rstest]
    fn only_the_newest_of_many_threads_wins(session: RouteSession) {
        let tickets: Vec<_> = (0..8).map(|_| session.begin()).collect();
        let newest = tickets.last().copied().expect("tickets issued");
        thread::scope(|scope| {
            for (len, ticket) in tickets.into_iter().enumerate() {
                let session = &session;
                scope.spawn(move || {
                    session
                        .complete(ticket, Ok(directions(len + 1)))
                        .expect("no errors");
                });
            }
        });
        assert!(session.is_current(newest));
        assert_eq!(session.current().map(|d| d.route.len()), Some(8));
    }
}
