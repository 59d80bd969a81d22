use crate::error::{Result, ShadowError};
use crate::query::{SelectorPath, TextQuery};
use crate::resolve::executor::{ElementHandle, Interaction, Interactor, PollOutcome, SearchExecutor};
use crate::resolve::program::SearchProgram;
use std::time::{Duration, Instant};

/// Timeout applied when the caller does not supply one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause between poll attempts while a program keeps reporting no match.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Drives repeated execution of a [`SearchProgram`] against a live document
/// until it yields an element or the deadline passes.
///
/// A resolver is stateless between calls: it holds only the executor
/// capability and its timing configuration, so one instance can serve any
/// number of sequential lookups.
///
/// ```rust,no_run
/// use headless_chrome::Browser;
/// use shadow_pierce::ShadowResolver;
///
/// # fn main() -> anyhow::Result<()> {
/// let browser = Browser::default()?;
/// let tab = browser.new_tab()?;
///
/// let resolver = ShadowResolver::new(tab);
/// let handle = resolver.find_element("user-profile > settings-card > button.save")?;
/// println!("resolved {:?}", handle.description());
/// # Ok(())
/// # }
/// ```
pub struct ShadowResolver<E> {
    executor: E,
    default_timeout: Duration,
    poll_interval: Duration,
}

impl<E> ShadowResolver<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            default_timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Builder method: set the timeout used by the plain `find_*` variants.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Builder method: set the pause between poll attempts.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl<E: SearchExecutor> ShadowResolver<E> {
    /// Find the element addressed by a selector path, waiting up to the
    /// default timeout.
    ///
    /// The path may be a `>`-delimited string or a pre-split sequence —
    /// anything convertible to [`SelectorPath`].
    pub fn find_element<P>(&self, path: P) -> Result<ElementHandle>
    where
        P: TryInto<SelectorPath>,
        P::Error: Into<ShadowError>,
    {
        self.find_element_with_timeout(path, self.default_timeout)
    }

    /// [`find_element`](Self::find_element) with an explicit timeout.
    pub fn find_element_with_timeout<P>(&self, path: P, timeout: Duration) -> Result<ElementHandle>
    where
        P: TryInto<SelectorPath>,
        P::Error: Into<ShadowError>,
    {
        let path = path.try_into().map_err(Into::into)?;
        self.resolve(&SearchProgram::path_traversal(path), timeout)
    }

    /// Find the first leaf element whose rendered text contains `text`,
    /// scanning every nested shadow subtree, waiting up to the default
    /// timeout.
    pub fn find_by_text(&self, text: &str) -> Result<ElementHandle> {
        self.find_by_text_with_timeout(text, self.default_timeout)
    }

    /// [`find_by_text`](Self::find_by_text) with an explicit timeout.
    pub fn find_by_text_with_timeout(&self, text: &str, timeout: Duration) -> Result<ElementHandle> {
        let query = TextQuery::new(text)?;
        self.resolve(&SearchProgram::text_search(query), timeout)
    }

    /// Run `program` against the document until it produces an element or
    /// `timeout` elapses.
    ///
    /// At least one attempt always runs, so an element that is already
    /// present resolves regardless of the timeout value. The deadline is
    /// checked between attempts only: a slow driver call can delay expiry
    /// detection, never interrupt the call.
    pub fn resolve(&self, program: &SearchProgram, timeout: Duration) -> Result<ElementHandle> {
        let deadline = Instant::now() + timeout;

        loop {
            match self.executor.execute(program) {
                PollOutcome::Found(handle) => return Ok(handle),
                PollOutcome::DriverError(err) => return Err(err),
                PollOutcome::NotYetFound => {}
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(ShadowError::ElementNotFound {
                    query: program.to_string(),
                });
            }

            let pause = self.poll_interval.min(deadline - now);
            log::trace!("no match for {program}, retrying in {pause:?}");
            std::thread::sleep(pause);
        }
    }
}

impl<E: Interactor> ShadowResolver<E> {
    /// Act on a previously resolved handle.
    pub fn interact(&self, handle: &ElementHandle, interaction: Interaction) -> Result<()> {
        self.executor.interact(handle, interaction)
    }
}

impl<E: SearchExecutor + Interactor> ShadowResolver<E> {
    /// Find the element addressed by `path` and click it.
    pub fn click<P>(&self, path: P) -> Result<()>
    where
        P: TryInto<SelectorPath>,
        P::Error: Into<ShadowError>,
    {
        self.click_with(path, self.default_timeout, Interaction::Click)
    }

    /// [`click`](Self::click) with an explicit timeout and interaction
    /// mechanism.
    pub fn click_with<P>(&self, path: P, timeout: Duration, interaction: Interaction) -> Result<()>
    where
        P: TryInto<SelectorPath>,
        P::Error: Into<ShadowError>,
    {
        let handle = self.find_element_with_timeout(path, timeout)?;
        self.interact(&handle, interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// Executor that replays a scripted sequence of outcomes, then keeps
    /// reporting no match.
    struct ScriptedExecutor {
        outcomes: RefCell<VecDeque<PollOutcome>>,
        attempts: Cell<usize>,
        interactions: RefCell<Vec<(ElementHandle, Interaction)>>,
    }

    impl ScriptedExecutor {
        fn new(outcomes: Vec<PollOutcome>) -> Self {
            Self {
                outcomes: RefCell::new(outcomes.into()),
                attempts: Cell::new(0),
                interactions: RefCell::new(Vec::new()),
            }
        }

        fn attempts(&self) -> usize {
            self.attempts.get()
        }
    }

    impl SearchExecutor for ScriptedExecutor {
        fn execute(&self, _program: &SearchProgram) -> PollOutcome {
            self.attempts.set(self.attempts.get() + 1);
            self.outcomes
                .borrow_mut()
                .pop_front()
                .unwrap_or(PollOutcome::NotYetFound)
        }
    }

    impl Interactor for ScriptedExecutor {
        fn interact(&self, handle: &ElementHandle, interaction: Interaction) -> Result<()> {
            self.interactions
                .borrow_mut()
                .push((handle.clone(), interaction));
            Ok(())
        }
    }

    fn fast_resolver(executor: ScriptedExecutor) -> ShadowResolver<ScriptedExecutor> {
        ShadowResolver::new(executor)
            .with_default_timeout(Duration::from_millis(40))
            .with_poll_interval(Duration::from_millis(5))
    }

    #[test]
    fn test_immediate_match_returns_without_waiting() {
        let executor = ScriptedExecutor::new(vec![PollOutcome::Found(ElementHandle::new("el-1"))]);
        let resolver = ShadowResolver::new(executor).with_default_timeout(Duration::from_secs(3600));

        let started = Instant::now();
        let handle = resolver.find_element("host > target").unwrap();

        assert_eq!(handle.object_id(), "el-1");
        assert_eq!(resolver.executor.attempts(), 1);
        // A huge timeout must not introduce any delay on success.
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_match_on_later_attempt() {
        let executor = ScriptedExecutor::new(vec![
            PollOutcome::NotYetFound,
            PollOutcome::NotYetFound,
            PollOutcome::Found(ElementHandle::new("el-2")),
        ]);
        let resolver = fast_resolver(executor);

        let handle = resolver.find_element("host > target").unwrap();

        assert_eq!(handle.object_id(), "el-2");
        assert_eq!(resolver.executor.attempts(), 3);
    }

    #[test]
    fn test_deadline_expiry_yields_not_found() {
        let resolver = fast_resolver(ScriptedExecutor::new(vec![]));
        let timeout = Duration::from_millis(30);

        let started = Instant::now();
        let err = resolver
            .find_element_with_timeout("host > nested > target", timeout)
            .unwrap_err();

        assert!(started.elapsed() >= timeout, "failed before the deadline");
        match err {
            ShadowError::ElementNotFound { query } => {
                assert_eq!(query, "shadow path 'host > nested > target'");
            }
            other => panic!("expected ElementNotFound, got {other:?}"),
        }
        assert!(resolver.executor.attempts() >= 2);
    }

    #[test]
    fn test_zero_timeout_still_attempts_once() {
        let executor = ScriptedExecutor::new(vec![PollOutcome::Found(ElementHandle::new("el-3"))]);
        let resolver = ShadowResolver::new(executor);

        let handle = resolver
            .find_element_with_timeout("host > target", Duration::ZERO)
            .unwrap();

        assert_eq!(handle.object_id(), "el-3");
        assert_eq!(resolver.executor.attempts(), 1);
    }

    #[test]
    fn test_driver_error_aborts_polling() {
        let executor = ScriptedExecutor::new(vec![PollOutcome::DriverError(
            ShadowError::DriverExecution("session disconnected".to_string()),
        )]);
        let resolver = ShadowResolver::new(executor).with_default_timeout(Duration::from_secs(3600));

        let started = Instant::now();
        let err = resolver.find_element("host > target").unwrap_err();

        assert!(matches!(err, ShadowError::DriverExecution(_)));
        assert_eq!(resolver.executor.attempts(), 1, "must not retry a broken driver");
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_empty_path_fails_before_any_attempt() {
        let resolver = fast_resolver(ScriptedExecutor::new(vec![]));

        let err = resolver.find_element("").unwrap_err();
        assert!(matches!(err, ShadowError::InvalidQuery(_)));

        let err = resolver.find_element(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ShadowError::InvalidQuery(_)));

        assert_eq!(resolver.executor.attempts(), 0);
    }

    #[test]
    fn test_blank_text_fails_before_any_attempt() {
        let resolver = fast_resolver(ScriptedExecutor::new(vec![]));

        let err = resolver.find_by_text("   ").unwrap_err();

        assert!(matches!(err, ShadowError::InvalidQuery(_)));
        assert_eq!(resolver.executor.attempts(), 0);
    }

    #[test]
    fn test_text_timeout_reports_the_query() {
        let resolver = fast_resolver(ScriptedExecutor::new(vec![]));

        let err = resolver
            .find_by_text_with_timeout("Save changes", Duration::from_millis(10))
            .unwrap_err();

        match err {
            ShadowError::ElementNotFound { query } => assert_eq!(query, "text 'Save changes'"),
            other => panic!("expected ElementNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_resolution_yields_identical_handles() {
        let executor = ScriptedExecutor::new(vec![
            PollOutcome::Found(ElementHandle::new("el-9")),
            PollOutcome::Found(ElementHandle::new("el-9")),
        ]);
        let resolver = fast_resolver(executor);

        let first = resolver.find_element("host > target").unwrap();
        let second = resolver.find_element("host > target").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_path_accepts_pre_split_segments() {
        let executor = ScriptedExecutor::new(vec![PollOutcome::Found(ElementHandle::new("el-4"))]);
        let resolver = fast_resolver(executor);

        let handle = resolver.find_element(vec!["host", "target"]).unwrap();

        assert_eq!(handle.object_id(), "el-4");
    }

    #[test]
    fn test_click_finds_then_interacts_once() {
        let executor = ScriptedExecutor::new(vec![PollOutcome::Found(ElementHandle::new("el-5"))]);
        let resolver = fast_resolver(executor);

        resolver.click("host > button").unwrap();

        let interactions = resolver.executor.interactions.borrow();
        assert_eq!(interactions.len(), 1);
        assert_eq!(interactions[0].0.object_id(), "el-5");
        assert_eq!(interactions[0].1, Interaction::Click);
    }

    #[test]
    fn test_click_with_script_mechanism() {
        let executor = ScriptedExecutor::new(vec![PollOutcome::Found(ElementHandle::new("el-6"))]);
        let resolver = fast_resolver(executor);

        resolver
            .click_with("host > button", Duration::from_millis(20), Interaction::ScriptClick)
            .unwrap();

        let interactions = resolver.executor.interactions.borrow();
        assert_eq!(interactions[0].1, Interaction::ScriptClick);
    }

    #[test]
    fn test_click_does_not_interact_when_not_found() {
        let resolver = fast_resolver(ScriptedExecutor::new(vec![]));

        let err = resolver
            .click_with("host > button", Duration::from_millis(10), Interaction::Click)
            .unwrap_err();

        assert!(matches!(err, ShadowError::ElementNotFound { .. }));
        assert!(resolver.executor.interactions.borrow().is_empty());
    }
}
