use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use fanpulse_core::model::{ActiveView, Session};

use crate::error::ViewError;

/// Work performed when a view becomes active.
///
/// Implementations fetch whatever the view shows and stash the resulting
/// snapshot; the router guarantees they only run for a signed-in fan.
#[async_trait]
pub trait ViewInitializer: Send + Sync {
    /// Refresh the view's data for the signed-in fan.
    ///
    /// # Errors
    ///
    /// Returns `ViewError` when the refresh fails. The view stays active;
    /// the caller surfaces the failure in place as a transient notice.
    async fn enter(&self, session: &Session) -> Result<(), ViewError>;
}

/// Keeps the exactly-one-active-view invariant and runs view-entry side
/// effects.
///
/// Each activation bumps a monotonically increasing epoch. A refresh that
/// resolves after a later navigation can check [`ViewRouter::is_current`]
/// and drop its result instead of clobbering newer state; responses are
/// not guaranteed to complete in the order their requests were issued.
pub struct ViewRouter {
    initializers: HashMap<ActiveView, Arc<dyn ViewInitializer>>,
    active: Option<ActiveView>,
    epoch: u64,
}

impl ViewRouter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            initializers: HashMap::new(),
            active: None,
            epoch: 0,
        }
    }

    /// Register the initializer that runs whenever `view` activates.
    pub fn register(&mut self, view: ActiveView, initializer: Arc<dyn ViewInitializer>) {
        self.initializers.insert(view, initializer);
    }

    /// The currently active view; `None` while signed out.
    #[must_use]
    pub fn active(&self) -> Option<ActiveView> {
        self.active
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a refresh issued under `epoch` is still the latest
    /// navigation.
    #[must_use]
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    /// Activate a view and run its registered initializer.
    ///
    /// The previous view deactivates by exclusivity. Activating the
    /// already-active view re-runs its initializer, which doubles as the
    /// manual refresh. An initializer failure leaves the requested view
    /// active: a failed refresh is a notice, not a navigation dead-end.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unregistered` for a view with no initializer
    /// (the view does not activate), or the initializer's own error (the
    /// view stays active).
    pub async fn activate(
        &mut self,
        view: ActiveView,
        session: &Session,
    ) -> Result<u64, ViewError> {
        let initializer = self
            .initializers
            .get(&view)
            .cloned()
            .ok_or(ViewError::Unregistered(view))?;

        self.active = Some(view);
        self.epoch += 1;
        let epoch = self.epoch;

        initializer.enter(session).await?;
        Ok(epoch)
    }

    /// Leave the signed-in area entirely (sign-out).
    pub fn deactivate_all(&mut self) {
        self.active = None;
        self.epoch += 1;
    }
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use fanpulse_core::model::{DisplayName, TeamName, UserId};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn session() -> Session {
        Session::new(
            UserId::from_string("user_1"),
            DisplayName::new("Dana").unwrap(),
            TeamName::new("Arsenal").unwrap(),
        )
    }

    #[derive(Default)]
    struct Probe {
        entries: AtomicUsize,
        fail: AtomicBool,
    }

    impl Probe {
        fn entries(&self) -> usize {
            self.entries.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ViewInitializer for Probe {
        async fn enter(&self, _session: &Session) -> Result<(), ViewError> {
            self.entries.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(ViewError::Api(ApiError::Timeout));
            }
            Ok(())
        }
    }

    fn router_with_probes() -> (ViewRouter, HashMap<ActiveView, Arc<Probe>>) {
        let mut router = ViewRouter::new();
        let mut probes = HashMap::new();
        for view in ActiveView::ALL {
            let probe = Arc::new(Probe::default());
            router.register(view, probe.clone());
            probes.insert(view, probe);
        }
        (router, probes)
    }

    #[tokio::test]
    async fn exactly_one_view_is_active_across_any_sequence() {
        let (mut router, _probes) = router_with_probes();
        let session = session();
        assert_eq!(router.active(), None);

        for target in [
            ActiveView::Quiz,
            ActiveView::Leaderboard,
            ActiveView::Quiz,
            ActiveView::Dashboard,
            ActiveView::Predictions,
        ] {
            router.activate(target, &session).await.unwrap();
            assert_eq!(router.active(), Some(target));
        }
    }

    #[tokio::test]
    async fn reactivation_reruns_the_initializer() {
        let (mut router, probes) = router_with_probes();
        let session = session();

        router.activate(ActiveView::Leaderboard, &session).await.unwrap();
        router.activate(ActiveView::Leaderboard, &session).await.unwrap();

        assert_eq!(probes[&ActiveView::Leaderboard].entries(), 2);
    }

    #[tokio::test]
    async fn a_failed_initializer_leaves_the_view_active() {
        let (mut router, probes) = router_with_probes();
        let session = session();
        probes[&ActiveView::Dashboard].fail.store(true, Ordering::SeqCst);

        let err = router
            .activate(ActiveView::Dashboard, &session)
            .await
            .unwrap_err();
        assert!(matches!(err, ViewError::Api(ApiError::Timeout)));
        assert_eq!(router.active(), Some(ActiveView::Dashboard));
    }

    #[tokio::test]
    async fn an_unregistered_view_does_not_activate() {
        let mut router = ViewRouter::new();
        let err = router
            .activate(ActiveView::Quiz, &session())
            .await
            .unwrap_err();
        assert!(matches!(err, ViewError::Unregistered(ActiveView::Quiz)));
        assert_eq!(router.active(), None);
    }

    #[tokio::test]
    async fn epochs_supersede_older_navigations() {
        let (mut router, _probes) = router_with_probes();
        let session = session();

        let first = router.activate(ActiveView::Quiz, &session).await.unwrap();
        assert!(router.is_current(first));

        let second = router
            .activate(ActiveView::Leaderboard, &session)
            .await
            .unwrap();
        assert!(!router.is_current(first));
        assert!(router.is_current(second));
        assert!(second > first);

        router.deactivate_all();
        assert!(!router.is_current(second));
        assert_eq!(router.active(), None);
    }
}
