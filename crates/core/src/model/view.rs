use std::fmt;

/// The top-level screens of the signed-in client. Exactly one is active at
/// any time; switching is always an explicit navigation action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActiveView {
    Dashboard,
    Quiz,
    Leaderboard,
    Predictions,
}

impl ActiveView {
    pub const ALL: [ActiveView; 4] = [
        ActiveView::Dashboard,
        ActiveView::Quiz,
        ActiveView::Leaderboard,
        ActiveView::Predictions,
    ];

    /// Stable name, suitable for element ids and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ActiveView::Dashboard => "dashboard",
            ActiveView::Quiz => "quiz",
            ActiveView::Leaderboard => "leaderboard",
            ActiveView::Predictions => "predictions",
        }
    }
}

impl fmt::Display for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
