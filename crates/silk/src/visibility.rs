//! Boolean gate over the host's intersection notifications.
//!
//! Partial intersection ratios are collapsed to a single boolean: any
//! positive overlap counts as visible. The gate only reports edges; the
//! lifecycle controller owns the running flag and the scheduling decisions
//! that follow from a transition.

/// Outcome of feeding one intersection notification to the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityTransition {
    /// The render target just entered the viewport; start the loop.
    BecameVisible,
    /// The render target just left the viewport; let the loop drain.
    BecameHidden,
    /// Repeated notification with no state change.
    Unchanged,
}

/// Two-state machine over {NotVisible, Visible}, initial NotVisible.
#[derive(Debug, Default)]
pub struct VisibilityGate {
    in_view: bool,
}

impl VisibilityGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.in_view
    }

    /// Records an intersection notification and reports the edge, if any.
    ///
    /// Idempotent with respect to repeated firing of the host observer.
    pub fn observe(&mut self, intersecting: bool) -> VisibilityTransition {
        let was_in_view = self.in_view;
        self.in_view = intersecting;
        match (was_in_view, intersecting) {
            (false, true) => VisibilityTransition::BecameVisible,
            (true, false) => VisibilityTransition::BecameHidden,
            _ => VisibilityTransition::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_not_visible() {
        assert!(!VisibilityGate::new().is_visible());
    }

    #[test]
    fn reports_edges_only() {
        let mut gate = VisibilityGate::new();
        assert_eq!(gate.observe(true), VisibilityTransition::BecameVisible);
        assert_eq!(gate.observe(true), VisibilityTransition::Unchanged);
        assert_eq!(gate.observe(false), VisibilityTransition::BecameHidden);
        assert_eq!(gate.observe(false), VisibilityTransition::Unchanged);
    }
}
