use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Deadline {
    expiry: Instant,
}

impl Deadline {
    pub fn from_now(millis: u64) -> Deadline {
        Deadline::after(Duration::from_millis(millis))
    }

    pub fn after(duration: Duration) -> Deadline {
        Deadline {
            expiry: Instant::now() + duration,
        }
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.expiry
    }
}

/// Optional bounds on a single search. The time budget starts counting when
/// the search starts. With neither bound set the search always runs to its
/// full depth.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub time_budget: Option<Duration>,
    pub node_budget: Option<u64>,
}

impl SearchLimits {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    pub fn with_node_budget(mut self, nodes: u64) -> Self {
        self.node_budget = Some(nodes);
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.time_budget.is_none() && self.node_budget.is_none()
    }

    pub(crate) fn start(&self) -> Option<Deadline> {
        self.time_budget.map(Deadline::after)
    }

    pub(crate) fn exhausted(&self, nodes_visited: u64, deadline: Option<&Deadline>) -> bool {
        if let Some(budget) = self.node_budget {
            if nodes_visited > budget {
                return true;
            }
        }
        deadline.map_or(false, Deadline::expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_limits_are_never_exhausted() {
        let limits = SearchLimits::none();
        assert!(limits.is_unbounded());
        assert!(limits.start().is_none());
        assert!(!limits.exhausted(u64::MAX, None));
    }

    #[test]
    fn test_node_budget() {
        let limits = SearchLimits::none().with_node_budget(10);
        assert!(!limits.is_unbounded());
        assert!(!limits.exhausted(10, None));
        assert!(limits.exhausted(11, None));
    }

    #[test]
    fn test_deadline() {
        assert!(Deadline::from_now(0).expired());
        assert!(!Deadline::after(Duration::from_secs(3600)).expired());

        let limits = SearchLimits::none().with_time_budget(Duration::from_secs(0));
        let deadline = limits.start();
        assert!(deadline.is_some());
        assert!(limits.exhausted(0, deadline.as_ref()));
    }
}
