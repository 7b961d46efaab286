//! Per-page DOM id allocation.

/// Allocates unique ids for collapsible blocks within one rendered page.
///
/// Create one per page so ids restart at zero and repeated renders produce
/// identical output.
#[derive(Debug, Default)]
pub struct IdCounter {
    next: usize,
}

impl IdCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id of the form `sub-<name>-<depth>-<n>`.
    pub fn sub_id(&mut self, name: &str, depth: usize) -> String {
        let id = format!("sub-{name}-{depth}-{}", self.next);
        self.next += 1;
        id
    }

    /// Start numbering from zero again.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ids_are_sequential() {
        let mut ids = IdCounter::new();
        assert_eq!(ids.sub_id("config", 0), "sub-config-0-0");
        assert_eq!(ids.sub_id("rules", 1), "sub-rules-1-1");
        assert_eq!(ids.sub_id("config", 0), "sub-config-0-2");
    }

    #[test]
    fn test_reset() {
        let mut ids = IdCounter::new();
        ids.sub_id("a", 0);
        ids.reset();
        assert_eq!(ids.sub_id("a", 0), "sub-a-0-0");
    }
}
