//! Category selection with generation tokens
//!
//! Every fetch is stamped with the generation current when it was issued.
//! A response is applied only if its ticket still matches, so a slow answer
//! for an abandoned selection is dropped instead of overwriting a newer one.

/// Stamp carried by one in-flight fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub category: Option<String>,
}

/// Active category plus the generation counter
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    active: Option<String>,
    generation: u64,
}

impl CategoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switch category. Returns `None` when `category` is already active.
    pub fn select(&mut self, category: Option<&str>) -> Option<FetchTicket> {
        if self.active.as_deref() == category {
            return None;
        }
        self.active = category.map(str::to_string);
        Some(self.issue())
    }

    /// Refetch the active category, superseding anything in flight
    pub fn refresh(&mut self) -> FetchTicket {
        self.issue()
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    fn issue(&mut self) -> FetchTicket {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            category: self.active.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_selection_is_noop() {
        let mut filter = CategoryFilter::new();
        let ticket = filter.select(Some("shoes")).unwrap();
        assert_eq!(ticket.category.as_deref(), Some("shoes"));
        assert!(filter.select(Some("shoes")).is_none());
        assert_eq!(filter.generation(), 1);
    }

    #[test]
    fn test_null_transitions_issue_tickets() {
        let mut filter = CategoryFilter::new();
        assert!(filter.select(None).is_none());
        assert!(filter.select(Some("hats")).is_some());
        let back = filter.select(None).unwrap();
        assert_eq!(back.category, None);
        assert_eq!(filter.active(), None);
    }

    #[test]
    fn test_newer_ticket_supersedes() {
        let mut filter = CategoryFilter::new();
        let hats = filter.select(Some("hats")).unwrap();
        let shoes = filter.select(Some("shoes")).unwrap();
        assert!(!filter.is_current(&hats));
        assert!(filter.is_current(&shoes));

        let again = filter.refresh();
        assert!(!filter.is_current(&shoes));
        assert_eq!(again.category.as_deref(), Some("shoes"));
    }
}
