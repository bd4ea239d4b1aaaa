use crate::identity::{IdentityError, Roster, UserId};

/// Hands out user ids from a counter that only moves forward, so an id is
/// never reissued after its user is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    /// `None` once `u64::MAX` has been observed or handed out
    next: Option<u64>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: Some(1) }
    }
}

impl IdAllocator {
    /// Start above every numeric id already in the roster
    pub fn seeded_from(roster: &Roster) -> Self {
        let mut allocator = Self::default();
        for user in roster.iter() {
            allocator.observe(&user.id);
        }
        allocator
    }

    /// Bump the counter past an externally supplied id. Non-numeric ids
    /// cannot collide with allocated ones and are ignored.
    pub fn observe(&mut self, id: &str) {
        let Ok(value) = id.parse::<u64>() else {
            return;
        };
        if let Some(next) = self.next {
            if value >= next {
                self.next = value.checked_add(1);
            }
        }
    }

    /// Next free id, or `IdsExhausted` once the counter has run out
    pub fn allocate(&mut self) -> Result<UserId, IdentityError> {
        let id = self.next.ok_or(IdentityError::IdsExhausted)?;
        self.next = id.checked_add(1);
        Ok(id.to_string())
    }

    pub fn peek(&self) -> Option<u64> {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::seed;

    #[test]
    fn test_seeded_allocator_starts_after_highest_id() {
        let allocator = IdAllocator::seeded_from(&seed::roster());
        assert_eq!(allocator.peek(), Some(5));
    }

    #[test]
    fn test_allocation_is_monotonic() {
        let mut allocator = IdAllocator::default();
        assert_eq!(allocator.allocate().unwrap(), "1");
        assert_eq!(allocator.allocate().unwrap(), "2");

        // Observing a lower id never moves the counter back
        allocator.observe("1");
        assert_eq!(allocator.allocate().unwrap(), "3");
    }

    #[test]
    fn test_observe_skips_non_numeric_ids() {
        let mut allocator = IdAllocator::default();
        allocator.observe("usr-abc");
        allocator.observe("41");
        assert_eq!(allocator.allocate().unwrap(), "42");
    }

    #[test]
    fn test_exhausted_counter_refuses_to_allocate() {
        let mut allocator = IdAllocator::default();
        allocator.observe(&u64::MAX.to_string());
        assert_eq!(allocator.peek(), None);
        assert_eq!(allocator.allocate(), Err(IdentityError::IdsExhausted));

        // Nothing moves the counter back once it has run out
        allocator.observe("3");
        assert_eq!(allocator.allocate(), Err(IdentityError::IdsExhausted));
    }

    #[test]
    fn test_last_id_is_handed_out_once() {
        let mut allocator = IdAllocator::default();
        allocator.observe(&(u64::MAX - 1).to_string());
        assert_eq!(allocator.allocate().unwrap(), u64::MAX.to_string());
        assert_eq!(allocator.allocate(), Err(IdentityError::IdsExhausted));
    }
}
