//! Record handles
//!
//! Every outline parsed or created during a session gets a handle. Handles
//! never change when an outline is renamed, which lets the writer put each
//! record back where the original file had it.

use std::fmt;

/// Opaque identifier for a record inside one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    /// The null handle (0), never assigned to a record
    pub const NULL: Handle = Handle(0);

    /// Create a new handle from a raw value
    #[inline]
    pub const fn new(value: u64) -> Self {
        Handle(value)
    }

    /// Get the raw value
    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Check if this is the null handle
    #[inline]
    pub const fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Handle {
    fn default() -> Self {
        Handle::NULL
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_handle() {
        assert!(Handle::NULL.is_null());
        assert!(!Handle::new(3).is_null());
        assert_eq!(Handle::default(), Handle::NULL);
    }

    #[test]
    fn test_handle_display_and_order() {
        assert_eq!(Handle::new(12).to_string(), "#12");
        assert!(Handle::new(1) < Handle::new(2));
    }
}
