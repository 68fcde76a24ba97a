//! Explicit authentication capability.
//!
//! The dashboard never consults ambient session storage: callers hand it a
//! [`Session`] up front and the constructor refuses to build an
//! unauthenticated dashboard. Authorization itself happens upstream; this
//! type only carries the result.

/// Proof of an authenticated operator session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    logged_in: bool,
}

impl Session {
    /// A session for an operator who has already authenticated upstream.
    #[must_use]
    pub const fn authenticated() -> Self {
        Self { logged_in: true }
    }

    /// A session with no authenticated operator.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { logged_in: false }
    }

    /// Whether the operator is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.logged_in
    }

    /// Clear the logged-in flag. Navigation back to the entry surface is
    /// the caller's concern.
    pub fn logout(&mut self) {
        self.logged_in = false;
    }
}
