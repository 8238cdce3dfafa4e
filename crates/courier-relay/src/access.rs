// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static allow-list membership check.
//!
//! An empty allow-list means open access: every account passes the gate.

use std::collections::HashSet;

use courier_core::UserId;

/// Allow-list gate consulted by every relay event handler.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    allowed: HashSet<UserId>,
}

impl AccessPolicy {
    /// Builds the policy from configured account ids.
    pub fn from_ids(ids: &[u64]) -> Self {
        Self {
            allowed: ids.iter().copied().map(UserId).collect(),
        }
    }

    /// Whether the given account may use the relay.
    ///
    /// Unconditionally true when no allow-list is configured.
    pub fn is_allowed(&self, user: UserId) -> bool {
        self.allowed.is_empty() || self.allowed.contains(&user)
    }

    /// Whether the relay is open to every account.
    pub fn is_open(&self) -> bool {
        self.allowed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_allows_everyone() {
        let policy = AccessPolicy::from_ids(&[]);
        assert!(policy.is_open());
        assert!(policy.is_allowed(UserId(1)));
        assert!(policy.is_allowed(UserId(u64::MAX)));
    }

    #[test]
    fn non_empty_list_admits_members_only() {
        let policy = AccessPolicy::from_ids(&[42, 1001]);
        assert!(!policy.is_open());
        assert!(policy.is_allowed(UserId(42)));
        assert!(policy.is_allowed(UserId(1001)));
        assert!(!policy.is_allowed(UserId(7)));
    }
}
