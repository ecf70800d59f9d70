//
//  mediawiki-butt
//  api/limits.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Result-size limits.
//!
//! MediaWiki caps how many items a single list query may return, and the cap
//! depends on whether the account holds the `apihighlimits` right that bots
//! get. Requests above the cap are clamped rather than rejected.
//!
//! | Operation | Normal user | Bot |
//! |-----------|-------------|-----|
//! | Most lists | 500 | 5000 |
//! | `list=random` | 10 | 20 |
//!
//! ```rust
//! use mediawiki_butt::api::{normalize_limit, LimitCaps};
//!
//! assert_eq!(normalize_limit(10_000, LimitCaps::DEFAULT, false).unwrap(), 500);
//! assert_eq!(normalize_limit(10_000, LimitCaps::DEFAULT, true).unwrap(), 5000);
//! assert_eq!(normalize_limit(42, LimitCaps::DEFAULT, false).unwrap(), 42);
//! assert!(normalize_limit(0, LimitCaps::DEFAULT, true).is_err());
//! ```

use super::common::{ApiError, ApiResult};

/// Maximum result counts for one operation, per privilege tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitCaps {
    /// Cap for anonymous and ordinary accounts.
    pub user: u32,
    /// Cap for accounts in the `bot` group.
    pub bot: u32,
}

impl LimitCaps {
    /// Caps shared by most list queries.
    pub const DEFAULT: Self = Self {
        user: 500,
        bot: 5000,
    };

    /// Caps for `list=random`.
    pub const RANDOM: Self = Self { user: 10, bot: 20 };

    /// The cap that applies to the given tier.
    pub fn cap(&self, privileged: bool) -> u32 {
        if privileged {
            self.bot
        } else {
            self.user
        }
    }
}

impl Default for LimitCaps {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Clamps `requested` to the cap for the caller's tier.
///
/// The result never exceeds the requested value.
///
/// # Errors
///
/// Returns [`ApiError::InvalidArgument`] when `requested` is zero or negative.
pub fn normalize_limit(requested: i64, caps: LimitCaps, privileged: bool) -> ApiResult<u32> {
    if requested <= 0 {
        return Err(ApiError::InvalidArgument(format!(
            "limit must be positive, got {}",
            requested
        )));
    }

    let cap = caps.cap(privileged);
    Ok(u32::try_from(requested).map_or(cap, |r| r.min(cap)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_exceeds_cap() {
        for caps in [LimitCaps::DEFAULT, LimitCaps::RANDOM] {
            for privileged in [false, true] {
                let cap = caps.cap(privileged);
                for requested in [1, 2, 9, 10, 11, 20, 499, 500, 501, 4999, 5000, 5001, i64::MAX] {
                    let effective = normalize_limit(requested, caps, privileged).unwrap();
                    assert!(effective <= cap);
                    if requested <= i64::from(cap) {
                        assert_eq!(i64::from(effective), requested);
                    } else {
                        assert_eq!(effective, cap);
                    }
                }
            }
        }
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(matches!(
            normalize_limit(0, LimitCaps::DEFAULT, false),
            Err(ApiError::InvalidArgument(_))
        ));
        assert!(matches!(
            normalize_limit(-5, LimitCaps::RANDOM, true),
            Err(ApiError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_random_caps() {
        assert_eq!(normalize_limit(15, LimitCaps::RANDOM, false).unwrap(), 10);
        assert_eq!(normalize_limit(15, LimitCaps::RANDOM, true).unwrap(), 15);
        assert_eq!(normalize_limit(25, LimitCaps::RANDOM, true).unwrap(), 20);
    }
}
