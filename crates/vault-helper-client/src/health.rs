//! System health probe and readiness diagnosis

use serde::Deserialize;
use std::fmt;

/// Snapshot of the service's self-reported readiness flags.
///
/// Refreshed on every readiness check, never cached.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub initialized: bool,
    #[serde(default)]
    pub sealed: bool,
    #[serde(default)]
    pub standby: bool,
}

impl HealthStatus {
    /// Ready to receive requests: initialized, unsealed, active node
    pub fn ready(&self) -> bool {
        self.initialized && !self.sealed && !self.standby
    }

    /// Diagnose why the service is not ready, in priority order
    ///
    /// Returns `None` when the service is ready.
    pub fn diagnose(&self) -> Option<UnreadyReason> {
        if self.ready() {
            return None;
        }

        if !self.initialized {
            Some(UnreadyReason::NotInitialized)
        } else if self.sealed {
            Some(UnreadyReason::Sealed)
        } else if self.standby {
            Some(UnreadyReason::Standby)
        } else {
            Some(UnreadyReason::NotReady)
        }
    }
}

/// Why the service cannot serve requests right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreadyReason {
    /// The server has not been initialized
    NotInitialized,
    /// The server is sealed
    Sealed,
    /// The server is a standby node, not the active one
    Standby,
    /// Not ready for an unreported reason
    NotReady,
}

impl fmt::Display for UnreadyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "expected the server to be initialized"),
            Self::Sealed => write!(f, "expected the server to be unsealed"),
            Self::Standby => write!(f, "expected the server to be the active node"),
            Self::NotReady => write!(f, "the server does not appear ready to receive requests"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(initialized: bool, sealed: bool, standby: bool) -> HealthStatus {
        HealthStatus {
            initialized,
            sealed,
            standby,
        }
    }

    #[test]
    fn test_ready() {
        assert!(status(true, false, false).ready());
        assert!(!status(false, false, false).ready());
        assert!(!status(true, true, false).ready());
        assert!(!status(true, false, true).ready());
    }

    #[test]
    fn test_diagnosis_priority_order() {
        // Not-initialized outranks sealed and standby
        assert_eq!(
            status(false, true, true).diagnose(),
            Some(UnreadyReason::NotInitialized)
        );
        // Sealed outranks standby
        assert_eq!(
            status(true, true, true).diagnose(),
            Some(UnreadyReason::Sealed)
        );
        assert_eq!(
            status(true, false, true).diagnose(),
            Some(UnreadyReason::Standby)
        );
        assert_eq!(status(true, false, false).diagnose(), None);
    }

    #[test]
    fn test_deserialize_defaults_missing_flags() {
        let health: HealthStatus = serde_json::from_str("{}").unwrap();
        assert!(!health.initialized);
        assert!(!health.sealed);
        assert!(!health.standby);
    }
}
