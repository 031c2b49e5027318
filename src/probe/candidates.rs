//! Candidate host ordering for the failover loop

use crate::config::ConfigError;

/// Ordered queue of broker candidate hosts
///
/// Exactly one candidate is current at any time. The pending list is popped
/// last-inserted-first, so the last-listed fallback URL is tried first.
/// Callers may depend on that order; do not change it to FIFO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQueue {
    current: String,
    pending: Vec<String>,
}

impl CandidateQueue {
    /// Build the queue from the preferred host and the fallback list
    ///
    /// The preferred host, if given, becomes the current candidate and the
    /// whole fallback list stays pending. Without a preferred host the first
    /// candidate is popped off the end of the fallback list. At least one
    /// host must be present.
    pub fn new(preferred: Option<String>, mut fallback: Vec<String>) -> Result<Self, ConfigError> {
        let current = match preferred {
            Some(host) => host,
            None => fallback.pop().ok_or(ConfigError::NoBrokerHost)?,
        };
        Ok(Self {
            current,
            pending: fallback,
        })
    }

    /// The host currently under test
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Number of candidates not yet tried
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Move to the next pending candidate, if any
    ///
    /// Returns false when the queue is exhausted. The current candidate is
    /// left in place so the last attempted host stays observable.
    pub fn advance(&mut self) -> bool {
        match self.pending.pop() {
            Some(next) => {
                self.current = next;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_preferred_host_is_current_first() {
        let queue = CandidateQueue::new(Some("pref".to_string()), hosts(&["a", "b"])).unwrap();
        assert_eq!(queue.current(), "pref");
        assert_eq!(queue.remaining(), 2);
    }

    #[test]
    fn test_without_preferred_last_fallback_is_tried_first() {
        let mut queue = CandidateQueue::new(None, hosts(&["a", "b", "c"])).unwrap();
        assert_eq!(queue.current(), "c");
        assert!(queue.advance());
        assert_eq!(queue.current(), "b");
        assert!(queue.advance());
        assert_eq!(queue.current(), "a");
        assert!(!queue.advance());
    }

    #[test]
    fn test_pending_is_a_stack_behind_the_preferred_host() {
        let mut queue = CandidateQueue::new(Some("pref".to_string()), hosts(&["a", "b"])).unwrap();
        assert!(queue.advance());
        assert_eq!(queue.current(), "b");
        assert!(queue.advance());
        assert_eq!(queue.current(), "a");
    }

    #[test]
    fn test_no_hosts_is_a_config_error() {
        let result = CandidateQueue::new(None, Vec::new());
        assert!(matches!(result, Err(ConfigError::NoBrokerHost)));
    }

    #[test]
    fn test_exhausted_queue_keeps_last_host_observable() {
        let mut queue = CandidateQueue::new(Some("only".to_string()), Vec::new()).unwrap();
        assert!(!queue.advance());
        assert_eq!(queue.current(), "only");
    }
}
