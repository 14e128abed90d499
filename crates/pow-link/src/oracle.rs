//! Candidate oracle collaborators.
//!
//! The oracle is the external search service that turns a query string into
//! ranked candidates. Retrying is the oracle side's job; the linking driver
//! only sees the final outcome of a call.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::candidate::RawCandidate;
use crate::error::OracleError;

/// Candidate generation for a query string.
pub trait CandidateOracle {
    /// Candidates in ranked order. An empty list is a valid answer.
    fn query(&self, text: &str) -> Result<Vec<RawCandidate>, OracleError>;
}

impl<O: CandidateOracle + ?Sized> CandidateOracle for &O {
    fn query(&self, text: &str) -> Result<Vec<RawCandidate>, OracleError> {
        (**self).query(text)
    }
}

/// Retry policy of an oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Attempts after the first failure.
    pub retries: u32,
    pub retry_delay_ms: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            retry_delay_ms: 3000,
        }
    }
}

/// Wraps an oracle with a bounded number of retries and a fixed delay.
#[derive(Debug, Clone)]
pub struct RetryingOracle<O> {
    inner: O,
    retries: u32,
    delay: Duration,
}

impl<O: CandidateOracle> RetryingOracle<O> {
    pub fn new(inner: O, config: OracleConfig) -> Self {
        Self {
            inner,
            retries: config.retries,
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

impl<O: CandidateOracle> CandidateOracle for RetryingOracle<O> {
    fn query(&self, text: &str) -> Result<Vec<RawCandidate>, OracleError> {
        let mut attempt = 1;
        loop {
            match self.inner.query(text) {
                Ok(candidates) => return Ok(candidates),
                Err(error) if attempt > self.retries => {
                    return Err(OracleError::Exhausted {
                        attempts: attempt,
                        last: Box::new(error),
                    });
                }
                Err(error) => {
                    warn!(%error, attempt, "oracle call failed, retrying");
                    attempt += 1;
                    if !self.delay.is_zero() {
                        thread::sleep(self.delay);
                    }
                }
            }
        }
    }
}

/// Oracle answering from a JSON file that maps query strings to candidate
/// lists. Unknown queries have no candidates.
#[derive(Debug, Clone, Default)]
pub struct JsonOracle {
    answers: BTreeMap<String, Vec<RawCandidate>>,
}

impl JsonOracle {
    pub fn new(answers: BTreeMap<String, Vec<RawCandidate>>) -> Self {
        Self { answers }
    }

    pub fn load(path: &Path) -> Result<Self, OracleError> {
        let content = fs::read_to_string(path).map_err(|source| OracleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let answers = serde_json::from_str(&content).map_err(|source| OracleError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { answers })
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl CandidateOracle for JsonOracle {
    fn query(&self, text: &str) -> Result<Vec<RawCandidate>, OracleError> {
        let candidates = self.answers.get(text.trim()).cloned().unwrap_or_default();
        debug!(query = text, found = candidates.len(), "oracle lookup");
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct Flaky {
        failures: Cell<u32>,
        calls: Cell<u32>,
    }

    impl CandidateOracle for Flaky {
        fn query(&self, text: &str) -> Result<Vec<RawCandidate>, OracleError> {
            self.calls.set(self.calls.get() + 1);
            if self.failures.get() > 0 {
                self.failures.set(self.failures.get() - 1);
                return Err(OracleError::Request {
                    query: text.to_string(),
                    message: "timeout".into(),
                });
            }
            Ok(vec![RawCandidate::new("http://example.org/x")])
        }
    }

    fn no_delay(retries: u32) -> OracleConfig {
        OracleConfig {
            retries,
            retry_delay_ms: 0,
        }
    }

    #[test]
    fn retries_until_success() {
        let flaky = Flaky {
            failures: Cell::new(2),
            calls: Cell::new(0),
        };
        let oracle = RetryingOracle::new(&flaky, no_delay(3));
        assert_eq!(oracle.query("JR 7").unwrap().len(), 1);
        assert_eq!(flaky.calls.get(), 3);
    }

    #[test]
    fn gives_up_after_retries() {
        let flaky = Flaky {
            failures: Cell::new(10),
            calls: Cell::new(0),
        };
        let oracle = RetryingOracle::new(&flaky, no_delay(2));
        let error = oracle.query("JR 7").unwrap_err();
        assert!(matches!(error, OracleError::Exhausted { attempts: 3, .. }));
        assert_eq!(flaky.calls.get(), 3);
    }

    #[test]
    fn json_oracle_answers_known_queries() {
        let json = r#"{"sotamies": [{"id": "http://ldf.fi/warsa/actors/ranks/Sotamies"}]}"#;
        let answers = serde_json::from_str(json).unwrap();
        let oracle = JsonOracle::new(answers);
        assert_eq!(oracle.query(" sotamies ").unwrap().len(), 1);
        assert!(oracle.query("kenraali").unwrap().is_empty());
    }
}
