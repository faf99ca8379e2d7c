//! Reading memos with a set of candidate keys.
//!
//! An account's memo key may have been rotated over time, so history is read
//! with every key the holder ever had. Each candidate is tried in order;
//! candidates that do not decode or do not open the memo are recorded and
//! skipped, never propagated.

use crate::{
    error::Error,
    memo::envelope::MemoEnvelope,
    secp256k1::Secp256k1SecretKey,
};

/// Which successful candidate wins when several open the same memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPolicy {
    /// Stop at the first candidate that opens the memo.
    #[default]
    FirstMatch,
    /// Try every candidate and keep the last success.
    LastMatch,
}

/// Outcome of reading one memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoScan {
    /// No memo is attached.
    NoMemo,
    /// The memo was read.
    Decrypted(String),
    /// A memo is attached but none of the candidates opens it.
    Undecryptable,
}

impl MemoScan {
    /// Text of a decrypted memo.
    pub fn text(&self) -> Option<&str> {
        match self {
            MemoScan::Decrypted(text) => Some(text),
            _ => None,
        }
    }
}

/// A candidate that was skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    /// Position in the candidate list.
    pub index: usize,
    /// [`Error::WrongPrivateKey`] or [`Error::DecryptionFailed`].
    pub error: Error,
}

/// Everything a scan found out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// The result.
    pub outcome: MemoScan,
    /// Index of the candidate that produced the result, if any.
    pub matched: Option<usize>,
    /// Candidates that were tried and failed, in order.
    pub failures: Vec<CandidateFailure>,
}

impl ScanReport {
    fn finished(outcome: MemoScan) -> Self {
        ScanReport {
            outcome,
            matched: None,
            failures: Vec::new(),
        }
    }
}

/// Tries candidate keys against memos.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoScanner {
    policy: ScanPolicy,
}

impl MemoScanner {
    /// Scanner with the given policy.
    pub fn new(policy: ScanPolicy) -> Self {
        MemoScanner { policy }
    }

    /// Policy in use.
    pub fn policy(&self) -> ScanPolicy {
        self.policy
    }

    /// Reads `envelope` with the WIF keys in `candidates`.
    pub fn scan<S: AsRef<str>>(
        &self,
        envelope: Option<&MemoEnvelope>,
        candidates: &[S],
    ) -> ScanReport {
        let envelope = match envelope {
            Some(envelope) if !envelope.is_empty() => envelope,
            _ => return ScanReport::finished(MemoScan::NoMemo),
        };

        if !envelope.is_encrypted() {
            let outcome = match envelope.open_plain() {
                Ok(text) => MemoScan::Decrypted(text),
                Err(_) => MemoScan::Undecryptable,
            };
            return ScanReport::finished(outcome);
        }

        let mut report = ScanReport::finished(MemoScan::Undecryptable);
        for (index, candidate) in candidates.iter().enumerate() {
            match try_candidate(envelope, candidate.as_ref()) {
                Ok(text) => {
                    tracing::trace!(index, "memo opened");
                    report.outcome = MemoScan::Decrypted(text);
                    report.matched = Some(index);
                    if self.policy == ScanPolicy::FirstMatch {
                        break;
                    }
                }
                Err(error) => {
                    tracing::trace!(index, %error, "memo candidate skipped");
                    report.failures.push(CandidateFailure { index, error });
                }
            }
        }

        tracing::debug!(
            candidates = candidates.len(),
            failures = report.failures.len(),
            matched = ?report.matched,
            "memo scan finished"
        );
        report
    }
}

fn try_candidate(envelope: &MemoEnvelope, wif: &str) -> Result<String, Error> {
    let secret = Secp256k1SecretKey::from_wif(wif)?;
    envelope.open(&secret)
}

/// Memo text, or an empty string when there is no memo or no candidate
/// opens it. Uses [`ScanPolicy::FirstMatch`].
///
/// Use [`MemoScanner::scan`] to tell those two cases apart.
pub fn decrypted_message<S: AsRef<str>>(envelope: Option<&MemoEnvelope>, candidates: &[S]) -> String {
    match MemoScanner::default().scan(envelope, candidates).outcome {
        MemoScan::Decrypted(text) => text,
        MemoScan::NoMemo | MemoScan::Undecryptable => String::new(),
    }
}
