//! Memos: short private messages attached to transfers.
//!
//! [`cipher`] is the raw encryption, [`envelope`] the memo as it travels with
//! a transfer, and [`scanner`] reads memos with a set of candidate keys.

pub mod cipher;
pub mod envelope;
pub mod scanner;

// Re-export
pub use self::{
    cipher::{decrypt, encrypt, generate_nonce},
    envelope::MemoEnvelope,
    scanner::{decrypted_message, CandidateFailure, MemoScan, MemoScanner, ScanPolicy, ScanReport},
};
