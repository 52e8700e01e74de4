//! Feed preparation
//!
//! Conversion of exchange-rate snapshots into index-ready currency documents.

mod currency_docs;

pub use currency_docs::{build_currency_docs, snapshot_date, to_jsonl, CurrencyDoc, CurrencyFields};
