//! Currency document feed preparation
//!
//! Turns an exchange-rate XML snapshot into the currency documents the
//! backing index is fed with. Each declared currency becomes one document
//! carrying its index position, its to-USD factor and its full outbound
//! rate map.

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static CURRENCY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<currency\b[^>]*\bcode="([^"]+)""#).unwrap());
static RATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<rate\b[^>]*>").unwrap());
static FROM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\bfrom="([^"]+)""#).unwrap());
static TO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\bto="([^"]+)""#).unwrap());
static RATE_ATTR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\brate="([^"]+)""#).unwrap());
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\btime="(\d{4}-\d{2}-\d{2})""#).unwrap());

/// Stored fields of one currency document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyFields {
    /// Lowercase currency code
    pub code: String,
    /// Index tag assigned to documents priced in this currency
    pub idx: u32,
    /// Conversion factor to USD (1.0 for USD itself)
    pub factor: f64,
    /// Outbound conversion factors from this currency
    pub factor_map: HashMap<String, f64>,
}

/// One currency document ready to feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyDoc {
    /// Document identifier, `currency::{code}`
    pub id: String,
    /// Stored fields
    pub fields: CurrencyFields,
}

/// Date of the rate snapshot, when the XML carries one
pub fn snapshot_date(xml: &str) -> Option<NaiveDate> {
    let caps = TIME_RE.captures(xml)?;
    NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()
}

/// Build currency documents from a rate XML snapshot.
///
/// Index positions follow the sorted order of the declared currency codes.
/// A declared currency without a to-USD rate or without outbound rates makes
/// the whole feed fail; a partial feed would leave the index inconsistent.
pub fn build_currency_docs(xml: &str) -> Result<Vec<CurrencyDoc>> {
    let mut currencies: Vec<String> = CURRENCY_RE
        .captures_iter(xml)
        .map(|caps| caps[1].to_lowercase())
        .collect();
    currencies.sort();
    currencies.dedup();
    if currencies.is_empty() {
        bail!("no currency declarations found in rate XML");
    }

    let mut rate_map: HashMap<String, HashMap<String, f64>> = HashMap::new();
    for element in RATE_RE.find_iter(xml) {
        let element = element.as_str();
        let from = FROM_RE
            .captures(element)
            .ok_or_else(|| anyhow!("rate element without 'from': {}", element))?[1]
            .to_lowercase();
        let to = TO_RE
            .captures(element)
            .ok_or_else(|| anyhow!("rate element without 'to': {}", element))?[1]
            .to_lowercase();
        let rate: f64 = RATE_ATTR_RE
            .captures(element)
            .ok_or_else(|| anyhow!("rate element without 'rate': {}", element))?[1]
            .parse()
            .map_err(|e| anyhow!("unparseable rate in {}: {}", element, e))?;

        rate_map.entry(from).or_default().insert(to, rate);
    }

    let mut usd_factors: HashMap<String, f64> = HashMap::from([("usd".to_string(), 1.0)]);
    for (from, targets) in &rate_map {
        if let Some(rate) = targets.get("usd") {
            usd_factors.insert(from.clone(), *rate);
        }
    }

    let mut docs = Vec::with_capacity(currencies.len());
    for (idx, code) in currencies.iter().enumerate() {
        let factor = *usd_factors
            .get(code)
            .ok_or_else(|| anyhow!("currency {} has no USD conversion rate", code))?;
        let factor_map = rate_map
            .get(code)
            .ok_or_else(|| anyhow!("currency {} has no outbound rates", code))?
            .clone();

        docs.push(CurrencyDoc {
            id: format!("currency::{}", code),
            fields: CurrencyFields {
                code: code.clone(),
                idx: idx as u32,
                factor,
                factor_map,
            },
        });
    }

    tracing::info!("built {} currency documents", docs.len());
    Ok(docs)
}

/// Serialize documents to JSONL, one document per line
pub fn to_jsonl(docs: &[CurrencyDoc]) -> Result<String> {
    let mut out = String::new();
    for doc in docs {
        out.push_str(&serde_json::to_string(doc)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_XML: &str = r#"
        <rates time="2021-01-05">
          <currencies>
            <currency code="USD"/>
            <currency code="EUR"/>
          </currencies>
          <rate from="USD" to="USD" rate="1.0"/>
          <rate from="USD" to="EUR" rate="0.89879561"/>
          <rate from="EUR" to="USD" rate="1.21521449"/>
          <rate from="EUR" to="EUR" rate="1.0"/>
        </rates>
    "#;

    #[test]
    fn test_snapshot_date() {
        let date = snapshot_date(SAMPLE_XML).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 1, 5).unwrap());
    }

    #[test]
    fn test_snapshot_date_missing() {
        assert!(snapshot_date("<rates></rates>").is_none());
    }

    #[test]
    fn test_build_docs_assigns_sorted_indices() {
        let docs = build_currency_docs(SAMPLE_XML).unwrap();
        assert_eq!(docs.len(), 2);

        // Sorted codes: eur, usd
        assert_eq!(docs[0].fields.code, "eur");
        assert_eq!(docs[0].fields.idx, 0);
        assert_eq!(docs[1].fields.code, "usd");
        assert_eq!(docs[1].fields.idx, 1);
    }

    #[test]
    fn test_build_docs_usd_factors() {
        let docs = build_currency_docs(SAMPLE_XML).unwrap();

        let eur = &docs[0].fields;
        assert_eq!(eur.factor, 1.21521449);
        let usd = &docs[1].fields;
        assert_eq!(usd.factor, 1.0);
    }

    #[test]
    fn test_build_docs_factor_map() {
        let docs = build_currency_docs(SAMPLE_XML).unwrap();

        let usd = &docs[1].fields;
        assert_eq!(usd.factor_map.get("eur"), Some(&0.89879561));
        assert_eq!(usd.factor_map.get("usd"), Some(&1.0));
    }

    #[test]
    fn test_build_docs_without_currencies_fails() {
        assert!(build_currency_docs("<rates></rates>").is_err());
    }

    #[test]
    fn test_build_docs_missing_usd_rate_fails() {
        let xml = r#"
            <currency code="SEK"/>
            <rate from="SEK" to="SEK" rate="1.0"/>
        "#;
        let err = build_currency_docs(xml).unwrap_err();
        assert!(err.to_string().contains("USD conversion"));
    }

    #[test]
    fn test_to_jsonl_one_line_per_doc() {
        let docs = build_currency_docs(SAMPLE_XML).unwrap();
        let jsonl = to_jsonl(&docs).unwrap();

        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: CurrencyDoc = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.id, "currency::usd");
    }
}
