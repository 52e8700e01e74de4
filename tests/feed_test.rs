//! Feed preparation tests
//!
//! Converts a three-currency rate snapshot into feed documents and checks
//! index assignment, factors and the JSONL output.

use multicur::feed::{build_currency_docs, snapshot_date, to_jsonl, CurrencyDoc};

const RATES_XML: &str = r#"
<rates time="2021-01-05">
  <currencies>
    <currency code="USD" name="US Dollar"/>
    <currency code="EUR" name="Euro"/>
    <currency code="NOK" name="Norwegian Krone"/>
  </currencies>
  <rate from="USD" to="USD" rate="1.0"/>
  <rate from="USD" to="EUR" rate="0.89879561"/>
  <rate from="USD" to="NOK" rate="10.61571125"/>
  <rate from="EUR" to="USD" rate="1.21521449"/>
  <rate from="EUR" to="EUR" rate="1.0"/>
  <rate from="EUR" to="NOK" rate="12.33045623"/>
  <rate from="NOK" to="USD" rate="0.10324712"/>
  <rate from="NOK" to="EUR" rate="0.08890074"/>
  <rate from="NOK" to="NOK" rate="1.0"/>
</rates>
"#;

#[test]
fn test_snapshot_date_extraction() {
    let date = snapshot_date(RATES_XML).unwrap();
    assert_eq!(date.format("%Y-%m-%d").to_string(), "2021-01-05");
}

#[test]
fn test_indices_follow_sorted_code_order() {
    let docs = build_currency_docs(RATES_XML).unwrap();

    let codes: Vec<(&str, u32)> = docs
        .iter()
        .map(|doc| (doc.fields.code.as_str(), doc.fields.idx))
        .collect();
    assert_eq!(codes, vec![("eur", 0), ("nok", 1), ("usd", 2)]);
}

#[test]
fn test_usd_factor_per_currency() {
    let docs = build_currency_docs(RATES_XML).unwrap();

    let factor_of = |code: &str| {
        docs.iter()
            .find(|doc| doc.fields.code == code)
            .map(|doc| doc.fields.factor)
            .unwrap()
    };

    assert_eq!(factor_of("usd"), 1.0);
    assert_eq!(factor_of("eur"), 1.21521449);
    assert_eq!(factor_of("nok"), 0.10324712);
}

#[test]
fn test_factor_map_holds_all_outbound_rates() {
    let docs = build_currency_docs(RATES_XML).unwrap();

    let nok = docs.iter().find(|doc| doc.fields.code == "nok").unwrap();
    assert_eq!(nok.fields.factor_map.len(), 3);
    assert_eq!(nok.fields.factor_map.get("eur"), Some(&0.08890074));
    assert_eq!(nok.fields.factor_map.get("nok"), Some(&1.0));
}

#[test]
fn test_document_ids() {
    let docs = build_currency_docs(RATES_XML).unwrap();
    let ids: Vec<&str> = docs.iter().map(|doc| doc.id.as_str()).collect();
    assert_eq!(ids, vec!["currency::eur", "currency::nok", "currency::usd"]);
}

#[test]
fn test_jsonl_round_trip() {
    let docs = build_currency_docs(RATES_XML).unwrap();
    let jsonl = to_jsonl(&docs).unwrap();

    let parsed: Vec<CurrencyDoc> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(parsed, docs);
}

#[test]
fn test_feed_fails_without_usd_conversion() {
    let xml = r#"
        <currency code="SEK"/>
        <currency code="DKK"/>
        <rate from="SEK" to="DKK" rate="0.7"/>
        <rate from="DKK" to="SEK" rate="1.43"/>
    "#;
    assert!(build_currency_docs(xml).is_err());
}
