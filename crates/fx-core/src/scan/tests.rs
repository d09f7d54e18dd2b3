use super::*;

fn codes(text: &str) -> Vec<(String, String)> {
    tokenize(text)
        .into_iter()
        .map(|m| (m.text, m.currency_code.unwrap_or_default()))
        .collect()
}

fn pair(text: &str, code: &str) -> (String, String) {
    (text.to_string(), code.to_string())
}

#[test]
fn test_symbol_first() {
    let matches = tokenize("The price is €1,000.50 today");
    assert_eq!(matches.len(), 1);
    let m = &matches[0];
    assert_eq!(m.text, "€1,000.50");
    assert_eq!(m.numeric_literal, "1,000.50");
    assert_eq!(m.currency_code.as_deref(), Some("EUR"));
    assert_eq!(m.tag, CurrencyTag::Symbol("€".to_string()));
    assert_eq!(&"The price is €1,000.50 today"[m.start..m.end], m.text);
}

#[test]
fn test_symbol_with_space() {
    assert_eq!(codes("costs £ 25 now"), vec![pair("£ 25", "GBP")]);
}

#[test]
fn test_code_after_number() {
    let matches = tokenize("about 250 usd each");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].text, "250 usd");
    assert_eq!(matches[0].numeric_literal, "250");
    assert_eq!(matches[0].currency_code.as_deref(), Some("USD"));
    assert_eq!(matches[0].tag, CurrencyTag::Code("usd".to_string()));
}

#[test]
fn test_code_glued_to_number() {
    assert_eq!(codes("1.5MEUR"), vec![pair("1.5MEUR", "EUR")]);
    assert_eq!(codes("10BHD"), vec![pair("10BHD", "BHD")]);
}

#[test]
fn test_code_must_be_whole_word() {
    assert!(tokenize("100 USDT").is_empty());
    assert!(tokenize("100 EURO").is_empty());
}

#[test]
fn test_unknown_code_ignored() {
    assert!(tokenize("100 XYZ").is_empty());
}

#[test]
fn test_bare_number_never_matches() {
    assert!(tokenize("there are 1,000 people and 42 cats").is_empty());
}

#[test]
fn test_longest_symbol_wins() {
    assert_eq!(codes("A$40"), vec![pair("A$40", "AUD")]);
    assert_eq!(codes("NZ$40"), vec![pair("NZ$40", "NZD")]);
    assert_eq!(codes("HK$ 7.5"), vec![pair("HK$ 7.5", "HKD")]);
    assert_eq!(codes("R$12"), vec![pair("R$12", "BRL")]);
    assert_eq!(codes("CLP$900"), vec![pair("CLP$900", "CLP")]);
}

#[test]
fn test_letter_symbol_not_glued_to_word() {
    assert_eq!(codes("US$5"), vec![pair("$5", "USD")]);
    assert!(tokenize("FOR 100").is_empty());
}

#[test]
fn test_ambiguous_r_resolves_to_zar() {
    assert_eq!(codes("R100"), vec![pair("R100", "ZAR")]);
}

#[test]
fn test_ambiguous_symbols() {
    assert_eq!(codes("$5"), vec![pair("$5", "USD")]);
    assert_eq!(codes("¥500"), vec![pair("¥500", "JPY")]);
    assert_eq!(codes("kr 99"), vec![pair("kr 99", "SEK")]);
    assert_eq!(codes("Rs 250"), vec![pair("Rs 250", "LKR")]);
    assert_eq!(codes("₨250"), vec![pair("₨250", "PKR")]);
}

#[test]
fn test_magnitude_suffix() {
    let matches = tokenize("raised $2.5M and ₹3k");
    let literals: Vec<&str> = matches.iter().map(|m| m.numeric_literal.as_str()).collect();
    assert_eq!(literals, vec!["2.5M", "3k"]);
}

#[test]
fn test_number_must_end_at_boundary() {
    // "$5x" is not an amount; "$100px" neither.
    assert!(tokenize("$5x").is_empty());
    assert!(tokenize("width: $100px").is_empty());
}

#[test]
fn test_partial_grouping_backtracks() {
    assert_eq!(codes("$1,23"), vec![pair("$1", "USD")]);
}

#[test]
fn test_ungrouped_long_number() {
    let matches = tokenize("$1234567890123456");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].numeric_literal, "1234567890123456");
}

#[test]
fn test_ungrouped_integer_part() {
    assert_eq!(codes("$1234"), vec![pair("$1234", "USD")]);
    assert_eq!(codes("pay 12345 USD"), vec![pair("12345 USD", "USD")]);
}

#[test]
fn test_number_first_not_mid_run() {
    // the symbol form already consumed the number; no second match
    assert_eq!(codes("$100 USD"), vec![pair("$100", "USD")]);
}

#[test]
fn test_multiple_in_order() {
    let text = "€5 or £4 or 300 JPY";
    let matches = tokenize(text);
    let got: Vec<&str> = matches.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(got, vec!["€5", "£4", "300 JPY"]);
    for w in matches.windows(2) {
        assert!(w[0].end <= w[1].start);
    }
}

#[test]
fn test_unresolved_symbol_dropped() {
    let reg = Registry::from_toml(
        r#"
[[currency]]
code = "SEK"
name = "Swedish Krona"
symbol = "kr"

[[currency]]
code = "NOK"
name = "Norwegian Krone"
symbol = "kr"
"#,
    )
    .unwrap();
    let tok = Tokenizer::new(&reg);
    let all = tok.scan_candidates("kr 50 and 20 NOK");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].currency_code, None);
    let resolved = tok.tokenize("kr 50 and 20 NOK");
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].currency_code.as_deref(), Some("NOK"));
}

#[test]
fn test_multibyte_offsets() {
    let text = "価格は¥1,200です";
    let matches = tokenize(text);
    assert_eq!(matches.len(), 1);
    assert_eq!(&text[matches[0].start..matches[0].end], "¥1,200");
}

mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn matches_are_ordered_and_disjoint(text in "[ $€£a-zA-Z0-9,.\\-]{0,60}") {
            let matches = Tokenizer::global().scan_candidates(&text);
            for m in &matches {
                prop_assert!(m.start < m.end);
                prop_assert_eq!(&text[m.start..m.end], m.text.as_str());
            }
            for w in matches.windows(2) {
                prop_assert!(w[0].end <= w[1].start);
            }
        }
    }
}
