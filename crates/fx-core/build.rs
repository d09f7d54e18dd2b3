const SETTINGS: &str = "src/default_settings.toml";
const REGISTRY: &str = "src/registry/default_currencies.toml";

fn main() {
    println!("cargo:rerun-if-changed={SETTINGS}");
    println!("cargo:rerun-if-changed={REGISTRY}");

    parse(SETTINGS, include_str!("src/default_settings.toml"));
    let registry = parse(REGISTRY, include_str!("src/registry/default_currencies.toml"));
    check_registry(&registry);
}

fn parse(path: &str, content: &str) -> toml::Table {
    content
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("{path} contains invalid TOML: {e}"))
}

/// `Registry::global()` trusts the embedded table, so the shape checks that
/// matter at runtime are repeated here.
fn check_registry(table: &toml::Table) {
    let currencies = table
        .get("currency")
        .and_then(toml::Value::as_array)
        .filter(|list| !list.is_empty())
        .unwrap_or_else(|| panic!("{REGISTRY} has no [[currency]] entries"));

    let mut codes = Vec::new();
    for entry in currencies {
        let field = |name: &str| entry.get(name).and_then(toml::Value::as_str).unwrap_or("");
        let code = field("code");
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            panic!("{REGISTRY}: bad currency code {code:?}");
        }
        if field("symbol").trim().is_empty() {
            panic!("{REGISTRY}: {code} has no symbol");
        }
        if codes.contains(&code) {
            panic!("{REGISTRY}: duplicate code {code}");
        }
        codes.push(code);
    }

    let Some(symbols) = table.get("symbols").and_then(toml::Value::as_table) else {
        return;
    };
    for (symbol, code) in symbols {
        let code = code.as_str().unwrap_or("");
        if symbol.trim().is_empty() || !codes.contains(&code) {
            panic!("{REGISTRY}: priority {symbol:?} = {code:?} is invalid");
        }
    }
}
