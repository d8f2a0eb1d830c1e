use std::collections::HashMap;

/// Mount options decoded from a `key[=value],...` string. Flags map to `"true"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions(HashMap<String, String>);

impl ParsedOptions {
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_read_write(&self) -> bool {
        self.contains("rw")
    }
}

pub fn parse_options(raw: &str) -> ParsedOptions {
    let mut parsed = HashMap::new();
    for token in raw.split(',') {
        if token.is_empty() {
            continue;
        }
        let mut parts = token.split('=');
        let key = parts.next().unwrap_or_default();
        let value = match parts.next() {
            Some(value) => value,
            None => "true",
        };
        parsed.insert(key.to_string(), value.to_string());
    }
    ParsedOptions(parsed)
}
