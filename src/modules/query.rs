//! Query string and form body parsing
//!
//! Both parsers split on `&`, then on the first `=`, and decode `+` and
//! percent escapes on each side. They differ in how repeated and blank
//! values are handled.

use std::borrow::Cow;

/// Decode one `application/x-www-form-urlencoded` component
pub fn decode_component(raw: &str) -> String {
    let plus_decoded: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    let bytes = urlencoding::decode_binary(plus_decoded.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Yields raw `(name, value)` pairs. Empty segments and segments without
/// `=` are skipped.
fn raw_pairs(input: &str) -> impl Iterator<Item = (&str, &str)> {
    input
        .split('&')
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| segment.split_once('='))
}

/// Parameters parsed from a query string, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedParams {
    entries: Vec<(String, Vec<String>)>,
}

impl ParsedParams {
    /// Parse a query string. Pairs with an empty value are dropped, so every
    /// name maps to at least one value.
    pub fn parse(query: &str) -> Self {
        let mut params = Self::default();
        for (name, value) in raw_pairs(query) {
            if value.is_empty() {
                continue;
            }
            params.push(decode_component(name), decode_component(value));
        }
        params
    }

    fn push(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// All values for `name`
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, values)| values.as_slice())
    }

    /// First value for `name`
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|values| values.first()).map(String::as_str)
    }

    /// Iterate over `(name, first value)` in order
    pub fn iter_first(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(name, values)| values.first().map(|v| (name.as_str(), v.as_str())))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fields of a submitted urlencoded form. Blank values are kept and a
/// repeated name overwrites the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    fields: Vec<(String, String)>,
}

impl FormFields {
    pub fn parse(body: &str) -> Self {
        let mut form = Self::default();
        for (name, value) in raw_pairs(body) {
            let name = decode_component(name);
            let value = decode_component(value);
            match form.fields.iter_mut().find(|(existing, _)| *existing == name) {
                Some((_, slot)) => *slot = value,
                None => form.fields.push((name, value)),
            }
        }
        form
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let params = ParsedParams::parse("name=Bob&age=25");
        let pairs: Vec<_> = params.iter_first().collect();
        assert_eq!(pairs, vec![("name", "Bob"), ("age", "25")]);
        assert_eq!(params.get("name"), Some(&["Bob".to_string()][..]));
    }

    #[test]
    fn test_pair_without_equals_is_dropped() {
        let params = ParsedParams::parse("flag&k=v");
        assert_eq!(params.len(), 1);
        assert_eq!(params.first("k"), Some("v"));
        assert_eq!(params.get("flag"), None);
    }

    #[test]
    fn test_blank_values_and_empty_segments_are_dropped() {
        let params = ParsedParams::parse("&a=&b=1&&");
        assert_eq!(params.len(), 1);
        assert_eq!(params.first("b"), Some("1"));
    }

    #[test]
    fn test_repeated_names_keep_all_values() {
        let params = ParsedParams::parse("tag=x&other=1&tag=y");
        assert_eq!(params.get("tag"), Some(&["x".to_string(), "y".to_string()][..]));
        assert_eq!(params.first("tag"), Some("x"));
        let names: Vec<_> = params.iter_first().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["tag", "other"]);
    }

    #[test]
    fn test_decoding() {
        let params = ParsedParams::parse("message=Hello%20World&greeting=hi+there&caf%C3%A9=1");
        assert_eq!(params.first("message"), Some("Hello World"));
        assert_eq!(params.first("greeting"), Some("hi there"));
        assert_eq!(params.first("café"), Some("1"));
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let params = ParsedParams::parse("expr=a=b");
        assert_eq!(params.first("expr"), Some("a=b"));
    }

    #[test]
    fn test_invalid_escape_passes_through() {
        assert_eq!(decode_component("100%"), "100%");
        assert_eq!(decode_component("%zz"), "%zz");
    }

    #[test]
    fn test_form_fields_last_value_wins() {
        let form = FormFields::parse("username=alice&email=&username=bob");
        assert_eq!(form.get("username"), Some("bob"));
        assert_eq!(form.get("email"), Some(""));
        assert_eq!(form.get_or("category", "general"), "general");
        assert_eq!(form.len(), 2);
    }
}
