//! JSON repair: strict parse first, tolerant literal fallback second.
//!
//! The fallback accepts the loose object/array syntax people type by hand:
//! unquoted keys, single-quoted strings, trailing commas, `//` and `/* */`
//! comments. It parses literal data only; nothing is ever evaluated.

use serde_json::{Map, Number, Value};

use crate::error::RepairError;

/// Re-serialize `text` as pretty-printed JSON.
///
/// Strict JSON wins; otherwise the tolerant literal parser gets a shot.
/// Neither succeeding yields [`RepairError::Syntax`].
pub fn repair(text: &str) -> Result<String, RepairError> {
    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(_) => LiteralParser::new(text).parse()?,
    };
    Ok(pretty(&value))
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).expect("Value serialization is infallible")
}

/// Recursive-descent parser over a loose literal.
struct LiteralParser {
    chars: Vec<char>,
    pos: usize,
}

impl LiteralParser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<Value, RepairError> {
        self.skip_trivia();
        let value = self.parse_value()?;
        self.skip_trivia();
        if self.pos != self.chars.len() {
            return Err(RepairError::Syntax);
        }
        Ok(value)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    /// Whitespace and comments carry no meaning anywhere in the input.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.pos += 1;
                }
                Some('/') if self.chars.get(self.pos + 1) == Some(&'/') => {
                    while let Some(ch) = self.bump() {
                        if ch == '\n' {
                            break;
                        }
                    }
                }
                Some('/') if self.chars.get(self.pos + 1) == Some(&'*') => {
                    self.pos += 2;
                    while self.pos < self.chars.len() {
                        if self.peek() == Some('*') && self.chars.get(self.pos + 1) == Some(&'/') {
                            self.pos += 2;
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, RepairError> {
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('"') | Some('\'') => Ok(Value::String(self.parse_string()?)),
            Some(ch) if ch.is_ascii_digit() || ch == '-' || ch == '+' || ch == '.' => {
                self.parse_number()
            }
            Some(ch) if ch.is_alphabetic() => self.parse_keyword(),
            _ => Err(RepairError::Syntax),
        }
    }

    fn parse_object(&mut self) -> Result<Value, RepairError> {
        self.bump(); // '{'
        let mut map = Map::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(Value::Object(map));
                }
                Some(_) => {
                    let key = self.parse_key()?;
                    self.skip_trivia();
                    if self.bump() != Some(':') {
                        return Err(RepairError::Syntax);
                    }
                    self.skip_trivia();
                    let value = self.parse_value()?;
                    map.insert(key, value);
                    self.skip_trivia();
                    match self.peek() {
                        Some(',') => {
                            self.bump();
                        }
                        Some('}') => {}
                        _ => return Err(RepairError::Syntax),
                    }
                }
                None => return Err(RepairError::Syntax),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, RepairError> {
        self.bump(); // '['
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                Some(']') => {
                    self.bump();
                    return Ok(Value::Array(items));
                }
                Some(_) => {
                    items.push(self.parse_value()?);
                    self.skip_trivia();
                    match self.peek() {
                        Some(',') => {
                            self.bump();
                        }
                        Some(']') => {}
                        _ => return Err(RepairError::Syntax),
                    }
                }
                None => return Err(RepairError::Syntax),
            }
        }
    }

    /// Object keys may be quoted strings, bare identifiers, or bare numbers.
    fn parse_key(&mut self) -> Result<String, RepairError> {
        match self.peek() {
            Some('"') | Some('\'') => self.parse_string(),
            Some(ch) if ch.is_alphanumeric() || ch == '_' || ch == '$' => {
                let mut key = String::new();
                while let Some(ch) = self.peek() {
                    if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                        key.push(ch);
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                Ok(key)
            }
            _ => Err(RepairError::Syntax),
        }
    }

    fn parse_string(&mut self) -> Result<String, RepairError> {
        let quote = self.bump().ok_or(RepairError::Syntax)?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(ch) if ch == quote => return Ok(out),
                Some('\\') => {
                    let escaped = self.bump().ok_or(RepairError::Syntax)?;
                    match escaped {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'b' => out.push('\u{0008}'),
                        'f' => out.push('\u{000C}'),
                        'u' => {
                            let mut code = 0u32;
                            for _ in 0..4 {
                                let digit = self
                                    .bump()
                                    .and_then(|c| c.to_digit(16))
                                    .ok_or(RepairError::Syntax)?;
                                code = code * 16 + digit;
                            }
                            out.push(char::from_u32(code).ok_or(RepairError::Syntax)?);
                        }
                        other => out.push(other),
                    }
                }
                Some(ch) => out.push(ch),
                None => return Err(RepairError::Syntax),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Value, RepairError> {
        let mut raw = String::new();
        if self.peek() == Some('+') {
            self.bump();
        }
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | 'e' | 'E') {
                raw.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }
        if let Ok(int) = raw.parse::<i64>() {
            return Ok(Value::Number(int.into()));
        }
        let float = raw.parse::<f64>().map_err(|_| RepairError::Syntax)?;
        Number::from_f64(float)
            .map(Value::Number)
            .ok_or(RepairError::Syntax)
    }

    fn parse_keyword(&mut self) -> Result<Value, RepairError> {
        let mut word = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() {
                word.push(ch);
                self.pos += 1;
            } else {
                break;
            }
        }
        match word.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::Null),
            _ => Err(RepairError::Syntax),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_json_is_reserialized_pretty() {
        let out = repair(r#"{"a":1,"b":[true,null]}"#).unwrap();
        assert_eq!(out, serde_json::to_string_pretty(&json!({"a": 1, "b": [true, null]})).unwrap());
    }

    #[test]
    fn test_unquoted_keys_and_single_quotes() {
        let out = repair("{ name: 'generate_questions', count: 3 }").unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, json!({"name": "generate_questions", "count": 3}));
    }

    #[test]
    fn test_trailing_commas_and_comments() {
        let text = r#"[
            { role: "system", content: "hi", }, // first
            /* second */ { role: 'user', content: 'there' },
        ]"#;
        let value: Value = serde_json::from_str(&repair(text).unwrap()).unwrap();
        assert_eq!(value[1]["content"], "there");
    }

    #[test]
    fn test_nested_loose_literals() {
        let text = "{ params: { type: 'object', required: [ 'questions', ] } }";
        let value: Value = serde_json::from_str(&repair(text).unwrap()).unwrap();
        assert_eq!(value["params"]["required"][0], "questions");
    }

    #[test]
    fn test_numbers_and_keywords() {
        let value: Value = serde_json::from_str(&repair("{ a: +5, b: -2.5e3, c: true, d: null }").unwrap()).unwrap();
        assert_eq!(value, json!({"a": 5, "b": -2500.0, "c": true, "d": null}));
    }

    #[test]
    fn test_escapes_in_single_quoted_strings() {
        let value: Value = serde_json::from_str(&repair(r#"{ a: 'it\'s\n' }"#).unwrap()).unwrap();
        assert_eq!(value["a"], "it's\n");
    }

    #[test]
    fn test_garbage_fails_with_fixed_message() {
        let err = repair("{bad json").unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON/object syntax.");
        assert!(repair("hello world").is_err());
        assert!(repair("{ a: 1 } trailing").is_err());
    }

    #[test]
    fn test_top_level_scalars() {
        assert_eq!(repair("'solo'").unwrap(), "\"solo\"");
        assert_eq!(repair("42").unwrap(), "42");
    }
}
