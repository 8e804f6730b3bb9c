//! Line-oriented output accumulator for the emitters.
//!
//! Each [`Printer::line`] call appends its tokens followed by exactly one
//! line terminator, so emitted output is byte-stable line by line. Tokens
//! are scalars only; anything else reaching the printer means an emitter
//! passed through a value the resolver should have rejected, which is an
//! internal defect and terminates the process.

use std::fmt::Write;

/// A printable scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Str(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    /// Placeholder produced by a conversion from an absent optional or a
    /// non-scalar value; rejected at print time.
    Unsupported(&'static str),
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::Str(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token::Str(value)
    }
}

impl From<&String> for Token {
    fn from(value: &String) -> Self {
        Token::Str(value.clone())
    }
}

impl From<bool> for Token {
    fn from(value: bool) -> Self {
        Token::Bool(value)
    }
}

impl From<i64> for Token {
    fn from(value: i64) -> Self {
        Token::Int(value)
    }
}

impl From<u64> for Token {
    fn from(value: u64) -> Self {
        Token::Uint(value)
    }
}

impl From<f64> for Token {
    fn from(value: f64) -> Self {
        Token::Float(value)
    }
}

impl From<Option<u64>> for Token {
    fn from(value: Option<u64>) -> Self {
        match value {
            Some(v) => Token::Uint(v),
            None => Token::Unsupported("absent optional integer"),
        }
    }
}

impl From<Option<f64>> for Token {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Token::Float(v),
            None => Token::Unsupported("absent optional float"),
        }
    }
}

impl From<&serde_json::Value> for Token {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Token::Str(s.clone()),
            serde_json::Value::Bool(b) => Token::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Token::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Token::Uint(u)
                } else {
                    Token::Float(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::Null => Token::Unsupported("json null"),
            serde_json::Value::Array(_) => Token::Unsupported("json array"),
            serde_json::Value::Object(_) => Token::Unsupported("json object"),
        }
    }
}

/// Accumulates emitted tokens into output text, one line per call.
#[derive(Debug, Default)]
pub struct Printer {
    buf: String,
}

impl Printer {
    pub fn new() -> Self {
        Printer { buf: String::new() }
    }

    /// Append one line built from `tokens`.
    ///
    /// Panics on an unsupported token kind: that is an internal invariant
    /// violation, not a data problem.
    pub fn line(&mut self, tokens: &[Token]) {
        for token in tokens {
            match token {
                Token::Str(s) => self.buf.push_str(s),
                Token::Bool(b) => {
                    let _ = write!(self.buf, "{b}");
                }
                Token::Int(i) => {
                    let _ = write!(self.buf, "{i}");
                }
                Token::Uint(u) => {
                    let _ = write!(self.buf, "{u}");
                }
                // Floats print as Rust float literals so they land in f64
                // argument positions without a cast.
                Token::Float(f) => {
                    let text = f.to_string();
                    self.buf.push_str(&text);
                    if !text.contains('.') && !text.contains('e') {
                        self.buf.push_str(".0");
                    }
                }
                Token::Unsupported(kind) => {
                    panic!("unknown token in printer: {kind}");
                }
            }
        }
        self.buf.push('\n');
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Builds one printer line from heterogeneous values.
macro_rules! ln {
    ($p:expr $(, $tok:expr)* $(,)?) => {
        $p.line(&[$($crate::printer::Token::from($tok)),*])
    };
}

pub(crate) use ln;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_per_call() {
        let mut p = Printer::new();
        p.line(&[Token::from("pub struct "), Token::from("Pet"), Token::from(" {")]);
        p.line(&[Token::from("}")]);
        assert_eq!(p.finish(), "pub struct Pet {\n}\n");
    }

    #[test]
    fn test_scalar_tokens() {
        let mut p = Printer::new();
        p.line(&[
            Token::from("x = "),
            Token::from(42i64),
            Token::from(", "),
            Token::from(true),
        ]);
        assert_eq!(p.finish(), "x = 42, true\n");
    }

    #[test]
    fn test_floats_print_as_float_literals() {
        let mut p = Printer::new();
        p.line(&[Token::from(2.0f64)]);
        p.line(&[Token::from(2.5f64)]);
        assert_eq!(p.finish(), "2.0\n2.5\n");
    }

    #[test]
    fn test_json_scalars_convert() {
        let value = serde_json::json!("text");
        assert_eq!(Token::from(&value), Token::Str("text".to_string()));
        let value = serde_json::json!(3);
        assert_eq!(Token::from(&value), Token::Int(3));
    }

    #[test]
    #[should_panic(expected = "unknown token in printer")]
    fn test_unsupported_token_is_fatal() {
        let value = serde_json::json!(["not", "scalar"]);
        let mut p = Printer::new();
        p.line(&[Token::from(&value)]);
    }

    #[test]
    #[should_panic(expected = "unknown token in printer")]
    fn test_absent_optional_is_fatal() {
        let mut p = Printer::new();
        p.line(&[Token::from(None::<u64>)]);
    }
}
