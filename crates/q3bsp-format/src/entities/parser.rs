//! Tokenizer and parser for entity text
//!
//! The text is a sequence of `{ ... }` blocks, each holding quoted
//! `"key" "value"` pairs. `//` starts a comment that runs to the end of the
//! line. Strings have no escape sequences and may span lines.

use crate::entities::error::EntityParseError;

/// One entity: an ordered list of key/value pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entity {
    properties: Vec<(String, String)>,
}

impl Entity {
    /// Value of the first property named `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `classname` property
    pub fn class_name(&self) -> Option<&str> {
        self.get("classname")
    }

    /// All properties in file order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the entity has no properties
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Str(&'a str),
}

impl Token<'_> {
    fn describe(&self) -> String {
        match self {
            Self::Open => "{".to_string(),
            Self::Close => "}".to_string(),
            Self::Str(s) => (*s).to_string(),
        }
    }
}

struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Tokenizer<'a> {
    const fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            line: 1,
        }
    }

    fn skip_blank(&mut self) {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b'/' if bytes.get(self.pos + 1) == Some(&b'/') => {
                    while self.pos < bytes.len() && bytes[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                b if b.is_ascii_whitespace() || b == 0 => self.pos += 1,
                _ => break,
            }
        }
    }

    /// Next token and the line it starts on
    fn next_token(&mut self) -> Result<Option<(Token<'a>, usize)>, EntityParseError> {
        self.skip_blank();
        let bytes = self.text.as_bytes();
        let Some(&first) = bytes.get(self.pos) else {
            return Ok(None);
        };
        let line = self.line;

        let token = match first {
            b'{' => {
                self.pos += 1;
                Token::Open
            }
            b'}' => {
                self.pos += 1;
                Token::Close
            }
            b'"' => {
                let start = self.pos + 1;
                let len = self.text[start..]
                    .find('"')
                    .ok_or(EntityParseError::UnterminatedString { line })?;
                let value = &self.text[start..start + len];
                self.line += value.matches('\n').count();
                self.pos = start + len + 1;
                Token::Str(value)
            }
            _ => {
                // Bare word, read up to the next blank or brace
                let start = self.pos;
                while self.pos < bytes.len()
                    && !bytes[self.pos].is_ascii_whitespace()
                    && !matches!(bytes[self.pos], b'{' | b'}' | b'"' | 0)
                {
                    self.pos += 1;
                }
                Token::Str(&self.text[start..self.pos])
            }
        };

        Ok(Some((token, line)))
    }
}

/// Parse entity text into entities, in file order
pub fn parse_entities(text: &str) -> Result<Vec<Entity>, EntityParseError> {
    let mut tokens = Tokenizer::new(text);
    let mut entities = Vec::new();

    while let Some((token, line)) = tokens.next_token()? {
        if token != Token::Open {
            return Err(EntityParseError::UnexpectedToken {
                line,
                expected: "'{'",
                found: token.describe(),
            });
        }

        let start_line = line;
        let mut entity = Entity::default();
        loop {
            let key = match tokens.next_token()? {
                None => return Err(EntityParseError::UnterminatedEntity { line: start_line }),
                Some((Token::Close, _)) => break,
                Some((Token::Str(key), _)) => key,
                Some((other, line)) => {
                    return Err(EntityParseError::UnexpectedToken {
                        line,
                        expected: "key",
                        found: other.describe(),
                    });
                }
            };

            let value = match tokens.next_token()? {
                None => return Err(EntityParseError::UnterminatedEntity { line: start_line }),
                Some((Token::Str(value), _)) => value,
                Some((other, line)) => {
                    return Err(EntityParseError::UnexpectedToken {
                        line,
                        expected: "value",
                        found: other.describe(),
                    });
                }
            };

            entity
                .properties
                .push((key.to_string(), value.to_string()));
        }

        entities.push(entity);
    }

    Ok(entities)
}
