//! Parser for textual type expressions.
//!
//! ```text
//! type  := ident ( '<' ( '>' | type ( ',' type )* '>' ) )?
//! ident := [A-Za-z0-9_.]+
//! ```
//!
//! `Name<>` is an open generic template. Names are resolved later against a
//! [`TypeSystem`](crate::TypeSystem). Argument lists nest at most
//! [`MAX_NESTING`] levels deep.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::ReflectError;

/// Deepest accepted nesting of argument lists.
pub(crate) const MAX_NESTING: usize = 64;

/// An unresolved type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TypeName {
    pub(crate) name: String,
    /// `None` without brackets, `Some(empty)` for `Name<>`.
    pub(crate) args: Option<Vec<TypeName>>,
}

impl TypeName {
    pub(crate) fn is_open(&self) -> bool {
        self.args.as_ref().is_some_and(Vec::is_empty)
    }

    pub(crate) fn args(&self) -> &[Self] {
        self.args.as_deref().unwrap_or_default()
    }
}

/// Parse a complete type expression.
pub(crate) fn parse_type_name(input: &str) -> Result<TypeName, ReflectError> {
    let mut parser = Parser {
        input,
        chars: input.char_indices().peekable(),
    };
    let parsed = parser.type_name(0)?;
    parser.skip_whitespace();
    if parser.chars.peek().is_some() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(parsed)
}

struct Parser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl Parser<'_> {
    fn type_name(&mut self, depth: usize) -> Result<TypeName, ReflectError> {
        let name = self.ident()?;
        if !self.eat('<') {
            return Ok(TypeName { name, args: None });
        }
        if self.eat('>') {
            return Ok(TypeName {
                name,
                args: Some(Vec::new()),
            });
        }

        if depth >= MAX_NESTING {
            return Err(self.error("type arguments nested too deeply"));
        }

        let inner = depth.saturating_add(1);
        let mut args = vec![self.type_name(inner)?];
        while self.eat(',') {
            args.push(self.type_name(inner)?);
        }
        if !self.eat('>') {
            return Err(self.error("expected ',' or '>'"));
        }
        Ok(TypeName {
            name,
            args: Some(args),
        })
    }

    fn ident(&mut self) -> Result<String, ReflectError> {
        self.skip_whitespace();
        let mut name = String::new();
        while let Some((_, c)) = self
            .chars
            .next_if(|&(_, c)| c.is_alphanumeric() || c == '_' || c == '.')
        {
            name.push(c);
        }
        if name.is_empty() {
            return Err(self.error("expected a type name"));
        }
        Ok(name)
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        self.chars.next_if(|&(_, c)| c == expected).is_some()
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
    }

    fn error(&mut self, message: &'static str) -> ReflectError {
        let position = self.chars.peek().map_or(self.input.len(), |&(i, _)| i);
        ReflectError::Parse {
            input: self.input.to_owned(),
            position,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(name: &str) -> TypeName {
        TypeName {
            name: name.to_owned(),
            args: None,
        }
    }

    #[test]
    fn parses_plain_name() {
        assert_eq!(parse_type_name("  PlainClass "), Ok(plain("PlainClass")));
    }

    #[test]
    fn parses_nested_arguments() {
        let parsed = parse_type_name("Map<string, List<int>>");
        assert_eq!(
            parsed,
            Ok(TypeName {
                name: "Map".to_owned(),
                args: Some(vec![
                    plain("string"),
                    TypeName {
                        name: "List".to_owned(),
                        args: Some(vec![plain("int")]),
                    },
                ]),
            })
        );
    }

    #[test]
    fn empty_brackets_mean_open() {
        let parsed = parse_type_name("IEnumerable<>");
        assert!(parsed.as_ref().is_ok_and(TypeName::is_open));
        assert!(parse_type_name("IEnumerable").is_ok_and(|t| !t.is_open()));
    }

    #[test]
    fn reports_position_of_error() {
        assert_eq!(
            parse_type_name("List<int"),
            Err(ReflectError::Parse {
                input: "List<int".to_owned(),
                position: 8,
                message: "expected ',' or '>'",
            })
        );
        assert!(matches!(
            parse_type_name("List<int>>"),
            Err(ReflectError::Parse { position: 9, .. })
        ));
        assert!(matches!(
            parse_type_name(""),
            Err(ReflectError::Parse { position: 0, .. })
        ));
    }

    fn nested(levels: usize) -> String {
        format!("{}int{}", "List<".repeat(levels), ">".repeat(levels))
    }

    #[test]
    fn nesting_is_capped() {
        assert!(parse_type_name(&nested(MAX_NESTING)).is_ok());
        assert!(matches!(
            parse_type_name(&nested(MAX_NESTING + 1)),
            Err(ReflectError::Parse {
                message: "type arguments nested too deeply",
                ..
            })
        ));
        // Far past the cap still fails cleanly.
        assert!(parse_type_name(&nested(100_000)).is_err());
    }
}
