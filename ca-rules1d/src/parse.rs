use crate::{Rule, RuleStringError, State, MAX_STATES};
use std::str;

/// A helper struct for parsing rule strings.
struct Parser<'a> {
    input: &'a [u8],
}

impl<'a> Parser<'a> {
    /// Create a new parser from a string.
    const fn new(str: &'a str) -> Self {
        Self {
            input: str.as_bytes(),
        }
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<u8> {
        self.input.first().copied()
    }

    /// Read the next character and consume it.
    fn read(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.input = &self.input[1..];
        Some(c)
    }

    /// Try to read the next character and consume it if it is one of the
    /// given characters.
    fn read_matches(&mut self, chars: &[u8]) -> Option<u8> {
        let c = self.peek()?;
        if chars.contains(&c) {
            self.input = &self.input[1..];
            Some(c)
        } else {
            None
        }
    }

    /// Parse a non-empty number as a `u128`.
    fn parse_number(&mut self) -> Option<u128> {
        let len = self
            .input
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        let (digits, rest) = self.input.split_at(len);
        self.input = rest;
        str::from_utf8(digits).ok()?.parse().ok()
    }

    /// Check that there is no more input.
    fn end(&self) -> Option<()> {
        self.peek().is_none().then_some(())
    }

    /// Parse a binary rule, `W<number>` or `L<number>`.
    fn parse_binary(&mut self) -> Option<Rule> {
        let rule = match self.read()? {
            b'W' | b'w' => Rule::Nks(self.parse_number()?),
            b'L' | b'l' => Rule::Lexicographic(self.parse_number()?),
            _ => return None,
        };
        self.end()?;
        Some(rule)
    }

    /// Parse a totalistic rule, `K<states>,T<number>`.
    ///
    /// Returns `None` if this rule string is not a totalistic rule string.
    /// Returns `Some(Err(_))` if it is, but the number of states is invalid.
    fn parse_totalistic(&mut self) -> Option<Result<Rule, RuleStringError>> {
        self.read_matches(b"Kk")?;
        let states = self.parse_number()?;
        self.read_matches(b",")?;
        self.read_matches(b"Tt")?;
        let number = self.parse_number()?;
        self.end()?;

        if !(2..=MAX_STATES as u128).contains(&states) {
            return Some(Err(RuleStringError::InvalidNumberOfStates));
        }

        Some(Ok(Rule::Totalistic {
            states: states as State,
            number,
        }))
    }
}

/// Parse a rule string.
///
/// The following notations are supported, with case-insensitive letters:
///
/// - `W<number>`: a binary rule in the numbering of *A New Kind of Science*,
///   e.g. `W30` or `W110`. See [`nks_rule`](crate::nks_rule).
/// - `L<number>`: a binary rule with neighborhoods in lexicographic order,
///   e.g. `L120`. See [`lexicographic_rule`](crate::lexicographic_rule).
/// - `K<states>,T<number>`: a totalistic rule with the given number of
///   states, e.g. `K3,T777`. See [`totalistic_rule`](crate::totalistic_rule).
///
/// Whether the rule number fits the neighborhood is only known once the radius
/// is known. See [`Rule::check`].
///
/// ```rust
/// # use ca_rules1d::{parse_rule, Rule};
/// assert!(matches!(parse_rule("W110"), Ok(Rule::Nks(110))));
/// assert!(matches!(
///     parse_rule("K3,T777"),
///     Ok(Rule::Totalistic { states: 3, number: 777 })
/// ));
/// ```
pub fn parse_rule(rule_string: &str) -> Result<Rule, RuleStringError> {
    if let Some(rule) = Parser::new(rule_string).parse_binary() {
        return Ok(rule);
    }

    Parser::new(rule_string)
        .parse_totalistic()
        .unwrap_or(Err(RuleStringError::InvalidSyntax))
}
