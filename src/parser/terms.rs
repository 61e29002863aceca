//! Grammar rules for the two sides of a recurrence
//!
//! ```text
//! lhs  := identifier "(" identifier {"," identifier} ")"
//! rhs  := ["-"] term {("+" | "-") ["-"] term}
//! term := number | [number ["*"]] identifier "(" arg {"," arg} ")"
//! arg  := identifier [("+" | "-") number]
//! ```
//!
//! `+` and `-` split summands only at parenthesis depth 0, so shifts inside
//! an argument list never split a term.

use crate::parser::ast::{ConstantTerm, FunctionTerm, Term};
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse the lhs signature, which ends at the `=` token at index `eq`.
    pub(crate) fn parse_lhs(&mut self, eq: usize) -> Result<FunctionTerm, ParseError> {
        let lhs_text = self.slice(0, eq);
        let invalid_lhs = |parser: &Parser| {
            parser.error_at(
                0,
                &format!("Invalid left-hand side '{}'", lhs_text),
                lhs_text.clone(),
            )
        };

        self.position = 0;
        let name_end = self.word_end(0);
        let name = match (name_end, self.peek_at(0)) {
            (1, Token::Ident(name, _)) => name.clone(),
            (0, _) => return Err(invalid_lhs(self)),
            _ => {
                let word = self.slice(0, name_end);
                return Err(self.error_at(0, &format!("Invalid function name '{}'", word), word));
            }
        };
        self.position = name_end;

        if !self.match_token(&Token::LParen(self.current_location())) {
            return Err(invalid_lhs(self));
        }
        if self.check(&Token::RParen(self.current_location())) {
            return Err(self.error_at(
                0,
                &format!("No arguments in '{}'", lhs_text),
                lhs_text.clone(),
            ));
        }

        let mut variables: Vec<String> = Vec::new();
        loop {
            let start = self.position;
            let end = self.argument_end(start);
            let fragment = self.slice(start, end);

            let variable = match (end - start, self.peek_at(start)) {
                (1, Token::Ident(name, _)) => name.clone(),
                _ => {
                    return Err(self.error_at(
                        start,
                        &format!("Invalid variable name '{}'", fragment),
                        fragment,
                    ));
                }
            };
            if variables.contains(&variable) {
                return Err(self.error_at(
                    start,
                    &format!("Duplicate variable name '{}'", variable),
                    variable,
                ));
            }
            variables.push(variable);
            self.position = end;

            if self.match_token(&Token::Comma(self.current_location())) {
                continue;
            }
            if self.match_token(&Token::RParen(self.current_location())) {
                break;
            }
            return Err(invalid_lhs(self));
        }

        if self.position != eq {
            return Err(invalid_lhs(self));
        }

        FunctionTerm::signature(name, variables)
            .map_err(|e| self.error_at(0, &e.to_string(), lhs_text.clone()))
    }

    /// Parse the rhs summands, starting at the current position.
    pub(crate) fn parse_rhs(&mut self, lhs: &FunctionTerm) -> Result<Vec<Term>, ParseError> {
        let mut terms = Vec::new();
        let mut sign = 1.0;

        loop {
            let start = self.position;
            if self.match_token(&Token::Minus(self.current_location())) {
                sign = -sign;
            }

            let end = self.summand_end(self.position);
            let summand = self.slice(start, end);
            if self.position == end {
                let found = self.peek().to_string();
                return Err(self.error_at(
                    start,
                    &format!("Expected a term, found {}", found),
                    summand,
                ));
            }

            terms.push(self.parse_summand(lhs, start, end, &summand, sign)?);

            if self.match_token(&Token::Plus(self.current_location())) {
                sign = 1.0;
            } else if self.match_token(&Token::Minus(self.current_location())) {
                sign = -1.0;
            } else {
                break;
            }
        }

        Ok(terms)
    }

    /// Parse one summand spanning tokens up to `end`; `start` includes any sign.
    fn parse_summand(
        &mut self,
        lhs: &FunctionTerm,
        start: usize,
        end: usize,
        summand: &str,
        sign: f64,
    ) -> Result<Term, ParseError> {
        let invalid_term = |parser: &Parser| {
            parser.error_at(
                start,
                &format!("Invalid term '{}'", summand),
                summand.to_string(),
            )
        };

        let mut coefficient = 1.0;
        if let Token::Number(value, _) = *self.peek() {
            self.advance();
            if self.position == end {
                return Ok(ConstantTerm::new(sign * value).into());
            }
            coefficient = value;
            self.match_token(&Token::Star(self.current_location()));
        }

        let name_index = self.position;
        let name = match self.peek() {
            Token::Ident(name, _) => name.clone(),
            _ => return Err(invalid_term(self)),
        };
        self.advance();
        if !self.match_token(&Token::LParen(self.current_location())) {
            return Err(invalid_term(self));
        }
        if name != lhs.function() {
            return Err(self.error_at(
                name_index,
                &format!(
                    "Term '{}' uses different function name '{}' than '{}'",
                    summand,
                    name,
                    lhs.function()
                ),
                summand.to_string(),
            ));
        }

        let mut args = Vec::new();
        loop {
            let arg_start = self.position;
            let arg_end = self.argument_end(arg_start);
            args.push((arg_start, arg_end));
            self.position = arg_end;

            if self.match_token(&Token::Comma(self.current_location())) {
                continue;
            }
            if self.match_token(&Token::RParen(self.current_location())) {
                break;
            }
            return Err(self.error_at(
                start,
                &format!("Unclosed '(' in term '{}'", summand),
                summand.to_string(),
            ));
        }
        if self.position != end {
            return Err(invalid_term(self));
        }

        if args.len() != lhs.arity() {
            return Err(self.error_at(
                start,
                &format!(
                    "Term '{}' has {} args, expected {}",
                    summand,
                    args.len(),
                    lhs.arity()
                ),
                summand.to_string(),
            ));
        }

        let shifts = args
            .iter()
            .zip(lhs.variables())
            .map(|(&(s, e), var)| self.parse_shift(s, e, var, summand))
            .collect::<Result<Vec<f64>, ParseError>>()?;

        FunctionTerm::new(sign * coefficient, name, lhs.variables().to_vec(), shifts)
            .map(Term::from)
            .map_err(|e| self.error_at(start, &e.to_string(), summand.to_string()))
    }

    /// Parse `var`, `var+number` or `var-number` spanning tokens `start..end`.
    fn parse_shift(
        &self,
        start: usize,
        end: usize,
        var: &str,
        summand: &str,
    ) -> Result<f64, ParseError> {
        let arg = self.slice(start, end);
        let invalid = || {
            self.error_at(
                start,
                &format!("Invalid argument '{}' in term '{}'", arg, summand),
                arg.clone(),
            )
        };

        match self.peek_at(start) {
            Token::Ident(name, _) if name == var => {}
            _ => return Err(invalid()),
        }

        match end - start {
            1 => Ok(0.0),
            3 => match (self.peek_at(start + 1), self.peek_at(start + 2)) {
                (Token::Plus(_), Token::Number(value, _)) => Ok(*value),
                // 0.0 - v keeps `n-0` from producing a negative zero
                (Token::Minus(_), Token::Number(value, _)) => Ok(0.0 - value),
                _ => Err(invalid()),
            },
            _ => Err(invalid()),
        }
    }

    /// Index of the first `+`/`-` at parenthesis depth 0 (or end of input)
    /// at or after `from`.
    fn summand_end(&self, from: usize) -> usize {
        let mut depth = 0usize;
        let mut index = from;
        loop {
            match self.peek_at(index) {
                Token::Eof(_) => return index,
                Token::LParen(_) => depth += 1,
                Token::RParen(_) => depth = depth.saturating_sub(1),
                Token::Plus(_) | Token::Minus(_) if depth == 0 => return index,
                _ => {}
            }
            index += 1;
        }
    }

    /// Index of the `,` or `)` (or `=`/end of input) closing the argument
    /// that starts at `from`.
    fn argument_end(&self, from: usize) -> usize {
        let mut index = from;
        while !matches!(
            self.peek_at(index),
            Token::Comma(_) | Token::RParen(_) | Token::Eq(_) | Token::Eof(_)
        ) {
            index += 1;
        }
        index
    }
}
