const MAX_NESTING: usize = 64;

/// Evaluate a restricted arithmetic expression such as `3600`, `2 * 86400`
/// or `(1 + 0.5) * 60`.
///
/// Only numeric literals, binary `+ - * /`, unary `+ -` and parentheses are
/// accepted. Anything else (identifiers, calls, trailing tokens), division by
/// zero and non-finite results yield `None`.
pub fn parse_numeric_expression(raw: &str) -> Option<f64> {
    let mut parser = ExpressionParser {
        bytes: raw.as_bytes(),
        cursor: 0,
        depth: 0,
    };
    let value = parser.expression()?;

    if parser.peek().is_some() || !value.is_finite() {
        return None;
    }

    Some(value)
}

struct ExpressionParser<'a> {
    bytes: &'a [u8],
    cursor: usize,
    depth: usize,
}

impl ExpressionParser<'_> {
    /// Next significant byte, skipping whitespace between tokens.
    fn peek(&mut self) -> Option<u8> {
        while self.current().is_some_and(|byte| byte.is_ascii_whitespace()) {
            self.cursor += 1;
        }
        self.current()
    }

    fn current(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    fn expression(&mut self) -> Option<f64> {
        let mut value = self.term()?;

        while let Some(op) = self.peek() {
            match op {
                b'+' => {
                    self.cursor += 1;
                    value += self.term()?;
                }
                b'-' => {
                    self.cursor += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }

        Some(value)
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.factor()?;

        while let Some(op) = self.peek() {
            match op {
                b'*' => {
                    self.cursor += 1;
                    value *= self.factor()?;
                }
                b'/' => {
                    self.cursor += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return None;
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }

        Some(value)
    }

    fn factor(&mut self) -> Option<f64> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return None;
        }

        let value = match self.peek()? {
            b'+' => {
                self.cursor += 1;
                self.factor()
            }
            b'-' => {
                self.cursor += 1;
                self.factor().map(|value| -value)
            }
            b'(' => {
                self.cursor += 1;
                let inner = self.expression()?;
                if self.peek() != Some(b')') {
                    return None;
                }
                self.cursor += 1;
                Some(inner)
            }
            _ => self.number(),
        };

        self.depth -= 1;
        value
    }

    fn number(&mut self) -> Option<f64> {
        let start = self.cursor;
        let mut saw_digit = false;

        while self.current().is_some_and(|byte| byte.is_ascii_digit()) {
            self.cursor += 1;
            saw_digit = true;
        }

        if self.current() == Some(b'.') {
            self.cursor += 1;
            while self.current().is_some_and(|byte| byte.is_ascii_digit()) {
                self.cursor += 1;
                saw_digit = true;
            }
        }

        if !saw_digit {
            return None;
        }

        if matches!(self.current(), Some(b'e' | b'E')) {
            self.cursor += 1;
            if matches!(self.current(), Some(b'+' | b'-')) {
                self.cursor += 1;
            }

            let exponent_start = self.cursor;
            while self.current().is_some_and(|byte| byte.is_ascii_digit()) {
                self.cursor += 1;
            }
            if exponent_start == self.cursor {
                return None;
            }
        }

        let literal = std::str::from_utf8(&self.bytes[start..self.cursor]).ok()?;
        literal.parse::<f64>().ok()
    }
}
