//! Bounds-checked, forward-only cursor over the input buffer.
//!
//! The buffer is treated as null-terminated: input ends at the end of the
//! slice or at the first NUL byte, whichever comes first. The cursor owns
//! line counting so every consumed line terminator is counted exactly once.

/// Space or tab.
pub(crate) fn is_space(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

/// Line terminator (form feed is treated as one, but does not count a line).
pub(crate) fn is_line_end(c: u8) -> bool {
    c == b'\n' || c == b'\r' || c == b'\x0c'
}

pub(crate) fn is_space_or_line_end(c: u8) -> bool {
    is_space(c) || is_line_end(c)
}

pub(crate) fn is_brace(c: u8) -> bool {
    c == b'{' || c == b'}'
}

#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        // Everything after the first NUL is ignored
        let end = data.iter().position(|&c| c == 0).unwrap_or(data.len());
        Self {
            data: &data[..end],
            pos: 0,
            line: 1,
        }
    }

    /// 1-based line number of the current position.
    pub fn line(&self) -> usize {
        self.line
    }

    #[cfg(test)]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left before end of input.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.data.get(self.pos + offset).copied()
    }

    /// Consume one byte, counting line terminators.
    pub fn advance(&mut self) {
        let Some(c) = self.peek() else {
            return;
        };
        self.pos += 1;
        match c {
            b'\n' => self.line += 1,
            // A lone CR ends a line, CRLF is counted at the LF
            b'\r' if self.peek() != Some(b'\n') => self.line += 1,
            _ => {}
        }
    }

    pub fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    /// Skip spaces and tabs. Returns false if the line (or input) ended.
    pub fn skip_spaces(&mut self) -> bool {
        while matches!(self.peek(), Some(c) if is_space(c)) {
            self.advance();
        }
        matches!(self.peek(), Some(c) if !is_line_end(c))
    }

    /// Skip spaces, tabs and line terminators. Returns false at end of input.
    pub fn skip_whitespace(&mut self) -> bool {
        while matches!(self.peek(), Some(c) if is_space_or_line_end(c)) {
            self.advance();
        }
        !self.is_eof()
    }

    /// Advance to the next `*` marker or brace. Returns false at end of input.
    pub fn skip_to_next_token(&mut self) -> bool {
        loop {
            match self.peek() {
                None => return false,
                Some(b'*' | b'{' | b'}') => return true,
                Some(_) => self.advance(),
            }
        }
    }

    /// Advance to the next `*` marker on the current line.
    ///
    /// Returns false, without consuming it, when a line terminator, a brace
    /// or the end of input comes first.
    pub fn skip_to_marker_on_line(&mut self) -> bool {
        loop {
            match self.peek() {
                None => return false,
                Some(b'*') => return true,
                Some(c) if is_line_end(c) || is_brace(c) => return false,
                Some(_) => self.advance(),
            }
        }
    }

    /// The keyword name of the marker under the cursor, without the `*`.
    ///
    /// The name runs up to the next space, line terminator or end of input,
    /// so a match against a literal implies the literal is followed by
    /// whitespace.
    pub fn marker_name(&self) -> Option<&'a [u8]> {
        if self.peek() != Some(b'*') {
            return None;
        }
        let start = self.pos + 1;
        let len = self.data[start..]
            .iter()
            .position(|&c| is_space_or_line_end(c))
            .unwrap_or(self.data.len() - start);
        Some(&self.data[start..start + len])
    }

    /// True if `literal` is under the cursor and followed by whitespace or
    /// the end of input.
    pub fn at_word(&self, literal: &[u8]) -> bool {
        let rest = &self.data[self.pos..];
        rest.starts_with(literal)
            && rest
                .get(literal.len())
                .map_or(true, |&c| is_space_or_line_end(c))
    }

    /// Consume bytes up to (not including) `delimiter`.
    ///
    /// Returns `None` if the input ends first; everything is consumed then.
    pub fn take_until(&mut self, delimiter: u8) -> Option<&'a [u8]> {
        let start = self.pos;
        loop {
            match self.peek() {
                None => return None,
                Some(c) if c == delimiter => return Some(&self.data[start..self.pos]),
                Some(_) => self.advance(),
            }
        }
    }

    /// Consume bytes up to the next space, line terminator, brace or end of
    /// input.
    pub fn take_word(&mut self) -> &'a [u8] {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if !is_space_or_line_end(c) && !is_brace(c)) {
            self.advance();
        }
        &self.data[start..self.pos]
    }

    /// Read a decimal integer with an optional sign.
    ///
    /// Stops at the first non-digit. Returns `None` and consumes nothing if
    /// no digit follows. Overflow wraps.
    pub fn read_int(&mut self) -> Option<i64> {
        let negative = match self.peek() {
            Some(b'-') => true,
            Some(b'+') => false,
            Some(c) if c.is_ascii_digit() => false,
            _ => return None,
        };
        let sign_len = usize::from(!matches!(self.peek(), Some(c) if c.is_ascii_digit()));
        if !matches!(self.peek_at(sign_len), Some(c) if c.is_ascii_digit()) {
            return None;
        }
        self.advance_by(sign_len);

        let mut value: i64 = 0;
        while let Some(c) = self.peek().filter(u8::is_ascii_digit) {
            value = value.wrapping_mul(10).wrapping_add(i64::from(c - b'0'));
            self.advance();
        }
        Some(if negative { value.wrapping_neg() } else { value })
    }

    /// Read a floating point number (`[+-]digits[.digits][(e|E)[+-]digits]`).
    ///
    /// Locale independent. Returns `None` and consumes nothing if no digits
    /// are present.
    pub fn read_float(&mut self) -> Option<f32> {
        let rest = &self.data[self.pos..];
        let mut len = 0;
        if matches!(rest.first(), Some(b'+' | b'-')) {
            len += 1;
        }
        let int_digits = count_digits(&rest[len..]);
        len += int_digits;
        let mut frac_digits = 0;
        if rest.get(len) == Some(&b'.') {
            frac_digits = count_digits(&rest[len + 1..]);
            len += 1 + frac_digits;
        }
        if int_digits + frac_digits == 0 {
            return None;
        }
        if matches!(rest.get(len), Some(b'e' | b'E')) {
            let mut exp_len = 1;
            if matches!(rest.get(len + exp_len), Some(b'+' | b'-')) {
                exp_len += 1;
            }
            let exp_digits = count_digits(&rest[(len + exp_len).min(rest.len())..]);
            if exp_digits > 0 {
                len += exp_len + exp_digits;
            }
        }

        // The scanned bytes are ASCII digits, signs, '.' and 'e'
        let text = std::str::from_utf8(&rest[..len]).ok()?;
        let value = text.parse::<f32>().ok()?;
        self.advance_by(len);
        Some(value)
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nul_terminates_input() {
        let cursor = Cursor::new(b"abc\0def");
        assert_eq!(cursor.remaining(), 3);
    }

    #[test]
    fn test_line_counting() {
        let mut cursor = Cursor::new(b"a\nb\r\nc\rd");
        assert_eq!(cursor.line(), 1);
        cursor.advance_by(2); // "a\n"
        assert_eq!(cursor.line(), 2);
        cursor.advance_by(3); // "b\r\n"
        assert_eq!(cursor.line(), 3);
        cursor.advance_by(2); // "c\r"
        assert_eq!(cursor.line(), 4);
        assert_eq!(cursor.peek(), Some(b'd'));
    }

    #[test]
    fn test_advance_past_end_is_noop() {
        let mut cursor = Cursor::new(b"x");
        cursor.advance_by(5);
        assert!(cursor.is_eof());
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_skip_spaces_stops_at_line_end() {
        let mut cursor = Cursor::new(b"  \t\n 5");
        assert!(!cursor.skip_spaces());
        assert_eq!(cursor.peek(), Some(b'\n'));

        let mut cursor = Cursor::new(b"  5");
        assert!(cursor.skip_spaces());
        assert_eq!(cursor.peek(), Some(b'5'));

        let mut cursor = Cursor::new(b"   ");
        assert!(!cursor.skip_spaces());
    }

    #[test]
    fn test_skip_to_next_token_stops_at_braces() {
        let mut cursor = Cursor::new(b"12 abc\n}");
        assert!(cursor.skip_to_next_token());
        assert_eq!(cursor.peek(), Some(b'}'));
        assert_eq!(cursor.line(), 2);

        let mut cursor = Cursor::new(b"no markers");
        assert!(!cursor.skip_to_next_token());
    }

    #[test]
    fn test_marker_name() {
        let cursor = Cursor::new(b"*MESH_VERTEX 0 1 2 3");
        assert_eq!(cursor.marker_name(), Some(&b"MESH_VERTEX"[..]));

        let cursor = Cursor::new(b"*MESH");
        assert_eq!(cursor.marker_name(), Some(&b"MESH"[..]));

        let cursor = Cursor::new(b"*FOOX\n");
        assert_eq!(cursor.marker_name(), Some(&b"FOOX"[..]));

        let cursor = Cursor::new(b"MESH");
        assert_eq!(cursor.marker_name(), None);
    }

    #[test]
    fn test_read_int() {
        let mut cursor = Cursor::new(b"-42: rest");
        assert_eq!(cursor.read_int(), Some(-42));
        assert_eq!(cursor.peek(), Some(b':'));

        let mut cursor = Cursor::new(b"+7");
        assert_eq!(cursor.read_int(), Some(7));

        let mut cursor = Cursor::new(b"-x");
        assert_eq!(cursor.read_int(), None);
        assert_eq!(cursor.position(), 0);

        let mut cursor = Cursor::new(b"*MESH_MTLID");
        assert_eq!(cursor.read_int(), None);
    }

    #[test]
    fn test_read_float() {
        let mut cursor = Cursor::new(b"1.5\t-2.25e1 .5 3. 7e 1e+2");
        assert_eq!(cursor.read_float(), Some(1.5));
        cursor.skip_spaces();
        assert_eq!(cursor.read_float(), Some(-22.5));
        cursor.skip_spaces();
        assert_eq!(cursor.read_float(), Some(0.5));
        cursor.skip_spaces();
        assert_eq!(cursor.read_float(), Some(3.0));
        cursor.skip_spaces();
        // Dangling exponent is not part of the number
        assert_eq!(cursor.read_float(), Some(7.0));
        assert_eq!(cursor.peek(), Some(b'e'));
        cursor.advance();
        cursor.skip_spaces();
        assert_eq!(cursor.read_float(), Some(100.0));
    }

    #[test]
    fn test_read_float_rejects_non_numbers() {
        let mut cursor = Cursor::new(b"abc");
        assert_eq!(cursor.read_float(), None);
        assert_eq!(cursor.position(), 0);

        let mut cursor = Cursor::new(b"-.");
        assert_eq!(cursor.read_float(), None);
    }

    #[test]
    fn test_skip_to_marker_on_line_stops_at_braces() {
        let mut cursor = Cursor::new(b"AB: 1 } *MESH_SMOOTHING");
        assert!(!cursor.skip_to_marker_on_line());
        assert_eq!(cursor.peek(), Some(b'}'));

        let mut cursor = Cursor::new(b"AB: 1 *MESH_SMOOTHING 1\n");
        assert!(cursor.skip_to_marker_on_line());
        assert_eq!(cursor.peek(), Some(b'*'));

        let mut cursor = Cursor::new(b"CA: 0\n*MESH_FACE");
        assert!(!cursor.skip_to_marker_on_line());
        assert_eq!(cursor.peek(), Some(b'\n'));
    }

    #[test]
    fn test_take_word_stops_at_braces() {
        let mut cursor = Cursor::new(b"Bare}");
        assert_eq!(cursor.take_word(), &b"Bare"[..]);
        assert_eq!(cursor.peek(), Some(b'}'));
    }

    #[test]
    fn test_at_word() {
        let cursor = Cursor::new(b"Phong\n");
        assert!(cursor.at_word(b"Phong"));

        let cursor = Cursor::new(b"Phongish");
        assert!(!cursor.at_word(b"Phong"));

        let cursor = Cursor::new(b"Flat");
        assert!(cursor.at_word(b"Flat"));
    }

    #[test]
    fn test_take_until() {
        let mut cursor = Cursor::new(b"foo.png\" rest");
        assert_eq!(cursor.take_until(b'"'), Some(&b"foo.png"[..]));
        assert_eq!(cursor.peek(), Some(b'"'));

        let mut cursor = Cursor::new(b"foo.png");
        assert_eq!(cursor.take_until(b'"'), None);
        assert!(cursor.is_eof());
    }
}
