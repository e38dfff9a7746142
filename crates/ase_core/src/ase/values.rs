//! Inline value readers.
//!
//! Each reader starts right after a marker, stays on the marker's line, and
//! leaves the cursor just past the value. A missing or malformed value is a
//! warning and yields a default; only quoted strings can fail the parse.

use ase_math::Vec3;

use super::error::AseResult;
use super::keyword::Keyword;
use super::parser::AseParser;

impl AseParser<'_, '_> {
    /// Integer value, 0 if missing.
    pub(super) fn parse_int(&mut self) -> i64 {
        if !self.cursor.skip_spaces() {
            self.warn("Unable to parse int: unexpected end of line [#1]");
            return 0;
        }
        match self.cursor.read_int() {
            Some(value) => value,
            None => {
                self.warn("Unable to parse int: digits expected [#2]");
                0
            }
        }
    }

    /// Float value, 0.0 if missing.
    pub(super) fn parse_float(&mut self) -> f32 {
        if !self.cursor.skip_spaces() {
            self.warn("Unable to parse float: unexpected end of line [#1]");
            return 0.0;
        }
        match self.cursor.read_float() {
            Some(value) => value,
            None => {
                self.warn("Unable to parse float: number expected [#2]");
                0.0
            }
        }
    }

    /// Three floats. Components that cannot be read stay zero.
    pub(super) fn parse_float_triple(&mut self) -> Vec3 {
        let mut out = [0.0f32; 3];
        for (i, value) in out.iter_mut().enumerate() {
            if !self.cursor.skip_spaces() {
                self.warn(format!(
                    "Unable to parse float triple: unexpected end of line [#{}]",
                    i + 1
                ));
                break;
            }
            match self.cursor.read_float() {
                Some(v) => *value = v,
                None => {
                    self.warn(format!("Unable to parse float triple: number expected [#{}]", i + 1));
                    break;
                }
            }
        }
        Vec3::from_array(out)
    }

    /// Three non-negative integers. Components that cannot be read stay zero.
    pub(super) fn parse_long_triple(&mut self) -> [u32; 3] {
        let mut out = [0u32; 3];
        for (i, value) in out.iter_mut().enumerate() {
            if !self.cursor.skip_spaces() {
                self.warn(format!(
                    "Unable to parse long triple: unexpected end of line [#{}]",
                    i + 1
                ));
                break;
            }
            match self.cursor.read_int() {
                Some(v) => *value = self.index_value(v, "long triple"),
                None => {
                    self.warn(format!("Unable to parse long triple: digits expected [#{}]", i + 1));
                    break;
                }
            }
        }
        out
    }

    /// Narrow an index read from the file. Values that do not fit a `u32`
    /// are reported and read as 0.
    pub(super) fn index_value(&mut self, value: i64, what: &str) -> u32 {
        match u32::try_from(value) {
            Ok(index) => index,
            Err(_) => {
                self.warn(format!("Unable to parse {}: index {} is out of range, using 0", what, value));
                0
            }
        }
    }

    /// `index x y z`. `None` if the index is missing; the entry is dropped then.
    pub(super) fn parse_indexed_float_triple(&mut self) -> Option<(i64, Vec3)> {
        let index = self.parse_entry_index()?;
        Some((index, self.parse_float_triple()))
    }

    /// `index a b c`. `None` if the index is missing; the entry is dropped then.
    pub(super) fn parse_indexed_long_triple(&mut self) -> Option<(i64, [u32; 3])> {
        let index = self.parse_entry_index()?;
        Some((index, self.parse_long_triple()))
    }

    fn parse_entry_index(&mut self) -> Option<i64> {
        if !self.cursor.skip_spaces() {
            self.warn("Unable to parse indexed triple: unexpected end of line [#4]");
            return None;
        }
        let index = self.cursor.read_int();
        if index.is_none() {
            self.warn("Unable to parse indexed triple: index expected [#5]");
        }
        index
    }

    /// String enclosed in double quotes.
    ///
    /// A missing opening quote or a string that runs to the end of input is
    /// fatal. The unterminated case is reported at the opening quote's line.
    pub(super) fn parse_quoted_string(&mut self, keyword: Keyword) -> AseResult<String> {
        if !self.cursor.skip_spaces() || self.cursor.peek() != Some(b'"') {
            return Err(self.syntax_error(format!(
                "Unable to parse {} block: text is expected to be enclosed in double quotation marks",
                keyword
            )));
        }
        let line = self.cursor.line();
        self.cursor.advance();
        match self.cursor.take_until(b'"') {
            Some(text) => {
                let text = String::from_utf8_lossy(text).into_owned();
                self.cursor.advance();
                Ok(text)
            }
            None => Err(self.syntax_error_at(
                line,
                format!(
                    "Unable to parse {} block: string is not terminated by a double quotation mark",
                    keyword
                ),
            )),
        }
    }

    /// Material name: quoted, or a bare word from older exporters.
    pub(super) fn parse_name(&mut self) -> AseResult<String> {
        if !self.cursor.skip_spaces() {
            self.warn("Unable to parse *MATERIAL_NAME: unexpected end of line");
            return Ok(String::new());
        }
        if self.cursor.peek() == Some(b'"') {
            return self.parse_quoted_string(Keyword::MaterialName);
        }
        Ok(String::from_utf8_lossy(self.cursor.take_word()).into_owned())
    }

    /// Match the next word against `table`, returning `fallback` if none fits.
    ///
    /// A literal only matches as a whole word. Unmatched text is left for
    /// the enclosing block to skip.
    pub(super) fn parse_enum<T: Copy>(&mut self, table: &[(&str, T)], fallback: T) -> T {
        if !self.cursor.skip_spaces() {
            return fallback;
        }
        for &(literal, value) in table {
            if self.cursor.at_word(literal.as_bytes()) {
                self.cursor.advance_by(literal.len());
                return value;
            }
        }
        fallback
    }
}

#[cfg(test)]
mod tests {
    use crate::ase::diagnostics::CollectingSink;
    use crate::ase::error::AseError;
    use crate::ase::keyword::Keyword;
    use crate::ase::parser::AseParser;
    use crate::config::ParserConfig;
    use ase_math::Vec3;

    fn with_parser<R>(input: &str, f: impl FnOnce(&mut AseParser<'_, '_>) -> R) -> (R, CollectingSink) {
        let mut sink = CollectingSink::new();
        let result = {
            let mut parser = AseParser::new(input.as_bytes(), "values.ase", ParserConfig::default(), &mut sink);
            f(&mut parser)
        };
        (result, sink)
    }

    #[test]
    fn test_parse_int() {
        let (value, sink) = with_parser(" -12 rest", |p| p.parse_int());
        assert_eq!(value, -12);
        assert_eq!(sink.warning_count(), 0);

        let (value, sink) = with_parser("   \n 5", |p| p.parse_int());
        assert_eq!(value, 0);
        assert_eq!(sink.warning_count(), 1);
    }

    #[test]
    fn test_parse_float() {
        let (value, _) = with_parser("\t0.2500", |p| p.parse_float());
        assert_eq!(value, 0.25);

        let (value, sink) = with_parser(" abc", |p| p.parse_float());
        assert_eq!(value, 0.0);
        assert!(sink.diagnostics[0].message.contains("[#2]"));
    }

    #[test]
    fn test_float_triple_partial() {
        let (value, sink) = with_parser(" 1.0 x 3.0", |p| p.parse_float_triple());
        assert_eq!(value, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(sink.warning_count(), 1);
        assert!(sink.diagnostics[0].message.contains("[#2]"));
    }

    #[test]
    fn test_indexed_triples() {
        let (value, _) = with_parser(" 3\t1.0\t2.0\t3.0", |p| p.parse_indexed_float_triple());
        assert_eq!(value, Some((3, Vec3::new(1.0, 2.0, 3.0))));

        let (value, _) = with_parser(" 1 4 5 6", |p| p.parse_indexed_long_triple());
        assert_eq!(value, Some((1, [4, 5, 6])));

        let (value, sink) = with_parser("\n", |p| p.parse_indexed_float_triple());
        assert_eq!(value, None);
        assert_eq!(sink.warning_count(), 1);
    }

    #[test]
    fn test_long_triple_rejects_negative_values() {
        let (value, sink) = with_parser(" 4 -2 6", |p| p.parse_long_triple());
        assert_eq!(value, [4, 0, 6]);
        assert_eq!(sink.warning_count(), 1);
        assert!(sink.diagnostics[0].message.contains("-2"));
    }

    #[test]
    fn test_quoted_string() {
        let (value, _) = with_parser(" \"Box 01\" *NEXT", |p| {
            let text = p.parse_quoted_string(Keyword::NodeName);
            (text, p.cursor.peek())
        });
        assert_eq!(value.0.unwrap(), "Box 01");
        assert_eq!(value.1, Some(b' '));
    }

    #[test]
    fn test_quoted_string_errors() {
        let (value, sink) = with_parser(" Box01", |p| p.parse_quoted_string(Keyword::NodeName));
        assert!(matches!(value, Err(AseError::Syntax { line: 1, .. })));
        assert_eq!(sink.errors().count(), 1);

        let (value, _) = with_parser(" \"multi\nline\nnever closed", |p| {
            p.parse_quoted_string(Keyword::Bitmap)
        });
        assert!(matches!(value, Err(AseError::Syntax { line: 1, .. })));
    }

    #[test]
    fn test_parse_enum_whole_word() {
        let table = [("Phong", 1), ("Flat", 2)];
        let (value, _) = with_parser(" Flat\n", |p| p.parse_enum(&table, 0));
        assert_eq!(value, 2);

        let (value, sink) = with_parser(" Phongish", |p| p.parse_enum(&table, 0));
        assert_eq!(value, 0);
        assert_eq!(sink.warning_count(), 0);
    }
}
