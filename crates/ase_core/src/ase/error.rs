use thiserror::Error;

/// Fatal errors that abort an ASE parse.
///
/// No partial scene is returned alongside any of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AseError {
    #[error("Line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Line {line}: Unexpected end of input, {block} block is not closed")]
    UnexpectedEof { line: usize, block: String },

    #[error("Line {line}: Nesting depth exceeds the limit of {limit}")]
    NestingTooDeep { line: usize, limit: usize },
}

impl AseError {
    /// Line the error was raised at.
    pub fn line(&self) -> usize {
        match self {
            AseError::Syntax { line, .. }
            | AseError::UnexpectedEof { line, .. }
            | AseError::NestingTooDeep { line, .. } => *line,
        }
    }

    /// The message without the line prefix.
    pub fn detail(&self) -> String {
        match self {
            AseError::Syntax { message, .. } => message.clone(),
            AseError::UnexpectedEof { block, .. } => {
                format!("Unexpected end of input, {} block is not closed", block)
            }
            AseError::NestingTooDeep { limit, .. } => {
                format!("Nesting depth exceeds the limit of {}", limit)
            }
        }
    }
}

/// Result type for parsing operations.
pub type AseResult<T> = Result<T, AseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_detail() {
        let errors = [
            AseError::Syntax {
                line: 4,
                message: "':' expected".to_string(),
            },
            AseError::UnexpectedEof {
                line: 9,
                block: "*MESH".to_string(),
            },
            AseError::NestingTooDeep { line: 2, limit: 8 },
        ];
        for error in &errors {
            assert_eq!(error.to_string(), format!("Line {}: {}", error.line(), error.detail()));
        }
    }
}
