//! JSON AST backend.
//!
//! Writes the program in the interchange form read back by
//! [`Program::from_json`](crate::ast::Program::from_json).

use crate::ast::Program;

use super::{CodeGenError, CodeGenErrorKind, CodeGenerator, GeneratedOutput};

/// Backend that serializes the AST as pretty-printed JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonBackend;

impl JsonBackend {
    /// Creates a JSON backend.
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for JsonBackend {
    fn generate(&self, program: &Program) -> Result<GeneratedOutput, CodeGenError> {
        let mut code = serde_json::to_string_pretty(program)
            .map_err(|e| CodeGenError::new(CodeGenErrorKind::Serialization(e.to_string())))?;
        code.push('\n');
        Ok(GeneratedOutput::json(code))
    }

    fn backend_name(&self) -> &str {
        "JSON"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;

    #[test]
    fn test_json_round_trip() {
        let program = parse_program("x := 1 LOOP IF x > 2 THEN BREAK ENDIF x := x + 1 ENDLOOP").unwrap();
        let code = JsonBackend::new().generate(&program).unwrap().code;
        let back = Program::from_json(&code).unwrap();
        assert_eq!(back, program);
    }

    #[test]
    fn test_json_shape() {
        let program = parse_program("OUTPUT NOT done").unwrap();
        let code = JsonBackend::new().generate(&program).unwrap().code;
        let json: serde_json::Value = serde_json::from_str(&code).unwrap();
        assert_eq!(json["type"], "Program");
        assert_eq!(json["body"][0]["type"], "Output");
        assert_eq!(json["body"][0]["value"]["operator"], "NOT");
    }
}
