//! Loading programs from any of the supported input formats.
//!
//! Rapcode text, RAPTOR flowcharts and JSON AST documents all end up as the
//! same [`Program`]. Only flowcharts can produce warnings.

use std::path::Path;

use crate::ast::Program;
use crate::error::Result;
use crate::flowchart::{self, LoweredProgram};
use crate::parser::parse_program;

/// The format of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Rapcode text (`.rapcode`).
    Rapcode,
    /// RAPTOR flowchart XML (`.rap`).
    Flowchart,
    /// The JSON form of the AST (`.json`).
    Json,
}

impl SourceKind {
    /// Picks the format from a file extension, ignoring case.
    ///
    /// ```
    /// use rapcode::source::SourceKind;
    /// use std::path::Path;
    ///
    /// assert_eq!(SourceKind::from_path(Path::new("loop.RAP")), Some(SourceKind::Flowchart));
    /// assert_eq!(SourceKind::from_path(Path::new("notes.txt")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<SourceKind> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "rapcode" => Some(SourceKind::Rapcode),
            "rap" => Some(SourceKind::Flowchart),
            "json" => Some(SourceKind::Json),
            _ => None,
        }
    }
}

/// Loads a program from `text` in the given format.
pub fn load(text: &str, kind: SourceKind) -> Result<LoweredProgram> {
    log::debug!("loading {:?} input ({} bytes)", kind, text.len());

    let lowered = match kind {
        SourceKind::Rapcode => plain(parse_program(text)?),
        SourceKind::Flowchart => flowchart::load(text)?,
        SourceKind::Json => plain(Program::from_json(text)?),
    };
    Ok(lowered)
}

fn plain(program: Program) -> LoweredProgram {
    LoweredProgram {
        program,
        warnings: Vec::new(),
    }
}
