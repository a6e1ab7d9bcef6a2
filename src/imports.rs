use tracing::trace;

use crate::{
    annotation::{classify, AnnotationMatch, SERIALIZABLE_MARKER, SERIAL_NAME_PREFIX},
    source::{detect_terminator, SourceLine},
    transformation_engine::MigrationStats,
};

pub const SERIALIZABLE_IMPORT: &str = "import kotlinx.serialization.Serializable";
pub const SERIAL_NAME_IMPORT: &str = "import kotlinx.serialization.SerialName";

/// Imports the annotation pass knows it will need
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportRequirements {
    pub serializable: bool,
    pub serial_name: bool,
}

/// Second pass: drops Moshi imports and adds the kotlinx.serialization ones the file needs
pub struct ImportManager {
    lines: Vec<SourceLine>,
    terminator: &'static str,
    package_index: Option<usize>,
    anchor: Option<usize>,
}

impl ImportManager {
    /// Takes the first-pass output and strips legacy imports from it
    pub fn new(lines: Vec<SourceLine>, stats: &mut MigrationStats) -> Self {
        let terminator = detect_terminator(&lines);
        let before = lines.len();
        let lines: Vec<SourceLine> = lines
            .into_iter()
            .filter(|line| classify(line.content()) != AnnotationMatch::LegacyImport)
            .collect();
        stats.legacy_imports_removed += before - lines.len();

        let package_index = lines.iter().position(|line| line.as_str().starts_with("package "));
        let anchor = lines
            .iter()
            .rposition(|line| line.trimmed().starts_with("import "));

        Self {
            lines,
            terminator,
            package_index,
            anchor,
        }
    }

    /// Add whichever target imports are required and missing, `Serializable` first
    pub fn apply(mut self, requirements: ImportRequirements, stats: &mut MigrationStats) -> Vec<SourceLine> {
        let needs_serializable = requirements.serializable
            || self.any_trimmed(|line| line.starts_with(SERIALIZABLE_MARKER));
        let needs_serial_name = requirements.serial_name
            || self.any_trimmed(|line| line.starts_with(SERIAL_NAME_PREFIX));

        if needs_serializable && !self.has_import(SERIALIZABLE_IMPORT) {
            self.insert_import(SERIALIZABLE_IMPORT);
            stats.serializable_import_added = true;
        }

        if needs_serial_name && !self.has_import(SERIAL_NAME_IMPORT) {
            self.insert_import(SERIAL_NAME_IMPORT);
            stats.serial_name_import_added = true;
        }

        self.lines
    }

    fn any_trimmed(&self, predicate: impl Fn(&str) -> bool) -> bool {
        self.lines.iter().any(|line| predicate(line.trimmed()))
    }

    fn has_import(&self, import: &str) -> bool {
        self.any_trimmed(|line| line == import)
    }

    /// Insert after the last import, else after `package` (and one blank line), else at the top.
    /// Each insertion becomes the anchor for the next one.
    fn insert_import(&mut self, import: &str) {
        let at = match (self.anchor, self.package_index) {
            (Some(last_import), _) => last_import + 1,
            (None, Some(package)) => {
                let mut at = package + 1;
                if at < self.lines.len() && self.lines[at].is_blank() {
                    at += 1;
                }
                at
            }
            (None, None) => 0,
        };

        if at > 0 {
            self.lines[at - 1].ensure_terminated(self.terminator);
        }
        trace!(import, line = at + 1, "inserting import");
        self.lines
            .insert(at, SourceLine::with_terminator(import, self.terminator));
        self.anchor = Some(at);
    }
}
