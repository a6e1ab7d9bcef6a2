use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    annotation::{
        classify, looks_like_declaration, parse_field_declaration, serial_name_marker,
        serializable_marker, AnnotationMatch,
    },
    imports::{ImportManager, ImportRequirements},
    migration_mode::MigrationMode,
    naming::camel_to_snake,
    source::{split_lines, SourceLine},
    validation::{ValidationError, ValidationErrorKind},
};

/// Two-pass Moshi to kotlinx.serialization rewriter for the lines of one file
pub struct MigrationEngine {
    mode: MigrationMode,
}

/// Counters accumulated while migrating a file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationStats {
    pub class_markers_replaced: usize,
    pub field_markers_removed: usize,
    pub rename_markers_inserted: usize,
    pub legacy_imports_removed: usize,
    pub serializable_import_added: bool,
    pub serial_name_import_added: bool,
}

/// Result of migrating one file's lines
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub lines: Vec<SourceLine>,
    pub changed: bool,
    pub stats: MigrationStats,
    pub errors: Vec<ValidationError>,
}

/// What happens to a `@Json(name = ...)` marker once its declaration has been looked at
enum NamedMarkerOutcome {
    Drop,
    Rename,
    Reject(ValidationError),
}

impl MigrationStats {
    /// Fold another file's counters into this one
    pub fn absorb(&mut self, other: &MigrationStats) {
        self.class_markers_replaced += other.class_markers_replaced;
        self.field_markers_removed += other.field_markers_removed;
        self.rename_markers_inserted += other.rename_markers_inserted;
        self.legacy_imports_removed += other.legacy_imports_removed;
        self.serializable_import_added |= other.serializable_import_added;
        self.serial_name_import_added |= other.serial_name_import_added;
    }
}

impl TransformResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl MigrationEngine {
    pub fn new(mode: MigrationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MigrationMode {
        self.mode
    }

    /// Run both passes over `input`. Validation failures end up in `errors`; they never abort the scan.
    pub fn transform(&self, input: &[SourceLine]) -> TransformResult {
        let mut stats = MigrationStats::default();
        let mut errors = Vec::new();

        let (rewritten, requirements) = self.rewrite_annotations(input, &mut stats, &mut errors);
        let lines = ImportManager::new(rewritten, &mut stats).apply(requirements, &mut stats);

        let changed = lines.as_slice() != input;
        debug!(
            mode = %self.mode,
            changed,
            errors = errors.len(),
            "migration passes finished"
        );

        TransformResult {
            lines,
            changed,
            stats,
            errors,
        }
    }

    /// First pass: replace or drop Moshi annotations, one line of lookahead
    fn rewrite_annotations(
        &self,
        input: &[SourceLine],
        stats: &mut MigrationStats,
        errors: &mut Vec<ValidationError>,
    ) -> (Vec<SourceLine>, ImportRequirements) {
        let mut output = Vec::with_capacity(input.len());
        let mut requirements = ImportRequirements::default();

        for (index, line) in input.iter().enumerate() {
            match classify(line.content()) {
                AnnotationMatch::ClassMarker { indent } => {
                    output.push(SourceLine::with_terminator(
                        &serializable_marker(&indent),
                        line.terminator(),
                    ));
                    stats.class_markers_replaced += 1;
                    requirements.serializable = true;
                }
                AnnotationMatch::NamedFieldMarker {
                    indent,
                    declared_name,
                } => match self.resolve_named_marker(&declared_name, input.get(index + 1), index + 1) {
                    NamedMarkerOutcome::Drop => stats.field_markers_removed += 1,
                    NamedMarkerOutcome::Rename => {
                        output.push(SourceLine::with_terminator(
                            &serial_name_marker(&indent, &declared_name),
                            line.terminator(),
                        ));
                        stats.rename_markers_inserted += 1;
                        requirements.serial_name = true;
                    }
                    NamedMarkerOutcome::Reject(error) => {
                        debug!(line = error.line, kind = ?error.kind, "named marker rejected");
                        if error.kind == ValidationErrorKind::NameMismatch {
                            stats.field_markers_removed += 1;
                        }
                        errors.push(error);
                    }
                },
                AnnotationMatch::BareFieldMarker => stats.field_markers_removed += 1,
                AnnotationMatch::LegacyImport | AnnotationMatch::NoMatch => output.push(line.clone()),
            }
        }

        (output, requirements)
    }

    /// Decide the fate of a named marker from the line that follows it.
    /// The following line is only inspected; the caller still processes it normally.
    fn resolve_named_marker(
        &self,
        declared_name: &str,
        next: Option<&SourceLine>,
        line_number: usize,
    ) -> NamedMarkerOutcome {
        if !self.mode.validates_declarations() {
            return NamedMarkerOutcome::Rename;
        }

        let next = match next {
            Some(next) => next,
            None => return NamedMarkerOutcome::Reject(ValidationError::missing_declaration(None, line_number)),
        };

        let declaration = match parse_field_declaration(next.content()) {
            Some(declaration) => declaration,
            None if looks_like_declaration(next.content()) => {
                return NamedMarkerOutcome::Reject(ValidationError::malformed_declaration(
                    next.content(),
                    line_number,
                ))
            }
            None => {
                return NamedMarkerOutcome::Reject(ValidationError::missing_declaration(
                    Some(next.content()),
                    line_number,
                ))
            }
        };

        let expected = camel_to_snake(&declaration.identifier);
        if expected == declared_name {
            return NamedMarkerOutcome::Drop;
        }

        match self.mode {
            MigrationMode::FixMismatches => NamedMarkerOutcome::Rename,
            _ => NamedMarkerOutcome::Reject(ValidationError::name_mismatch(
                &declaration.identifier,
                &expected,
                declared_name,
                line_number,
            )),
        }
    }
}

/// Migrate a whole source text without touching the filesystem
pub fn migrate_source(text: &str, mode: MigrationMode) -> TransformResult {
    MigrationEngine::new(mode).transform(&split_lines(text))
}
