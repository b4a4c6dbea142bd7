//! Structure extraction engine
//!
//! Folds OCR-transcribed source text into a [`StructureGraph`] with a single
//! forward pass over its lines. There is no grammar here: declarations are
//! found with one loose pattern and references with substring search, which
//! keeps the engine tolerant of the noise OCR leaves behind.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use tracing::{debug, span, trace, Level};

use super::database::{ClassEntity, StructureGraph};
use super::dialect::Dialect;
use crate::core::Parser;

// `class` at line start or after whitespace, whitespace, one identifier,
// then whitespace or `(`. `\w` is Unicode-aware, so `Größe` or `図形` count
// as identifiers.
static CLASS_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)class\s+(\w+)[\s(]").unwrap());

/// Return the class name declared on a line, if any
pub fn declared_class_name(line: &str) -> Option<&str> {
    CLASS_DECLARATION
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Outcome of scanning one body line for references
#[derive(Debug, Default, PartialEq, Eq)]
struct LineScan {
    /// Names referenced on the line, in graph discovery order
    references: Vec<String>,
    /// A known name was immediately followed by `(` and the scan stopped there
    call_expression: bool,
}

/// Scan a body line for references to known classes
///
/// Only the first occurrence of each name is examined. A name followed by
/// `(` stops the scan; names already found before it are kept. The current
/// class's own name can stop the scan but is never recorded.
fn scan_references(line: &str, graph: &StructureGraph, current: &str) -> LineScan {
    let mut scan = LineScan::default();
    for name in graph.class_names() {
        let Some(idx) = line.find(name) else {
            continue;
        };

        if line[idx + name.len()..].starts_with('(') {
            scan.call_expression = true;
            break;
        }

        if name != current {
            scan.references.push(name.to_string());
        }
    }
    scan
}

/// Line-oriented class structure parser for one dialect
#[derive(Debug, Clone, Copy)]
pub struct StructureParser {
    dialect: Dialect,
}

impl StructureParser {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
}

impl Parser<StructureGraph> for StructureParser {
    fn parse(&self, input: &str, database: &mut StructureGraph) -> Result<bool> {
        let parse_span = span!(
            Level::INFO,
            "parse_structure",
            dialect = %self.dialect,
            input_len = input.len()
        );
        let _enter = parse_span.enter();

        let mut extracted = false;
        let mut current: Option<String> = None;
        let mut declarations = 0usize;
        let mut references = 0usize;

        for (line_no, line) in input.split('\n').enumerate() {
            if let Some(name) = declared_class_name(line) {
                if !database.contains(name) {
                    let mut class = ClassEntity::new(name);
                    if let Some(parent) = self.dialect.find_parent(line) {
                        trace!(line_no, class = name, parent, "Detected parent class");
                        class.parent_classes.insert(parent.to_string());
                    }
                    database.insert_class(class);
                    declarations += 1;
                    debug!(line_no, class = name, "Discovered class");
                } else {
                    trace!(line_no, class = name, "Re-declaration, keeping first parent detection");
                }

                current = Some(name.to_string());
                extracted = true;
                continue;
            }

            let Some(current_name) = current.as_deref() else {
                trace!(line_no, "Skipping line before any declaration");
                continue;
            };

            let scan = scan_references(line, database, current_name);
            if scan.call_expression {
                trace!(line_no, "Call expression, stopped scanning line");
            }
            if scan.references.is_empty() {
                continue;
            }
            if let Some(class) = database.get_class_mut(current_name) {
                for name in scan.references {
                    trace!(line_no, class = current_name, reference = %name, "Recorded reference");
                    class.ref_classes.insert(name);
                    references += 1;
                }
                extracted = true;
            }
        }

        debug!(
            declarations,
            references,
            class_count = database.class_count(),
            extracted,
            "Structure parsing completed"
        );
        Ok(extracted)
    }

    fn name(&self) -> &'static str {
        "structure"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
