//! Source dialect rules
//!
//! Each dialect is a small recipe for spotting the parent class on a single
//! declaration line. The recipes are plain data: an ordered list of literal
//! markers and the rule for where the parent name ends.

use std::fmt;
use std::str::FromStr;

use crate::core::NavigatorError;

/// Source-language dialect of the transcribed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Cpp,
    Java,
    Kotlin,
}

/// Where a parent name stops once its marker has been found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// The next space
    Space,
    /// The next `(` when it comes before the next space, else the next space
    ParenOrSpace,
}

/// Inheritance recipe for one dialect
#[derive(Debug)]
struct InheritanceRule {
    /// Markers in priority order; the first one present on the line wins
    markers: &'static [&'static str],
    terminator: Terminator,
}

const CPP_RULE: InheritanceRule = InheritanceRule {
    markers: &["public ", "private "],
    terminator: Terminator::Space,
};

const JAVA_RULE: InheritanceRule = InheritanceRule {
    markers: &["extends "],
    terminator: Terminator::Space,
};

const KOTLIN_RULE: InheritanceRule = InheritanceRule {
    markers: &[" : public ", ") : "],
    terminator: Terminator::ParenOrSpace,
};

impl Dialect {
    /// All supported dialects
    pub const ALL: [Dialect; 3] = [Dialect::Cpp, Dialect::Java, Dialect::Kotlin];

    /// Canonical tag of this dialect
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Cpp => "cpp",
            Dialect::Java => "java",
            Dialect::Kotlin => "kotlin",
        }
    }

    /// Alternative spellings accepted by [`Dialect::from_str`]
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Dialect::Cpp => &["c++"],
            Dialect::Java | Dialect::Kotlin => &[],
        }
    }

    /// Source file extensions (without the dot) written in this dialect
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Dialect::Cpp => &["cpp", "cc", "cxx", "hpp", "hh", "h"],
            Dialect::Java => &["java"],
            Dialect::Kotlin => &["kt", "kts"],
        }
    }

    /// Guess the dialect from a source file extension (without the dot)
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|dialect| dialect.extensions().contains(&extension.as_str()))
    }

    fn rule(&self) -> &'static InheritanceRule {
        match self {
            Dialect::Cpp => &CPP_RULE,
            Dialect::Java => &JAVA_RULE,
            Dialect::Kotlin => &KOTLIN_RULE,
        }
    }

    /// Find the parent class named on a declaration line
    ///
    /// Returns `None` when no marker is present, or when the name after the
    /// marker is empty or has no terminator (a line truncated by OCR).
    pub fn find_parent<'a>(&self, line: &'a str) -> Option<&'a str> {
        let rule = self.rule();
        let start = rule
            .markers
            .iter()
            .find_map(|marker| line.find(marker).map(|idx| idx + marker.len()))?;

        let rest = &line[start..];
        let space = rest.find(' ');
        let end = match rule.terminator {
            Terminator::Space => space,
            Terminator::ParenOrSpace => match (rest.find('('), space) {
                (Some(paren), Some(space)) if paren < space => Some(paren),
                (Some(paren), None) => Some(paren),
                (_, space) => space,
            },
        }?;

        let name = &rest[..end];
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

impl FromStr for Dialect {
    type Err = NavigatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpp" | "c++" => Ok(Dialect::Cpp),
            "java" => Ok(Dialect::Java),
            "kotlin" => Ok(Dialect::Kotlin),
            _ => Err(NavigatorError::unsupported_dialect(s)),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
