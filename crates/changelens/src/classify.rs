// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! File classification
//!
//! Every changed path is sorted into a coarse [`Category`] by walking
//! [`RULES`] from top to bottom and stopping at the first rule that matches.
//! The CI directory rule is the only one that can yield two categories: the
//! AI assistant instructions file is tagged both as CI/CD configuration and
//! as the AI guide.

use changelens_git::ChangeKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directory holding CI configuration and the assistant instructions
pub const CI_DIR: &str = ".github/";

/// The AI assistant instructions file the digest is written for
pub const AI_GUIDE_PATH: &str = ".github/copilot-instructions.md";

/// Coarse nature of a changed file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Files under the CI directory
    CiConfiguration,
    /// The assistant instructions file itself
    AiGuide,
    /// Program source files
    SourceCode,
    /// Prose documents
    Documentation,
    /// Structured configuration files
    Configuration,
    /// Markup and stylesheets
    FrontendAssets,
    /// SQL and database files
    Database,
    /// Shell, batch and PowerShell scripts
    Scripts,
    /// Interface definition files
    ProtocolDefinitions,
    /// Anything that looks like a test
    TestFiles,
    /// Well-known root documents
    ProjectDocumentation,
    /// Files without an extension
    Executable,
    /// Everything else
    Other,
}

impl Category {
    /// Human readable label used in reports
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::CiConfiguration => "CI/CD configuration",
            Self::AiGuide => "AI guide",
            Self::SourceCode => "source code",
            Self::Documentation => "documentation",
            Self::Configuration => "configuration",
            Self::FrontendAssets => "frontend assets",
            Self::Database => "database",
            Self::Scripts => "scripts",
            Self::ProtocolDefinitions => "protocol definitions",
            Self::TestFiles => "test files",
            Self::ProjectDocumentation => "project documentation",
            Self::Executable => "executable/script file",
            Self::Other => "other files",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a rule decides whether it applies to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Path starts with one of these directory prefixes
    DirPrefix(&'static [&'static str]),
    /// Path ends with `.` followed by one of these extensions
    Extension(&'static [&'static str]),
    /// Path lives in a test directory or mentions "test" in any case
    TestPath,
    /// Path is exactly one of these names
    ExactPath(&'static [&'static str]),
    /// Base file name has no `.` at all
    NoExtension,
    /// Matches every path
    Always,
}

impl Matcher {
    /// Whether the matcher accepts `path`
    #[must_use]
    pub fn matches(self, path: &str) -> bool {
        match self {
            Self::DirPrefix(prefixes) => prefixes.iter().any(|p| path.starts_with(p)),
            Self::Extension(exts) => exts.iter().any(|ext| has_extension(path, ext)),
            Self::TestPath => {
                path.starts_with("test/")
                    || path.starts_with("tests/")
                    || path.to_lowercase().contains("test")
            }
            Self::ExactPath(names) => names.contains(&path),
            Self::NoExtension => !file_name(path).contains('.'),
            Self::Always => true,
        }
    }
}

/// One row of the classification table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Category assigned when the rule matches
    pub category: Category,
    /// When the rule matches
    pub matcher: Matcher,
    /// Extra category for one exact path matched by this rule
    pub companion: Option<(&'static str, Category)>,
}

impl Rule {
    const fn new(category: Category, matcher: Matcher) -> Self {
        Self {
            category,
            matcher,
            companion: None,
        }
    }

    /// Categories this rule assigns to a path it matched
    #[must_use]
    pub fn categories_for(&self, path: &str) -> Vec<Category> {
        let mut categories = vec![self.category];
        if let Some((exact, extra)) = self.companion {
            if path == exact {
                categories.push(extra);
            }
        }
        categories
    }
}

/// Classification rules, evaluated in order; the first match wins
pub const RULES: &[Rule] = &[
    Rule {
        category: Category::CiConfiguration,
        matcher: Matcher::DirPrefix(&[CI_DIR]),
        companion: Some((AI_GUIDE_PATH, Category::AiGuide)),
    },
    Rule::new(
        Category::SourceCode,
        Matcher::Extension(&["py", "js", "ts", "java", "cs", "cpp", "c", "h"]),
    ),
    Rule::new(
        Category::Documentation,
        Matcher::Extension(&["md", "txt", "rst", "adoc"]),
    ),
    Rule::new(
        Category::Configuration,
        Matcher::Extension(&["json", "yaml", "yml", "xml", "ini", "toml"]),
    ),
    Rule::new(
        Category::FrontendAssets,
        Matcher::Extension(&["html", "css", "scss", "less"]),
    ),
    Rule::new(Category::Database, Matcher::Extension(&["sql", "db"])),
    Rule::new(Category::Scripts, Matcher::Extension(&["sh", "bat", "ps1"])),
    Rule::new(
        Category::ProtocolDefinitions,
        Matcher::Extension(&["proto", "thrift"]),
    ),
    Rule::new(Category::TestFiles, Matcher::TestPath),
    Rule::new(
        Category::ProjectDocumentation,
        Matcher::ExactPath(&["README.md", "LICENSE", "CHANGELOG.md", "CONTRIBUTING.md"]),
    ),
    Rule::new(Category::Executable, Matcher::NoExtension),
    Rule::new(Category::Other, Matcher::Always),
];

/// Action label for a raw name-status token
///
/// Only the first character counts, so `R087` is "renamed". Unknown or empty
/// statuses are "changed".
#[must_use]
pub fn action_label(status: &str) -> &'static str {
    ChangeKind::from_status(status).label()
}

/// The first rule in [`RULES`] that matches `path`
#[must_use]
pub fn matching_rule(path: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matcher.matches(path))
}

/// Categories for a changed path
///
/// Always returns at least one category since the last rule matches
/// everything.
#[must_use]
pub fn classify(path: &str) -> Vec<Category> {
    matching_rule(path)
        .map(|rule| rule.categories_for(path))
        .unwrap_or_else(|| vec![Category::Other])
}

fn has_extension(path: &str, ext: &str) -> bool {
    path.strip_suffix(ext)
        .is_some_and(|stem| stem.ends_with('.'))
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every path gets at least one category
        #[test]
        fn prop_classify_total(path in ".*") {
            let categories = classify(&path);
            prop_assert!(!categories.is_empty());
            prop_assert!(categories.len() <= 2);
        }

        /// Property: only the AI guide path yields two categories
        #[test]
        fn prop_two_categories_only_for_ai_guide(path in "[a-z./_]{0,40}") {
            let categories = classify(&path);
            prop_assert_eq!(categories.len() == 2, path == AI_GUIDE_PATH);
        }

        /// Property: anything under the CI directory is CI/CD configuration
        #[test]
        fn prop_ci_prefix_wins(rest in "[a-z/]{1,20}\\.(py|yml|md|sql|sh)") {
            let path = format!("{CI_DIR}{rest}");
            prop_assert_eq!(classify(&path)[0], Category::CiConfiguration);
        }
    }
}
