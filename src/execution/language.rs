//! Playground languages and their execution parameters

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Languages offered by the playground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    Java,
    Python,
    JavaScript,
    Go,
    CSharp,
    Php,
    Ruby,
    Kotlin,
    Swift,
    Rust,
}

/// Language/version pair understood by the execution API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageSelection {
    /// Execution API language identifier
    pub language: &'static str,
    /// Execution API version index
    pub version_index: &'static str,
}

impl Language {
    /// Every supported language, in selector order
    pub const ALL: [Language; 12] = [
        Language::C,
        Language::Cpp,
        Language::Java,
        Language::Python,
        Language::JavaScript,
        Language::Go,
        Language::CSharp,
        Language::Php,
        Language::Ruby,
        Language::Kotlin,
        Language::Swift,
        Language::Rust,
    ];

    /// Language used when the requested key is unknown
    pub const DEFAULT: Language = Language::Java;

    /// Key used by the UI and the HTTP API
    pub fn key(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Go => "go",
            Language::CSharp => "csharp",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Kotlin => "kotlin",
            Language::Swift => "swift",
            Language::Rust => "rust",
        }
    }

    /// Human-readable label for the language selector
    pub fn label(self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
            Language::Java => "Java",
            Language::Python => "Python",
            Language::JavaScript => "JavaScript (Node.js)",
            Language::Go => "Go",
            Language::CSharp => "C#",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Kotlin => "Kotlin",
            Language::Swift => "Swift",
            Language::Rust => "Rust",
        }
    }

    /// Execution API parameters for this language
    pub fn selection(self) -> LanguageSelection {
        let language = match self {
            Language::C => "c",
            Language::Cpp => "cpp17",
            Language::Java => "java",
            Language::Python => "python3",
            Language::JavaScript => "nodejs",
            Language::Go => "go",
            Language::CSharp => "csharp",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Kotlin => "kotlin",
            Language::Swift => "swift",
            Language::Rust => "rust",
        };
        LanguageSelection {
            language,
            version_index: "0",
        }
    }

    /// Resolve a UI key, falling back to [`Language::DEFAULT`]
    pub fn from_key_or_default(key: Option<&str>) -> Self {
        key.and_then(|k| k.parse().ok()).unwrap_or(Self::DEFAULT)
    }
}

impl std::str::FromStr for Language {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.key() == s)
            .ok_or_else(|| crate::Error::Validation(format!("Unsupported language: {}", s)))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
