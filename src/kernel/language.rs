use crate::models::extension_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    JavaScript,
    TypeScript,
    Html,
    Css,
    Json,
    Markdown,
    Python,
    Java,
    C,
    Cpp,
    CSharp,
    Go,
    Php,
    Ruby,
    Rust,
    Shell,
    Sql,
    Swift,
    Xml,
    Yaml,
    PlainText,
}

impl LanguageId {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "js" | "jsx" => Self::JavaScript,
            "ts" | "tsx" => Self::TypeScript,
            "html" => Self::Html,
            "css" => Self::Css,
            "json" => Self::Json,
            "md" => Self::Markdown,
            "py" => Self::Python,
            "java" => Self::Java,
            "c" => Self::C,
            "cpp" => Self::Cpp,
            "cs" => Self::CSharp,
            "go" => Self::Go,
            "php" => Self::Php,
            "rb" => Self::Ruby,
            "rs" => Self::Rust,
            "sh" => Self::Shell,
            "sql" => Self::Sql,
            "swift" => Self::Swift,
            "xml" => Self::Xml,
            "yaml" | "yml" => Self::Yaml,
            _ => Self::PlainText,
        }
    }

    /// Language of a file name or path, by its last dot-segment.
    pub fn from_name(name: &str) -> Self {
        let name = crate::models::path::basename(name);
        Self::from_extension(extension_of(name))
    }

    /// Key used by the runner registry and the persisted editor state.
    pub fn language_id(self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Python => "python",
            Self::Java => "java",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::CSharp => "csharp",
            Self::Go => "go",
            Self::Php => "php",
            Self::Ruby => "ruby",
            Self::Rust => "rust",
            Self::Shell => "shell",
            Self::Sql => "sql",
            Self::Swift => "swift",
            Self::Xml => "xml",
            Self::Yaml => "yaml",
            Self::PlainText => "plaintext",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Json => "JSON",
            Self::Markdown => "Markdown",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::C => "C",
            Self::Cpp => "C++",
            Self::CSharp => "C#",
            Self::Go => "Go",
            Self::Php => "PHP",
            Self::Ruby => "Ruby",
            Self::Rust => "Rust",
            Self::Shell => "Shell",
            Self::Sql => "SQL",
            Self::Swift => "Swift",
            Self::Xml => "XML",
            Self::Yaml => "YAML",
            Self::PlainText => "Plain Text",
        }
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.language_id())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/language.rs"]
mod tests;
