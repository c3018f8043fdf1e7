use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Deepest bracket nesting accepted. `(a)` is one level, `((a))` two.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Fail on a bracket with no matching closer instead of reading to the end of input.
    #[serde(default)]
    pub strict_brackets: bool,
}

fn default_max_depth() -> usize {
    128
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            strict_brackets: false,
        }
    }
}

impl TokenizerConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::Config(format!("failed to open {}: {}", path.display(), e)))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_strict_brackets(mut self, strict_brackets: bool) -> Self {
        self.strict_brackets = strict_brackets;
        self
    }
}
