use std::{fmt, path::Path, sync::Arc};

/// Fixed persona text sent as the system message of every exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemPrompt(Arc<str>);

impl SystemPrompt {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(Arc::from(text.as_ref().trim()))
    }

    /// Read the prompt file once. A missing file is fatal to the caller.
    pub async fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;
        Ok(Self::new(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SystemPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn load_trims_surrounding_whitespace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\n  You are AssetIQ.\nAnswer concisely.  \n").unwrap();

        let prompt = SystemPrompt::load(file.path()).await.unwrap();
        assert_eq!(prompt.as_str(), "You are AssetIQ.\nAnswer concisely.");
    }

    #[tokio::test]
    async fn load_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SystemPrompt::load(dir.path().join("missing.txt")).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
