//! ClauseScan terminal client
//!
//! Drives the same upload controller as the browser front end, with a
//! `reqwest` analyzer and a terminal view surface.

pub mod config;
pub mod http;
pub mod terminal;

use std::path::Path;

use anyhow::Context;
use clause_core::{AnalysisRequest, SubmitOutcome};

pub use config::{ClientConfig, ConfigError};
pub use http::HttpAnalyzer;
pub use terminal::{format_tree, OutputMode, TerminalSurface};

/// Read the selected document, if any. A missing path is a selection of
/// nothing; an unreadable path is an error.
pub async fn read_selection(
    path: Option<&Path>,
) -> anyhow::Result<Option<AnalysisRequest<Vec<u8>>>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let body = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Some(AnalysisRequest::new(filename, body)))
}

/// Process exit status for a finished submission
pub fn exit_status(outcome: SubmitOutcome) -> u8 {
    match outcome {
        SubmitOutcome::Results => 0,
        SubmitOutcome::Error | SubmitOutcome::Superseded => 1,
        SubmitOutcome::Invalid => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(SubmitOutcome::Results), 0);
        assert_eq!(exit_status(SubmitOutcome::Error), 1);
        assert_eq!(exit_status(SubmitOutcome::Invalid), 2);
    }

    #[tokio::test]
    async fn test_no_path_is_no_selection() {
        assert!(read_selection(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreadable_path_is_error() {
        let err = read_selection(Some(Path::new("/no/such/contract.pdf")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("contract.pdf"));
    }

    #[tokio::test]
    async fn test_selection_uses_file_name() {
        let path = std::env::temp_dir().join(format!("clausescan-{}.pdf", std::process::id()));
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let request = read_selection(Some(path.as_path())).await.unwrap().unwrap();
        assert_eq!(request.filename, path.file_name().unwrap().to_string_lossy());
        assert_eq!(request.body, b"%PDF-1.4");

        std::fs::remove_file(&path).unwrap();
    }
}
