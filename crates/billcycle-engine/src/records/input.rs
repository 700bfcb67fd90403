use std::fs;
use std::io::{IsTerminal, Read};

use crate::{EngineError, EngineResult};

#[derive(Debug, Clone)]
pub(crate) struct ResolvedSource {
    pub(crate) label: String,
    pub(crate) content: String,
}

/// Reads records from `path`, or from stdin when `path` is `-`.
pub(crate) fn resolve_source(
    path: &str,
    stdin_override: Option<String>,
) -> EngineResult<ResolvedSource> {
    if path == "-" {
        let body = read_stdin(stdin_override)?;
        return match body {
            Some(content) => Ok(ResolvedSource {
                label: "stdin".to_string(),
                content,
            }),
            None => Err(EngineError::invalid_argument_with_recovery(
                "Path `-` means stdin input, but stdin was empty.",
                vec![
                    "Pipe a JSON array or CSV into the command.".to_string(),
                    "Or pass a file path instead of `-`.".to_string(),
                ],
            )),
        };
    }

    let content = fs::read_to_string(path).map_err(|error| {
        EngineError::invalid_argument_with_recovery(
            &format!("Could not read records file `{path}`: {error}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Pass `-` to read records from stdin.".to_string(),
            ],
        )
    })?;

    Ok(ResolvedSource {
        label: path.to_string(),
        content,
    })
}

fn read_stdin(stdin_override: Option<String>) -> EngineResult<Option<String>> {
    if let Some(value) = stdin_override {
        return Ok(non_blank(value));
    }

    if std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|error| {
            EngineError::invalid_argument_with_recovery(
                &format!("Could not read stdin: {error}"),
                vec!["Retry with an explicit file path argument.".to_string()],
            )
        })?;

    Ok(non_blank(buffer))
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::resolve_source;

    #[test]
    fn dash_reads_stdin_override() {
        let source = resolve_source("-", Some("amount,reference_month\n".to_string()));
        assert!(source.is_ok());
        if let Ok(value) = source {
            assert_eq!(value.label, "stdin");
        }
    }

    #[test]
    fn blank_stdin_is_rejected() {
        let source = resolve_source("-", Some("   \n".to_string()));
        assert!(source.is_err());
    }

    #[test]
    fn missing_file_is_a_user_error() {
        let temp = tempfile::tempdir();
        assert!(temp.is_ok());
        if let Ok(dir) = temp {
            let missing = dir.path().join("missing.json");
            let source = resolve_source(&missing.display().to_string(), None);
            assert!(source.is_err());
            if let Err(error) = source {
                assert_eq!(error.code, "invalid_argument");
            }

            let present = dir.path().join("rows.csv");
            assert!(fs::write(&present, "amount,reference_month\n1.00,2026-01\n").is_ok());
            let source = resolve_source(&present.display().to_string(), None);
            assert!(source.is_ok());
        }
    }
}
