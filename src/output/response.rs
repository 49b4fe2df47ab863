//! CLI response formatting and output.
//!
//! Provides JSON envelope, printing, and exit code mapping.

use happyman_deploy::{Error, ErrorCode, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CliError>,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl<T: Serialize> CliResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::internal_json(e.to_string(), Some("serialize response".to_string()))
        })
    }
}

impl CliResponse<()> {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
            }),
        }
    }
}

fn print_response<T: Serialize>(response: &CliResponse<T>) -> Result<()> {
    use std::io::{self, Write};

    let payload = response.to_json()?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", payload) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(()); // Exit gracefully on SIGPIPE
        }
        return Err(Error::internal_io(
            e.to_string(),
            Some("write stdout".to_string()),
        ));
    }
    Ok(())
}

pub fn print_success<T: Serialize>(data: T) -> Result<()> {
    print_response(&CliResponse::success(data))
}

pub fn print_result<T: Serialize>(result: Result<T>) -> Result<()> {
    match result {
        Ok(data) => print_success(data),
        Err(err) => print_response(&CliResponse::<()>::from_error(&err)),
    }
}

pub fn map_cmd_result_to_json<T: Serialize>(
    result: Result<(T, i32)>,
) -> (Result<serde_json::Value>, i32) {
    match result {
        Ok((data, exit_code)) => match serde_json::to_value(data) {
            Ok(value) => (Ok(value), exit_code),
            Err(err) => (
                Err(Error::internal_json(
                    err.to_string(),
                    Some("serialize response".to_string()),
                )),
                1,
            ),
        },
        Err(err) => {
            let exit_code = exit_code_for_error(err.code);
            (Err(err), exit_code)
        }
    }
}

fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ValidationInvalidArgument => 2,

        ErrorCode::RemoteCommandFailed => 20,

        ErrorCode::InternalIoError | ErrorCode::InternalJsonError => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use happyman_deploy::error::{RemoteCommandFailedDetails, TargetDetails};

    fn remote_failure(exit_code: i32) -> Error {
        Error::remote_command_failed(RemoteCommandFailedDetails {
            command: "cd happyman && git pull".to_string(),
            exit_code,
            stderr: "fatal: not a git repository".to_string(),
            target: TargetDetails {
                host: "shaperia@happyman.skyshaper.org".to_string(),
                operation: "deploy".to_string(),
            },
        })
    }

    #[test]
    fn remote_command_failed_serializes_details() {
        let json = CliResponse::<()>::from_error(&remote_failure(128))
            .to_json()
            .unwrap();

        assert!(json.contains("\"success\": false"));
        assert!(json.contains("\"code\": \"remote.command_failed\""));
        assert!(json.contains("fatal: not a git repository"));
        assert!(json.contains("\"exitCode\": 128"));
        assert!(!json.contains("\"data\""));
        assert!(!json.contains("hints"));
        assert!(!json.contains("retryable"));
    }

    #[test]
    fn remote_command_failed_maps_to_exit_code_20() {
        let (value, exit_code) =
            map_cmd_result_to_json::<serde_json::Value>(Err(remote_failure(1)));

        assert!(value.is_err());
        assert_eq!(exit_code, 20);
    }

    #[test]
    fn validation_errors_map_to_exit_code_2() {
        let err = Error::validation_invalid_argument("output_mode", "not supported");
        let (_value, exit_code) = map_cmd_result_to_json::<serde_json::Value>(Err(err));

        assert_eq!(exit_code, 2);
    }

    #[test]
    fn success_keeps_exit_code() {
        let (value, exit_code) = map_cmd_result_to_json(Ok((serde_json::json!({"ok": 1}), 0)));

        assert_eq!(value.unwrap()["ok"], 1);
        assert_eq!(exit_code, 0);
    }
}
