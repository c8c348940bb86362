use std::io;
use std::path::PathBuf;

use dt174b_protocol::EncodeError;
use dt174b_usb::DeviceError;
use thiserror::Error;

/// Errors loading a YAML config or settings profile.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Everything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write output")]
    Output(#[from] io::Error),
}

impl CliError {
    pub fn is_access_denied(&self) -> bool {
        matches!(self, CliError::Device(err) if err.is_access_denied())
    }

    /// Process exit code. Access problems exit with the OS error number.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Device(err) if err.is_access_denied() => err
                .os_code()
                .and_then(|code| u8::try_from(code).ok())
                .filter(|code| *code != 0)
                .unwrap_or(1),
            _ => 1,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = CliError::from(EncodeError::OutOfRange("sample_interval"));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("sample_interval"));

        let err = CliError::from(DeviceError::usb(
            "opening the device",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        ));
        assert!(err.is_access_denied());
        assert_eq!(err.exit_code(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_access_denied_exit_code_is_errno() {
        let err = CliError::from(DeviceError::usb(
            "opening the device",
            io::Error::from_raw_os_error(13),
        ));
        assert_eq!(err.exit_code(), 13);
    }
}
