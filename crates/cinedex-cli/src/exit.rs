//! Process exit codes.
//!
//! - 0: success
//! - 1: failure (storage, config, io)
//! - 2: rejected request (invalid filter or identifier)
//! - 3: entity not found

use std::process::ExitCode;

use cinedex_core::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    Success = 0,
    Failure = 1,
    InvalidInput = 2,
    NotFound = 3,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<&CatalogError> for CliExitCode {
    fn from(err: &CatalogError) -> Self {
        match err {
            CatalogError::Filter(_) => CliExitCode::InvalidInput,
            CatalogError::NotFound { .. } => CliExitCode::NotFound,
            CatalogError::Integrity(_)
            | CatalogError::Storage(_)
            | CatalogError::Config(_)
            | CatalogError::Io(_)
            | CatalogError::Serialization(_) => CliExitCode::Failure,
        }
    }
}

impl From<&anyhow::Error> for CliExitCode {
    fn from(err: &anyhow::Error) -> Self {
        err.downcast_ref::<CatalogError>()
            .map_or(CliExitCode::Failure, CliExitCode::from)
    }
}
