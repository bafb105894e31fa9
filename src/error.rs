// SPDX-License-Identifier: MIT

use std::io;

use n_input::ConfigError;

/// Errors that end an `n-keys` session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
