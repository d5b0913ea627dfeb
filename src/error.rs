use std::path::PathBuf;
use thiserror::Error;

/// Exit status for any failure that keeps the tester from running.
pub const EXIT_FAILURE: u8 = 2;

/// Startup failures. None of them can be worked around, so the main loop
/// is never entered.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Opening {path} failed: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Loading font {path} failed: {source}")]
    FontParse {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },

    #[error("Window creation failed: {0}")]
    Window(#[source] minifb::Error),
}

impl InitError {
    pub fn exit_code(&self) -> u8 {
        EXIT_FAILURE
    }
}

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Presenting the frame failed: {0}")]
    Present(#[source] minifb::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Init(#[from] InitError),

    #[error(transparent)]
    Display(#[from] DisplayError),
}

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Init(e) => e.exit_code(),
            Error::Display(_) => EXIT_FAILURE,
        }
    }
}
