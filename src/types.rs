// src/types.rs

//! Run-wide policy types, fixed before the first token is read.

/// How the input stream is split into file-path tokens.
///
/// - `Line`: one path per `\n`-terminated record.
/// - `NullByte`: one path per NUL-terminated record; matched files are echoed
///   back as the raw record, NUL included.
/// - `Whitespace`: every `\n`-terminated record is split into fields on ASCII
///   whitespace, one path per field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DelimitationMode {
    #[default]
    Line,
    NullByte,
    Whitespace,
}

impl DelimitationMode {
    /// Byte that terminates one input record.
    pub fn record_delimiter(self) -> u8 {
        match self {
            DelimitationMode::NullByte => b'\0',
            DelimitationMode::Line | DelimitationMode::Whitespace => b'\n',
        }
    }
}

/// Which command outcome causes a token to be printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayPolicy {
    /// Print the token when the command's return code is 0.
    #[default]
    OnSuccess,
    /// Print the token when the command's return code is anything but 0
    /// (`-!` or a leading `!`).
    OnFailure,
}

impl DisplayPolicy {
    pub fn should_emit(self, return_code: i32) -> bool {
        match self {
            DisplayPolicy::OnSuccess => return_code == 0,
            DisplayPolicy::OnFailure => return_code != 0,
        }
    }
}

/// Where the command's standard error goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StderrPolicy {
    /// Share the controller's own stderr.
    #[default]
    Inherit,
    /// Send it to the discard sink along with stdout (`-s`).
    Discard,
}
