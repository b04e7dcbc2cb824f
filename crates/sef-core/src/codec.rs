//! Drawing file codec (`.sef`).
//!
//! A file is a MessagePack map with named fields:
//!
//! ```text
//! { version: 1, figures: [ { shape: { circle: { center, radius } }, fill, stroke }, … ] }
//! ```
//!
//! Figures are stored front to back. The key inside `shape` is the type
//! discriminator (`circle`, `triangle`, `rectangle`, `polygon`). Figure ids
//! and the selected/transparent flags are session state and never written;
//! decoding gives every figure a fresh id and clears both flags.
//!
//! Decoding is all-or-nothing: a bad version, an unknown discriminator, or a
//! single invalid record rejects the whole file.

use crate::figure::Figure;
use crate::model::Drawing;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

/// Version written into every file and the only one accepted on load.
pub const FORMAT_VERSION: u32 = 1;

/// File extension for drawings, without the dot.
pub const FILE_EXTENSION: &str = "sef";

#[derive(Serialize)]
struct FileOut<'a> {
    version: u32,
    figures: Cow<'a, [Figure]>,
}

#[derive(Deserialize)]
struct FileIn {
    version: u32,
    figures: Vec<Figure>,
}

/// The two failure categories callers surface to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file could not be opened, read, or written.
    IoFailure,
    /// The drawing does not map to or from a valid file.
    FormatIncompatible,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("drawing could not be encoded: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("incompatible drawing data: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("unsupported drawing format version {found}")]
    UnsupportedVersion { found: u32 },

    #[error("figure {index} is invalid: {reason}")]
    InvalidFigure { index: usize, reason: String },
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Io(_) => ErrorKind::IoFailure,
            CodecError::Encode(_)
            | CodecError::Decode(_)
            | CodecError::UnsupportedVersion { .. }
            | CodecError::InvalidFigure { .. } => ErrorKind::FormatIncompatible,
        }
    }
}

/// Serialize a drawing to bytes.
pub fn encode(drawing: &Drawing) -> Result<Vec<u8>, CodecError> {
    let file = FileOut {
        version: FORMAT_VERSION,
        figures: Cow::Borrowed(drawing.figures()),
    };
    Ok(rmp_serde::to_vec_named(&file)?)
}

/// Deserialize a complete drawing from bytes.
pub fn decode(bytes: &[u8]) -> Result<Drawing, CodecError> {
    let file: FileIn = rmp_serde::from_slice(bytes)?;
    if file.version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found: file.version,
        });
    }
    for (index, figure) in file.figures.iter().enumerate() {
        figure
            .shape
            .validate()
            .map_err(|reason| CodecError::InvalidFigure { index, reason })?;
    }
    log::debug!("decoded drawing with {} figures", file.figures.len());
    Ok(Drawing::from_figures(file.figures))
}

/// Encode fully, then write in one call.
pub fn write_drawing<W: Write>(drawing: &Drawing, mut writer: W) -> Result<(), CodecError> {
    let bytes = encode(drawing)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read the whole source, then decode.
pub fn read_drawing<R: Read>(mut reader: R) -> Result<Drawing, CodecError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(&bytes)
}

pub fn save_to_path(drawing: &Drawing, path: &Path) -> Result<(), CodecError> {
    let bytes = encode(drawing)?;
    fs::write(path, bytes)?;
    log::debug!("saved {} figures to {}", drawing.len(), path.display());
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Drawing, CodecError> {
    let bytes = fs::read(path)?;
    let drawing = decode(&bytes)?;
    log::debug!("loaded {} figures from {}", drawing.len(), path.display());
    Ok(drawing)
}
