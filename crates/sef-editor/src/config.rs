//! Editor configuration.
//!
//! Plain data with sensible defaults; hosts may deserialize it from their
//! own settings file.

use sef_core::{Color, FILE_EXTENSION};
use serde::{Deserialize, Serialize};

/// Paint applied to newly drawn figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub fill: Color,
    pub stroke: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            fill: Color::DEFAULT_FILL,
            stroke: Color::DEFAULT_STROKE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Initial palette for new figures.
    pub palette: Palette,

    /// Extension appended by "save as" when missing. Default: `sef`.
    pub file_extension: String,

    /// A click this close to a polygon's first vertex closes it.
    pub polygon_close_distance: f64,

    /// Asked before "new" and "open" discard the current drawing.
    pub abandon_prompt: String,
    /// Asked before quitting.
    pub quit_prompt: String,
    pub save_error: String,
    pub open_error: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            file_extension: FILE_EXTENSION.to_string(),
            polygon_close_distance: 6.0,
            abandon_prompt: "Abandon the current job?".to_string(),
            quit_prompt: "Quit and abandon this drawing?".to_string(),
            save_error: "Unable to save the drawing in the chosen file".to_string(),
            open_error: "Impossible to open the file".to_string(),
        }
    }
}
