//! Editing session: one drawing, its file, and the menu commands.
//!
//! The session wires the tool controller and keyboard shortcuts to the
//! selection engine and handles new / open / save / save-as / quit.
//! Confirmations and error messages go through the host's `Dialogs`.

use crate::config::{EditorConfig, Palette};
use crate::input::InputEvent;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{Mode, ToolController};
use sef_core::{SelectionEngine, codec};
use std::path::{Path, PathBuf};

/// Modal prompts shown by the host window.
pub trait Dialogs {
    /// Ask a yes/no question. `true` means proceed.
    fn confirm(&mut self, message: &str) -> bool;
    fn error(&mut self, message: &str);
}

/// Result of a plain "save".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// No file is associated yet; the host should ask for one and call
    /// `save_as`.
    NeedsPath,
    Failed,
}

pub struct Session {
    engine: SelectionEngine,
    dialogs: Box<dyn Dialogs>,
    config: EditorConfig,
    palette: Palette,
    opened_file: Option<PathBuf>,
    tools: ToolController,
}

impl Session {
    pub fn new(config: EditorConfig, dialogs: Box<dyn Dialogs>) -> Self {
        Self {
            engine: SelectionEngine::new(),
            dialogs,
            palette: config.palette,
            tools: ToolController::new(config.polygon_close_distance),
            config,
            opened_file: None,
        }
    }

    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    /// Mutable access, e.g. to attach the canvas and selection panel.
    pub fn engine_mut(&mut self) -> &mut SelectionEngine {
        &mut self.engine
    }

    pub fn tools(&self) -> &ToolController {
        &self.tools
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn mode(&self) -> Mode {
        self.tools.mode()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.tools.set_mode(mode, &mut self.engine);
    }

    /// File the drawing was last opened from or saved to.
    pub fn opened_file(&self) -> Option<&Path> {
        self.opened_file.as_deref()
    }

    // ─── File commands ───────────────────────────────────────────────────

    /// Start an empty drawing after confirmation. Returns `false` if the
    /// user declined.
    pub fn new_drawing(&mut self) -> bool {
        if !self.dialogs.confirm(&self.config.abandon_prompt) {
            return false;
        }
        self.tools.cancel(&mut self.engine);
        self.engine.clear();
        self.opened_file = None;
        log::info!("new drawing");
        true
    }

    /// Replace the drawing with the contents of `path` after confirmation.
    ///
    /// On failure the error dialog is shown, the current drawing is kept,
    /// and the session forgets its file.
    pub fn open(&mut self, path: &Path) -> bool {
        if !self.dialogs.confirm(&self.config.abandon_prompt) {
            return false;
        }
        match codec::load_from_path(path) {
            Ok(drawing) => {
                self.tools.cancel(&mut self.engine);
                self.engine.replace_drawing(drawing);
                self.opened_file = Some(path.to_path_buf());
                log::info!("opened {}", path.display());
                true
            }
            Err(e) => {
                log::warn!("open {} failed ({:?}): {e}", path.display(), e.kind());
                self.dialogs.error(&self.config.open_error);
                self.opened_file = None;
                false
            }
        }
    }

    /// Save to the current file, if there is one.
    pub fn save(&mut self) -> SaveOutcome {
        match self.opened_file.clone() {
            Some(path) => {
                if self.write_to(&path) {
                    SaveOutcome::Saved(path)
                } else {
                    SaveOutcome::Failed
                }
            }
            None => SaveOutcome::NeedsPath,
        }
    }

    /// Save to `path`, appending the drawing extension when it is missing.
    /// The path becomes the session's file on success.
    pub fn save_as(&mut self, path: &Path) -> bool {
        let path = self.with_extension(path);
        if self.write_to(&path) {
            self.opened_file = Some(path);
            true
        } else {
            false
        }
    }

    /// Ask before quitting. Returns `true` if the host should exit.
    pub fn request_quit(&mut self) -> bool {
        self.dialogs.confirm(&self.config.quit_prompt)
    }

    fn with_extension(&self, path: &Path) -> PathBuf {
        let ext = self.config.file_extension.as_str();
        if ext.is_empty() || path.extension().is_some_and(|e| e == ext) {
            return path.to_path_buf();
        }
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(ext);
        PathBuf::from(name)
    }

    fn write_to(&mut self, path: &Path) -> bool {
        match codec::save_to_path(self.engine.drawing(), path) {
            Ok(()) => {
                log::info!("saved {}", path.display());
                true
            }
            Err(e) => {
                log::warn!("save {} failed ({:?}): {e}", path.display(), e.kind());
                self.dialogs.error(&self.config.save_error);
                self.opened_file = None;
                false
            }
        }
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route one input event.
    ///
    /// The active tool sees the event first; unconsumed key events are
    /// resolved as shortcuts. Actions that need a file chooser (`Open`,
    /// `SaveAs`) are returned to the host, as is `Save` when no file is
    /// associated yet (returned as `SaveAs`).
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<ShortcutAction> {
        if self.tools.handle(event, &mut self.engine, &self.palette) {
            return None;
        }
        let InputEvent::Key { key, .. } = event else {
            return None;
        };
        let action = ShortcutMap::resolve(key, event.modifiers())?;
        log::debug!("shortcut {key} -> {action:?}");
        self.dispatch(action)
    }

    /// Perform a shortcut or menu action. Returns the action back when the
    /// host has to finish it.
    pub fn dispatch(&mut self, action: ShortcutAction) -> Option<ShortcutAction> {
        match action {
            ShortcutAction::SetMode(mode) => self.set_mode(mode),
            ShortcutAction::Delete => {
                self.engine.remove_selected();
            }
            ShortcutAction::SelectAll => self.engine.select_all(),
            ShortcutAction::Deselect => self.engine.unselect_all(),
            ShortcutAction::New => {
                self.new_drawing();
            }
            ShortcutAction::Save => {
                if self.save() == SaveOutcome::NeedsPath {
                    return Some(ShortcutAction::SaveAs);
                }
            }
            ShortcutAction::Open | ShortcutAction::SaveAs => return Some(action),
        }
        None
    }
}
