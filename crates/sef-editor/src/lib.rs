pub mod config;
pub mod input;
pub mod session;
pub mod shortcuts;
pub mod tools;

pub use config::{EditorConfig, Palette};
pub use input::{InputEvent, Modifiers};
pub use session::{Dialogs, SaveOutcome, Session};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use tools::{Mode, ToolController};
