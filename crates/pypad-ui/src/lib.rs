mod app;
mod editor;
mod output;

pub use app::{App, StartupArgs};
pub use editor::{EditorTheme, EditorWidget};
pub use output::OutputPanel;
