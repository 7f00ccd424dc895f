mod input;
mod theme;
mod widget;

pub use theme::EditorTheme;
pub use widget::EditorWidget;
