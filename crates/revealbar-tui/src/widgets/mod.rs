mod content;
mod header;
mod popup;
mod status_bar;

pub use content::ContentWidget;
pub use header::HeaderWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
