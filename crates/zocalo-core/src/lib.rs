pub mod config;
pub mod icon;
pub mod layout;
pub mod lifecycle;
pub mod log;
pub mod mirror;
pub mod notice;
pub mod rect;
pub mod tracker;
pub mod window;

pub use lifecycle::{ShellPhase, Teardown};
pub use mirror::{TaskMirror, VisualEntry};
pub use notice::WindowNotice;
pub use rect::Rect;
pub use tracker::ActiveWindowTracker;
pub use window::{ShellResult, WindowInfo};
