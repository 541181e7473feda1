pub mod models;
pub mod tabs;
pub mod diff;
pub mod export;

pub use models::*;
pub use tabs::*;
pub use diff::*;
pub use export::*;
