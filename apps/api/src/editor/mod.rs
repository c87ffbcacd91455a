// Form layer: uniform add / update / remove over the resume aggregate's collections.
// Every operation is synchronous and applied to a single owned `ResumeData`.

pub mod collection;
pub mod command;
pub mod handlers;
pub mod ids;
pub mod presets;
pub mod sections;

pub use collection::{EditError, Notice};
pub use sections::ResumeEditor;
