mod auto_tag;
mod notes;

pub use auto_tag::AutoTagTool;
pub use notes::NotesTool;
