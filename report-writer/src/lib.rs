pub mod annotate;
pub mod digest;
pub mod render;
pub mod text;

pub use annotate::{Annotator, HeuristicAnnotator};
pub use digest::DigestWriter;
pub use render::render_entry;
