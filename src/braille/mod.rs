mod canvas;

pub use canvas::{bits_of, glyph, BrailleCanvas};
