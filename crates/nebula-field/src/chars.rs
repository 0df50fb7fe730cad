//! Glyph ramp for the point field, sparsest first.

/// Characters used for increasing point density in a cell.
pub const FIELD_CHARS: &[char] = &['·', '•', '*', '✦'];
