//! Key normalization for header and product-name matching.
//!
//! Destination sheets are maintained by hand, so the same column or product
//! shows up as "PRODUCTO GENÉRICO", "producto generico", or "Producto
//! Generico " depending on who last touched the workbook. Every lookup in
//! this crate goes through [`normalize_key`] so those spellings collide.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize a header or product name into a lookup key.
///
/// Trims, strips diacritics (NFD decomposition, combining marks dropped),
/// upper-cases, and collapses interior whitespace runs to single spaces.
///
/// # Examples
///
/// ```
/// use stocktake::normalize::normalize_key;
///
/// assert_eq!(normalize_key(" café  "), "CAFE");
/// assert_eq!(normalize_key("Sub  Familia"), "SUB FAMILIA");
/// ```
pub fn normalize_key(raw: &str) -> String {
    let folded: String = raw.nfd().filter(|c| !is_combining_mark(*c)).collect();
    folded
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
