//! # Attribute System
//!
//! Ad-group attributes are schema-less key/value pairs. This module holds the two
//! pieces that help users fill them in consistently:
//!
//! - **Templates** ([`TemplateMap`]): values the user saved for reuse, per key.
//! - **Presets** ([`presets`]): built-in keys every new group starts with, and built-in
//!   suggested values for them.
//!
//! Neither affects export. Columns come from the keys present in the data, see
//! [`crate::projection`].
//!
//! | Piece | Grows by | Shrinks by |
//! |-------|----------|------------|
//! | Template keys | `add_key`, `add_value` | `remove_key` |
//! | Template values | `add_value` | `remove_value`, `remove_key` |
//! | Presets | never (compiled in) | never |

pub mod presets;
mod templates;

pub use presets::{adjust_count, preset_options, suggestions, uses_dropdown};
pub use templates::TemplateMap;
