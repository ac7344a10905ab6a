//! Concrete controls
//!
//! Each widget implements [`Control`](crate::control::Control) directly;
//! composites (the scrollbar, the list box) own their parts by value.

pub mod button;
pub mod list_box;
pub(crate) mod paint;
pub mod radio_group;
pub mod scrollbar;
pub mod text;

pub use button::{ArrowDirection, Button, Glyph};
pub use list_box::ListBox;
pub use radio_group::RadioGroup;
pub use scrollbar::{Part, Scrollbar};
pub use text::{Font, StaticText};
