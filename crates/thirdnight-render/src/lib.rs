//! # thirdnight-render
//!
//! Roster layout and rendering backends for thirdnight.
//!
//! This crate provides:
//! - `RosterLayoutEngine`: guest stays → two-block housekeeping [`Roster`]
//! - Excel roster output (the sheet handed to housekeeping)
//! - Fixed-width text output for terminal previews
//!
//! Layout is backend-independent: the engine produces an abstract roster of
//! styled cells and each [`Renderer`] turns it into bytes or text.
//!
//! ## Example
//!
//! ```rust,ignore
//! use thirdnight_core::{Renderer, RoomGrid};
//! use thirdnight_render::{layout_roster, ExcelRenderer, TextRenderer};
//!
//! let roster = layout_roster(&guests, &RoomGrid::default(), now, now.date());
//!
//! let xlsx_bytes = ExcelRenderer::new().render(&roster)?;
//! std::fs::write("In House Guest List 20240107.xlsx", xlsx_bytes)?;
//!
//! println!("{}", TextRenderer::new().render(&roster)?);
//! ```

pub mod excel;
pub mod layout;
pub mod text;

pub use excel::ExcelRenderer;
pub use layout::{column_index, layout_roster, room_row, Column, RosterLayoutEngine};
pub use text::TextRenderer;

#[doc(no_inline)]
pub use thirdnight_core::{Renderer, Roster};
