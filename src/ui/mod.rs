//! Terminal rendering layer.
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready snapshot of the state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Header, table, search box, footer and tracker popup
//! - [`helpers`]: Cursor positioning, highlighting and measuring
//! - [`theme`]: Color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    BranchBarInfo, ColumnInfo, DisplayRow, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo,
    TrackerBody, TrackerPopupInfo, UIViewModel,
};
