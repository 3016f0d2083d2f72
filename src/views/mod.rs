//! Presentation helpers: everything a page needs computed before rendering.

pub mod navbar;
pub mod pills;
pub mod profile_item;
pub mod relative_time;
pub mod sorting;

pub use navbar::Navbar;
pub use pills::{CategoryPill, IconColor, PillColor, PillStyle, StatusPill};
pub use profile_item::ProfileProposalItem;
pub use sorting::SortingMenu;
