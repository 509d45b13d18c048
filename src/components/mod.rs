//! UI Components
//!
//! Leptos components for the page's three independent widgets.

mod blog_card;
mod blog_controls;
mod blog_list;
mod drop_board;
mod nav_bar;

pub use blog_card::BlogCard;
pub use blog_controls::BlogControls;
pub use blog_list::BlogList;
pub use drop_board::DropBoard;
pub use nav_bar::NavBar;
