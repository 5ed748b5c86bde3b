pub mod finder_view;
pub mod result_card;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use finder_view::{FinderView, FinderViewProps, PLACEHOLDER, TITLE};
pub use result_card::{badge_color, format_name, ResultCard, ResultCardProps};
