//! Display formatting for terminal output
//!
//! Tables are rendered with `tabled`; amounts are printed with the currency
//! symbol from the user's settings.

pub mod analysis;
pub mod budget;
pub mod category;
pub mod goal;
pub mod report;
pub mod transaction;

pub use analysis::{format_comparison_table, format_recommendations, format_recurring, format_summary};
pub use budget::format_budget_table;
pub use category::format_category_table;
pub use goal::{format_goal_details, format_goal_table, goal_status};
pub use report::{format_bar, format_header, format_percentage, separator, truncate};
pub use transaction::{format_transaction_details, format_transaction_table};
