//! Category CLI commands

use clap::Subcommand;

use crate::display::category::format_category_table;
use crate::error::MoneyMapResult;
use crate::services::CategoryService;
use crate::state::AppState;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Display colour (#RRGGBB)
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Delete a category
    Delete {
        /// Category name or ID
        category: String,
        /// Delete even if budget lines or goals still use it
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a category command
pub fn handle_category_command(state: &AppState, cmd: CategoryCommands) -> MoneyMapResult<()> {
    let service = CategoryService::new(&state.storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            if categories.is_empty() {
                println!("No categories. Run 'moneymap init' to create the defaults.");
            } else {
                println!("{}", format_category_table(&categories));
            }
        }

        CategoryCommands::Add { name, color } => {
            let category = service.create(&name, color.as_deref())?;
            println!("Created category: {} ({})", category.name, category.color);
        }

        CategoryCommands::Delete { category, force } => {
            let category = service.find(&category)?;
            let deleted = service.delete(category.id, force)?;
            println!("Deleted category: {}", deleted.name);
        }
    }

    Ok(())
}
