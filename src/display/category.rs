//! Category table

use tabled::{settings::Style, Table, Tabled};

use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn format_category_table(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories. Run `moneymap init` to create the defaults.".to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        name: c.name.clone(),
        color: c.color.clone(),
        id: c.id.to_string(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}
