//! Terminal rendering of the page model for `lapbytes browse` and `fetch`.

use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use yansi::Paint;

use crate::catalog::{CatalogBrowser, GridNode, Page};
use crate::models::{CardView, Product};
use crate::util::format_quantity;

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

pub fn cards_table<'a>(cards: impl IntoIterator<Item = &'a CardView>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Brand", "Price", "CPU", "RAM", "Storage", "Stock"]);
    for card in cards {
        table.add_row(vec![
            card.id_attr.clone(),
            card.name.clone(),
            card.brand.clone(),
            card.price.clone(),
            card.cpu.clone(),
            card.ram.clone(),
            card.storage.clone(),
            card.stock_label().to_string(),
        ]);
    }
    table
}

/// Grid as a table, plus any placeholder or error text in its place.
pub fn print_grid(page: &Page) {
    if page.grid.nodes().is_empty() {
        println!("(grid is empty)");
        return;
    }
    if page.grid.card_count() > 0 {
        println!("\n{}\n", cards_table(page.grid.cards().map(|c| &c.view)));
    }
    for node in page.grid.nodes() {
        match node {
            GridNode::NoProducts(_) => {
                println!("{}", Paint::new("No laptops found. Check back later for new arrivals!").yellow());
            }
            GridNode::Error(_) => {
                println!(
                    "{} {}",
                    Paint::new(crate::api::LOAD_FAILED_MESSAGE).red(),
                    Paint::new("(type `retry`)").dim()
                );
            }
            GridNode::Card(_) => {}
        }
    }
}

/// One status line: cards shown, page, cart badge, load-more control.
pub fn status_line(browser: &CatalogBrowser) -> String {
    let page = browser.page();
    let state = browser.state();
    let control = match &page.load_more {
        Some(c) if !c.is_visible() => "hidden".to_string(),
        Some(c) if c.is_disabled() => c.label().to_string(),
        Some(c) => format!("[{}]", c.label()),
        None => "absent".to_string(),
    };
    let cart = page
        .cart_count()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} cards | page {} | cart {} | load more: {}",
        page.grid.card_count(),
        state.current_page(),
        cart,
        control
    )
}

fn opt_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn yes_no(value: Option<bool>) -> String {
    if value.unwrap_or(false) { "yes" } else { "no" }.to_string()
}

pub fn product_detail_table(product: &Product) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    let os = format!(
        "{} {}",
        opt_text(&product.operating_system),
        opt_text(&product.operating_system_version)
    );
    let rows: Vec<(&str, String)> = vec![
        ("Name", product.display_name().to_string()),
        ("Brand", product.display_brand().to_string()),
        ("Price", product.price_label()),
        ("In stock", yes_no(product.is_in_stock)),
        ("Operating system", os.trim().to_string()),
        ("CPU", product.cpu_label()),
        ("CPU model", opt_text(&product.cpu_model)),
        ("RAM", product.ram_label()),
        ("Storage", product.storage_label()),
        (
            "Screen",
            product
                .screen_size
                .map(|s| format!("{}\"", format_quantity(s)))
                .unwrap_or_default(),
        ),
        ("Year", opt_text(&product.year_of_manufacture)),
        ("Dedicated GPU", yes_no(product.has_gpu)),
        (
            "GPU",
            format!("{} {}", opt_text(&product.gpu_manufacturer), opt_text(&product.gpu_model))
                .trim()
                .to_string(),
        ),
        ("Integrated GPU", yes_no(product.has_integrated_gpu)),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    table
}
