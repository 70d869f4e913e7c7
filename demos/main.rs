//! Walks through the stores against a file-backed data directory.
//!
//! ```sh
//! cargo run --example pricebook -- [config.toml]
//! ```

use std::error::Error;

use pricebook::calculator::{self, NO_RESULT};
use pricebook::{logging, Config, NewDueBill, NewProduct, Pricebook, ProductPatch, Theme};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::from_file_or_default("pricebook.toml")?,
    };
    logging::init(&config.logging)?;

    let book = Pricebook::open(&config).await?;
    book.load(Some(Theme::Light)).await;
    let symbol = book.currency_symbol().to_string();

    let products = book.products();
    let rice = match products.products().into_iter().find(|p| p.name == "Rice") {
        Some(rice) => rice,
        None => products.add_product(NewProduct::new("Rice", 60.0)?).await?,
    };
    products
        .update_product(&rice.id, ProductPatch::default().price_per_kg(65.0))
        .await?;

    println!("Products:");
    for product in products.filtered_products() {
        println!("  {} {}{}/kg", product.name, symbol, product.price_per_kg);
    }

    let rate = products.product(&rice.id).map_or(rice.price_per_kg, |p| p.price_per_kg);
    let grams = calculator::weight_from_price_input("50", rate);
    let price = calculator::price_from_weight_input("750", rate);
    println!(
        "{}50 buys {}; 750gm costs {}",
        symbol,
        calculator::format_weight(grams).as_deref().unwrap_or(NO_RESULT),
        calculator::format_price(&symbol, price).as_deref().unwrap_or(NO_RESULT),
    );
    for row in calculator::quick_calculate(rate) {
        println!("  {:>6} {}{}", row.label, symbol, calculator::format_amount(row.price));
    }

    let bills = book.due_bills();
    if bills.due_bills().is_empty() {
        bills
            .add_due_bill(NewDueBill::new("Karim", "2kg rice, pays Friday")?)
            .await?;
    }
    println!("Due bills:");
    for bill in bills.due_bills() {
        println!("  {}: {}", bill.name, bill.note);
    }

    println!("Theme: {}", book.theme().theme());
    Ok(())
}
