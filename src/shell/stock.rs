// 📦 Stock - products and their price history
//
// New product names and command words are lower-cased. Lookups ignore case,
// so a hand-edited "Apple" row is still the product "apple".

use super::{run_loop, CommandTable, Console, ShellError};
use crate::aggregate::mean_or_zero;
use crate::config::AppConfig;
use crate::entities::{Owner, Tags};
use crate::error::StoreError;
use crate::input::{parse_number, ValueRule};
use crate::store::{RecordStore, Selector};
use anyhow::Result;

fn product_named(store: &RecordStore, name: &str) -> Result<Owner, ShellError> {
    store
        .find_owner_by_name_ignore_case(name)
        .cloned()
        .ok_or_else(|| ShellError::NotFound(format!("Product '{}'", name)))
}

/// Average price of one product; 0 when it has no prices yet
pub fn average_price(store: &RecordStore, product_id: u32) -> f64 {
    mean_or_zero(
        store
            .measurements_for(Selector::Owner(product_id))
            .map(|price| price.value),
    )
}

fn add_product(store: &mut RecordStore, console: &mut Console<'_>) -> Result<(), ShellError> {
    let name = console.prompt("Product name: ")?.to_lowercase();
    if let Some(existing) = store.find_owner_by_name_ignore_case(&name) {
        return Err(StoreError::DuplicateName(existing.name.clone()).into());
    }
    let product = store.add_owner(&name)?;
    console.say(format!("Created product {}: {}", product.id, product.name))
}

fn add_price(store: &mut RecordStore, console: &mut Console<'_>) -> Result<(), ShellError> {
    let product = product_named(store, &console.prompt("Product name: ")?)?;
    let value = parse_number("price", &console.prompt("Price: ")?, ValueRule::NonNegative)?;
    store.add_measurement(product.id, value, Tags::none())?;
    Ok(())
}

fn view_products(store: &mut RecordStore, console: &mut Console<'_>) -> Result<(), ShellError> {
    let store: &RecordStore = store;
    console.say("Products:")?;
    console.blank()?;
    for product in store.owners() {
        console.say(format!("Name: {}", product.name))?;
        console.say(format!("Id: {}", product.id))?;

        let mut prices = store.measurements_for(Selector::Owner(product.id)).peekable();
        if prices.peek().is_some() {
            console.say("Prices:")?;
            for price in prices {
                console.say(format!(" - id: {}", price.id))?;
                console.say(format!(" - value: {}", price.value))?;
            }
        }
        console.blank()?;
    }
    Ok(())
}

fn show_average(store: &mut RecordStore, console: &mut Console<'_>) -> Result<(), ShellError> {
    let product = product_named(store, &console.prompt("Product name: ")?)?;
    let average = average_price(store, product.id);
    console.say(format!("Average price of {}: {:.2}", product.name, average))
}

pub fn commands() -> CommandTable<RecordStore> {
    CommandTable::new()
        .command("add product", add_product)
        .command("add price", add_price)
        .command("view products", view_products)
        .command("average price", show_average)
        .help("help")
        .quit("quit")
        .fold_case()
}

pub fn run(config: &AppConfig, console: &mut Console<'_>) -> Result<()> {
    let ledger = config.stock_ledger();
    let mut store = ledger.load()?;

    run_loop(&mut store, &commands(), console)?;

    ledger.save(&store)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::testing::scripted;
    use std::fs;

    #[test]
    fn test_average_price_zero_default() {
        let mut store = RecordStore::new();
        let product = store.add_owner("bread").unwrap();

        assert_eq!(average_price(&store, product.id), 0.0);

        store.add_measurement(product.id, 1.0, Tags::none()).unwrap();
        store.add_measurement(product.id, 2.0, Tags::none()).unwrap();
        assert_eq!(average_price(&store, product.id), 1.5);
    }

    #[test]
    fn test_stock_session() {
        let mut store = RecordStore::new();
        let input = "Add Product\nApple\nadd price\nAPPLE\n1.20\nadd price\napple\n-3\nadd price\napple\n0.80\naverage price\napple\nadd product\nmilk\naverage price\nmilk\nview products\n";

        let (result, output) = scripted(input, |console| run_loop(&mut store, &commands(), console));

        assert!(result.is_ok());
        assert!(output.contains("Created product 1: apple"));
        assert!(output.contains("price cannot take the value -3 (must be 0 or greater)"));
        assert!(output.contains("Average price of apple: 1.00"));
        assert!(output.contains("Average price of milk: 0.00"));
        assert!(output.contains("Name: milk\nId: 2\n\n"));
        assert_eq!(store.measurement_count(), 2);
    }

    #[test]
    fn test_unknown_product() {
        let mut store = RecordStore::new();
        let (_, output) = scripted("average price\npear\n", |console| {
            run_loop(&mut store, &commands(), console)
        });

        assert!(output.contains("Product 'pear' does not exist"));
    }

    #[test]
    fn test_run_saves_on_end_of_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };

        let (result, _) = scripted("add product\nrice\nadd price\nrice\n2\n", |console| {
            run(&config, console)
        });

        assert!(result.is_ok());
        assert_eq!(
            fs::read_to_string(dir.path().join("products.csv")).unwrap(),
            "id,name\n1,rice\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("prices.csv")).unwrap(),
            "id,product_id,value\n1,1,2\n"
        );
    }

    #[test]
    fn test_mixed_case_names_from_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("products.csv"), "id,name\n1,Apple\n").unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let input = "add price\napple\n2\nadd product\napple\naverage price\nAPPLE\n";

        let (result, output) = scripted(input, |console| run(&config, console));

        assert!(result.is_ok());
        assert!(output.contains("'Apple' already exists"));
        assert!(output.contains("Average price of Apple: 2.00"));
        assert_eq!(
            fs::read_to_string(dir.path().join("products.csv")).unwrap(),
            "id,name\n1,Apple\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("prices.csv")).unwrap(),
            "id,product_id,value\n1,1,2\n"
        );
    }
}
