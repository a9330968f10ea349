//! Command-line client for the food catalog

use std::env;

use anyhow::bail;
use food_catalog::{
    client::{
        catalog::{Catalog, ViewMode},
        form::Field,
        notice::NoticeLevel,
        Dashboard, HttpFoodsClient,
    },
    FoodId,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    let base_url = env::var("FOOD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let mut dashboard = Dashboard::new(HttpFoodsClient::new(base_url));

    let ok = match (command.as_str(), &args[1..]) {
        ("list", rest) => {
            let grid = rest.iter().any(|a| a == "--grid");
            let term: Vec<&str> = rest
                .iter()
                .filter(|a| *a != "--grid")
                .map(String::as_str)
                .collect();
            let loaded = dashboard.load().await;
            if loaded {
                dashboard.catalog.set_search(term.join(" "));
                if grid {
                    dashboard.catalog.set_view_mode(ViewMode::Grid);
                }
                print_foods(&dashboard.catalog);
            }
            loaded
        }
        ("add", [name, price, category, description]) => {
            fill_form(&mut dashboard, name, price, category, description)?;
            dashboard.submit().await?
        }
        ("edit", [id, name, price, category, description]) => {
            let id: FoodId = id.parse()?;
            dashboard.load().await;
            if !dashboard.edit(id)? {
                bail!("no food with id {}", id);
            }
            fill_form(&mut dashboard, name, price, category, description)?;
            dashboard.submit().await?
        }
        ("delete", [id]) => {
            let id: FoodId = id.parse()?;
            dashboard.delete(id).await
        }
        _ => {
            print_usage();
            return Ok(());
        }
    };

    for notice in dashboard.notices.all() {
        match notice.level {
            NoticeLevel::Success => println!("✅ {}", notice.text),
            NoticeLevel::Error => eprintln!("❌ {}", notice.text),
        }
    }

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn fill_form(
    dashboard: &mut Dashboard<HttpFoodsClient>,
    name: &str,
    price: &str,
    category: &str,
    description: &str,
) -> anyhow::Result<()> {
    let form = &mut dashboard.form;
    form.set(Field::Name, name)?;
    form.set(Field::Price, price)?;
    form.set(Field::Category, category)?;
    form.set(Field::Description, description)?;
    Ok(())
}

fn print_foods(catalog: &Catalog) {
    let foods = catalog.filtered();
    if foods.is_empty() {
        if catalog.search().is_empty() {
            println!("No foods found");
        } else {
            println!("No foods match \"{}\"", catalog.search());
        }
        return;
    }
    match catalog.view_mode() {
        ViewMode::List => {
            for food in &foods {
                println!(
                    "{}  {:<20} ${:>8.2}  {:<12} {}",
                    food.id, food.name, food.price, food.category, food.description
                );
            }
        }
        ViewMode::Grid => {
            for row in foods.chunks(3) {
                let cells: Vec<String> = row
                    .iter()
                    .map(|food| format!("{:<20} ${:>7.2}", food.name, food.price))
                    .collect();
                println!("{}", cells.join(" | "));
            }
        }
    }
}

fn print_usage() {
    println!("Usage: food-cli <command>");
    println!();
    println!("Commands:");
    println!("  list [search...] [--grid]                         - list foods, optionally filtered");
    println!("  add <name> <price> <category> <description>      - add a food");
    println!("  edit <id> <name> <price> <category> <description> - replace a food's fields");
    println!("  delete <id>                                       - delete a food");
    println!();
    println!("FOOD_API_URL selects the server (default {}).", DEFAULT_API_URL);
}
