use clap::{Parser, Subcommand};
use shoplist::list::{format_price, total_summary};
use shoplist::model::parse_price;
use shoplist::{session, ItemId};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Unbought items matching a search term
    Browse {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// All items grouped by category, with the remaining total
    List,
    Add {
        name: String,
        price: String,
        #[arg(short, long, default_value = "")]
        category: String,
    },
    Edit {
        id: String,
        name: String,
        price: String,
        #[arg(short, long, default_value = "")]
        category: String,
    },
    Toggle { id: String },
    Remove { id: String },
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let data_dir = session::resolve_data_dir(cli.data_dir);
    let mut list = session::open(&data_dir).await?;

    match cli.command {
        Commands::Browse { search } => {
            for item in list.search_unbought(&search) {
                println!("{}", item.category());
                println!("  {}  {}", item.name(), format_price(item.price()));
            }
        }
        Commands::List => {
            for group in list.categories() {
                println!("{}", group.category);
                for item in group.items {
                    let mark = if item.bought() { "✔" } else { " " };
                    println!("  [{}] {}  {}  ({})", mark, item.name(), format_price(item.price()), item.id());
                }
            }
            println!("{}", total_summary(list.total_remaining()));
        }
        Commands::Add { name, price, category } => {
            let id = list.add(&name, parse_price(&price)?, &category)?;
            println!("{}", id);
        }
        Commands::Edit { id, name, price, category } => {
            list.edit(&ItemId::from(id), &name, parse_price(&price)?, &category)?;
            println!("OK");
        }
        Commands::Toggle { id } => {
            let bought = list.toggle_bought(&ItemId::from(id))?;
            println!("{}", if bought { "bought" } else { "not bought" });
        }
        Commands::Remove { id } => {
            list.delete(&ItemId::from(id))?;
            println!("OK");
        }
        Commands::Clear => {
            list.clear();
            println!("OK");
        }
    }

    list.flush().await;
    Ok(())
}
