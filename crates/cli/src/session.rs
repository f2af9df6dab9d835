//! The interactive command loop.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use stockroom_core::CatalogError;
use stockroom_inventory::{
    Catalog, Clothing, Electronics, Grocery, Item, ItemCore, ItemKind, LoadMode, parse_expiry_date,
};
use thiserror::Error;

use crate::config::Config;
use crate::menu::MenuChoice;
use crate::prompt::{PromptError, PromptResult, Prompter};

#[derive(Debug, Error)]
enum CommandError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

type CommandResult = Result<Flow, CommandError>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// One operator session over an explicitly owned catalog.
pub struct Session {
    catalog: Catalog,
    config: Config,
}

impl Session {
    pub fn new(catalog: Catalog, config: Config) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Run the menu loop until the operator exits or the input closes.
    ///
    /// Catalog errors are printed and the loop carries on; only failures to
    /// read or write the terminal end the session with an error.
    pub fn run<R: BufRead, W: Write>(&mut self, prompter: &mut Prompter<R, W>) -> io::Result<()> {
        loop {
            let outcome = self.step(prompter);
            let printed = match outcome {
                Ok(Flow::Continue) => Ok(()),
                Ok(Flow::Exit) => return Ok(()),
                Err(CommandError::Catalog(err)) => {
                    tracing::warn!(error = %err, "command failed");
                    prompter.say(format_args!("Error: {err}"))
                }
                Err(CommandError::Prompt(PromptError::Closed)) => {
                    tracing::debug!("input closed, ending session");
                    return Ok(());
                }
                Err(CommandError::Prompt(PromptError::Io(err))) => return Err(err),
            };
            match printed {
                Ok(()) | Err(PromptError::Closed) => {}
                Err(PromptError::Io(err)) => return Err(err),
            }
        }
    }

    fn step<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> CommandResult {
        p.say(format_args!("\n{}", MenuChoice::render().trim_end()))?;
        let raw = p.ask("Choose an option")?;
        let Ok(choice) = raw.parse::<MenuChoice>() else {
            p.say("Invalid choice.")?;
            return Ok(Flow::Continue);
        };
        tracing::debug!(?choice, "menu choice");

        match choice {
            MenuChoice::AddItem => self.add_item(p),
            MenuChoice::SellItem => self.sell_item(p),
            MenuChoice::RestockItem => self.restock_item(p),
            MenuChoice::SearchItems => self.search_items(p),
            MenuChoice::InventoryValue => self.inventory_value(p),
            MenuChoice::ListItems => self.list_items(p),
            MenuChoice::PruneExpired => self.prune_expired(p),
            MenuChoice::RemoveItem => self.remove_item(p),
            MenuChoice::SaveCatalog => self.save_catalog(p),
            MenuChoice::LoadCatalog => self.load_catalog(p),
            MenuChoice::Exit => {
                p.say("Goodbye!")?;
                Ok(Flow::Exit)
            }
        }
    }

    fn add_item<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> CommandResult {
        let raw_kind = p.ask("Type (Electronics/Grocery/Clothing)")?;
        let Some(kind) = ItemKind::from_name(&raw_kind) else {
            p.say("Invalid item type.")?;
            return Ok(Flow::Continue);
        };

        let id = p.ask("Item ID")?;
        let name = p.ask("Name")?;
        let price: f64 = p.ask_parsed("Price", "a number")?;
        let quantity: i64 = p.ask_parsed("Quantity", "a whole number")?;

        let item: Item = match kind {
            ItemKind::Electronics => {
                let brand = p.ask("Brand")?;
                let warranty: i64 = p.ask_parsed("Warranty (years)", "a whole number")?;
                let core = ItemCore::new(id, name, price, quantity)?;
                Electronics::new(core, warranty, brand)?.into()
            }
            ItemKind::Grocery => {
                let expiry = p.ask_with("Expiry date (YYYY-MM-DD)", "a date like 2024-12-31", |raw| {
                    parse_expiry_date(raw).ok()
                })?;
                let core = ItemCore::new(id, name, price, quantity)?;
                Grocery::new(core, expiry).into()
            }
            ItemKind::Clothing => {
                let size = p.ask("Size")?;
                let material = p.ask("Material")?;
                let core = ItemCore::new(id, name, price, quantity)?;
                Clothing::new(core, size, material).into()
            }
        };

        self.catalog.add_item(item)?;
        p.say("Item added.")?;
        Ok(Flow::Continue)
    }

    fn sell_item<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> CommandResult {
        let id = p.ask("Item ID")?;
        let quantity: i64 = p.ask_parsed("Quantity to sell", "a whole number")?;
        match self.catalog.sell(&id, quantity)? {
            Some(remaining) => p.say(format_args!("Sold {quantity} of {id}; {remaining} left."))?,
            None => p.say(format_args!("No item with id '{id}'."))?,
        }
        Ok(Flow::Continue)
    }

    fn restock_item<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> CommandResult {
        let id = p.ask("Item ID")?;
        let quantity: i64 = p.ask_parsed("Quantity to add", "a whole number")?;
        match self.catalog.restock(&id, quantity)? {
            Some(on_hand) => p.say(format_args!("Restocked {id}; {on_hand} on hand."))?,
            None => p.say(format_args!("No item with id '{id}'."))?,
        }
        Ok(Flow::Continue)
    }

    fn search_items<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> CommandResult {
        let query = p.ask("Name to search (or type:<Electronics|Grocery|Clothing>)")?;
        let results = match type_filter(&query) {
            Some(type_name) => self.catalog.search_by_type(type_name),
            None => self.catalog.search_by_name(&query),
        };
        print_items(p, &results, "No matching items.")?;
        Ok(Flow::Continue)
    }

    fn inventory_value<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> CommandResult {
        let total = self.catalog.total_inventory_value();
        p.say(format_args!("Total inventory value: ${total:.2}"))?;
        Ok(Flow::Continue)
    }

    fn list_items<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> CommandResult {
        print_items(p, &self.catalog.list_all(), "Catalog is empty.")?;
        Ok(Flow::Continue)
    }

    fn prune_expired<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> CommandResult {
        let removed = self.catalog.prune_expired();
        if removed.is_empty() {
            p.say("No expired groceries.")?;
        } else {
            let ids: Vec<&str> = removed.iter().map(|id| id.as_str()).collect();
            p.say(format_args!(
                "Removed {} expired groceries: {}",
                removed.len(),
                ids.join(", ")
            ))?;
        }
        Ok(Flow::Continue)
    }

    fn remove_item<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> CommandResult {
        let id = p.ask("Item ID")?;
        match self.catalog.remove_item(&id) {
            Some(item) => p.say(format_args!("Removed {item}"))?,
            None => p.say(format_args!("No item with id '{id}'."))?,
        }
        Ok(Flow::Continue)
    }

    fn save_catalog<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> CommandResult {
        let path = self.ask_path(p, "File to save")?;
        self.catalog.save(&path)?;
        p.say(format_args!("Catalog saved to {}.", path.display()))?;
        Ok(Flow::Continue)
    }

    fn load_catalog<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> CommandResult {
        let path = self.ask_path(p, "File to load")?;
        let mode = if p.confirm("Replace current items")? {
            LoadMode::Replace
        } else {
            LoadMode::Merge
        };
        let count = self.catalog.load(&path, mode)?;
        p.say(format_args!("Loaded {count} items from {}.", path.display()))?;
        Ok(Flow::Continue)
    }

    /// Ask for a path, offering the configured snapshot path as the default.
    fn ask_path<R: BufRead, W: Write>(
        &self,
        p: &mut Prompter<R, W>,
        label: &str,
    ) -> PromptResult<PathBuf> {
        let default = &self.config.snapshot_path;
        let answer = p.ask(&format!("{label} [{}]", default.display()))?;
        Ok(if answer.is_empty() {
            default.clone()
        } else {
            PathBuf::from(answer)
        })
    }
}

const TYPE_PREFIX: &str = "type:";

/// The type name in a `type:<Variant>` query, prefix matched ignoring case.
fn type_filter(query: &str) -> Option<&str> {
    let prefix = query.get(..TYPE_PREFIX.len())?;
    prefix
        .eq_ignore_ascii_case(TYPE_PREFIX)
        .then(|| &query[TYPE_PREFIX.len()..])
}

fn print_items<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    items: &[&Item],
    when_empty: &str,
) -> PromptResult<()> {
    if items.is_empty() {
        return p.say(when_empty);
    }
    for item in items {
        p.say(item)?;
    }
    Ok(())
}
