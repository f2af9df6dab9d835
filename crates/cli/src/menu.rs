//! Main menu entries.

use core::str::FromStr;

/// One main-menu entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    AddItem,
    SellItem,
    RestockItem,
    SearchItems,
    InventoryValue,
    ListItems,
    PruneExpired,
    RemoveItem,
    SaveCatalog,
    LoadCatalog,
    Exit,
}

impl MenuChoice {
    /// Entries in the order they are printed.
    pub const ALL: [MenuChoice; 11] = [
        MenuChoice::AddItem,
        MenuChoice::SellItem,
        MenuChoice::RestockItem,
        MenuChoice::SearchItems,
        MenuChoice::InventoryValue,
        MenuChoice::ListItems,
        MenuChoice::PruneExpired,
        MenuChoice::RemoveItem,
        MenuChoice::SaveCatalog,
        MenuChoice::LoadCatalog,
        MenuChoice::Exit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MenuChoice::AddItem => "1",
            MenuChoice::SellItem => "2",
            MenuChoice::RestockItem => "3",
            MenuChoice::SearchItems => "4",
            MenuChoice::InventoryValue => "5",
            MenuChoice::ListItems => "6",
            MenuChoice::PruneExpired => "7",
            MenuChoice::RemoveItem => "8",
            MenuChoice::SaveCatalog => "9",
            MenuChoice::LoadCatalog => "10",
            MenuChoice::Exit => "0",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MenuChoice::AddItem => "Add item",
            MenuChoice::SellItem => "Sell item",
            MenuChoice::RestockItem => "Restock item",
            MenuChoice::SearchItems => "Search items",
            MenuChoice::InventoryValue => "Inventory value",
            MenuChoice::ListItems => "List all items",
            MenuChoice::PruneExpired => "Remove expired groceries",
            MenuChoice::RemoveItem => "Remove item",
            MenuChoice::SaveCatalog => "Save catalog",
            MenuChoice::LoadCatalog => "Load catalog",
            MenuChoice::Exit => "Exit",
        }
    }

    /// The full menu text, one entry per line.
    pub fn render() -> String {
        let mut text = String::from("Stockroom Inventory\n");
        for choice in Self::ALL {
            text.push_str(&format!("{:>2}. {}\n", choice.key(), choice.title()));
        }
        text
    }
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL.into_iter().find(|choice| choice.key() == s).ok_or(())
    }
}
