use clap::Subcommand;
use ocdian_core::{Database, JournalStore};

#[derive(Subcommand)]
pub enum JournalAction {
    /// Log an obsession
    Add {
        /// Obsession text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List entries in the order they were logged
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Attach (or replace) the compulsion for an entry
    Attach {
        /// Entry ID
        id: String,
        /// Compulsion text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete the entry at a list position (0-based)
    Delete { index: usize },
    /// Delete every entry
    Clear,
    /// Coping strategies for an entry
    Strategies { id: String },
}

pub fn run(action: JournalAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut journal = JournalStore::open(Database::open()?);

    match action {
        JournalAction::Add { text } => match journal.add_entry(&text.join(" "))? {
            Some(id) => println!("{}", serde_json::json!({ "id": id })),
            None => eprintln!("nothing to log: obsession text is empty"),
        },
        JournalAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(journal.entries())?);
            } else if journal.is_empty() {
                println!("No entries yet.");
            } else {
                for (index, entry) in journal.entries().iter().enumerate() {
                    println!("[{index}] {}  ({})", entry.obsession, entry.id);
                    if let Some(compulsion) = &entry.compulsion {
                        println!("      compulsion: {compulsion}");
                    }
                }
            }
        }
        JournalAction::Attach { id, text } => {
            if journal.attach_compulsion(&id, &text.join(" "))? {
                println!("ok");
            } else {
                eprintln!("nothing attached: unknown entry or empty compulsion");
            }
        }
        JournalAction::Delete { index } => match journal.delete_entry(index)? {
            Some(entry) => println!("deleted: {}", entry.obsession),
            None => eprintln!("no entry at position {index}"),
        },
        JournalAction::Clear => {
            let removed = journal.delete_all()?;
            println!("deleted {removed} entries");
        }
        JournalAction::Strategies { id } => {
            let strategies = journal.strategies_for(&id);
            println!("{}", serde_json::to_string_pretty(&strategies)?);
        }
    }
    Ok(())
}
