use clap::Subcommand;
use ocdian_core::coping;

#[derive(Subcommand)]
pub enum CopingAction {
    /// Strategies for the first category mentioned in the text
    Match {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// General breathing, mindfulness and reassurance tips
    Tips,
    /// Known categories, in matching order
    Categories,
}

pub fn run(action: CopingAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CopingAction::Match { text } => {
            let text = text.join(" ");
            let category = coping::match_category(&text).map(|(category, _)| category);
            let strategies = coping::match_strategies(&text);
            let out = serde_json::json!({ "category": category, "strategies": strategies });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        CopingAction::Tips => {
            for tip in coping::general_tips() {
                println!("{tip}");
            }
        }
        CopingAction::Categories => {
            for category in coping::categories() {
                println!("{category}");
            }
        }
    }
    Ok(())
}
