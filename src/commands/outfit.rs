use colored::*;
use eyre::Result;

use super::{fail, print_structured, require_user};
use crate::cli::{OutfitAction, OutputFormat};
use crate::closet::Closet;
use crate::config::OutfitConfig;
use crate::outfit::{Combo, group_by_category};
use crate::wardrobe::Item;

pub fn run(action: OutfitAction, closet: &Closet) -> Result<()> {
    match action {
        OutfitAction::Generate { format } => generate(OutputFormat::resolve(format), closet),
        OutfitAction::Last { format } => last(OutputFormat::resolve(format), closet),
    }
}

fn generate(format: OutputFormat, closet: &Closet) -> Result<()> {
    require_user(closet)?;

    let Some(combo) = closet.generate_outfit()? else {
        let missing = missing_categories(&closet.get_items()?, closet.rules());
        fail(&format!(
            "Cannot build an outfit: add at least one {}",
            missing.join(", ")
        ));
    };

    if print_structured(format, &combo)? {
        return Ok(());
    }

    println!("{}", "Today's outfit".bold());
    println!();
    print_combo(&combo);
    Ok(())
}

fn last(format: OutputFormat, closet: &Closet) -> Result<()> {
    require_user(closet)?;

    let combo = closet.last_outfit()?;
    if print_structured(format, &combo)? {
        return Ok(());
    }

    match combo {
        Some(combo) => {
            println!("{}", "Last outfit".bold());
            println!();
            print_combo(&combo);
        }
        None => println!("  {}", "(no outfit generated yet)".dimmed()),
    }
    Ok(())
}

fn print_combo(combo: &Combo) {
    for (category, item) in combo {
        let note = if item.note.is_empty() {
            String::new()
        } else {
            format!(" {}", item.note)
        };
        println!(
            "  {:12} {}{}",
            category.cyan(),
            format!("#{}", item.id).yellow(),
            note
        );
    }
}

/// Required categories with no item in `items`
fn missing_categories<'r>(items: &[Item], rules: &'r OutfitConfig) -> Vec<&'r str> {
    let groups = group_by_category(items);
    rules
        .required
        .iter()
        .filter(|c| !groups.contains_key(c.as_str()))
        .map(|c| c.as_str())
        .collect()
}
