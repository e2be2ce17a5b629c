use colored::*;
use eyre::Result;
use std::path::Path;

use super::{fail, print_structured, require_user};
use crate::cli::{ItemAction, OutputFormat};
use crate::closet::Closet;
use crate::wardrobe::Item;

pub fn run(action: ItemAction, closet: &Closet) -> Result<()> {
    match action {
        ItemAction::Add { image, category, note } => add(&image, &category, note.as_deref(), closet),
        ItemAction::List { category, format } => list(category.as_deref(), OutputFormat::resolve(format), closet),
        ItemAction::Remove { id } => remove(id, closet),
    }
}

fn add(image: &Path, category: &str, note: Option<&str>, closet: &Closet) -> Result<()> {
    require_user(closet)?;

    match closet.add_item_from_file(image, category, note)? {
        Some(item) => {
            println!(
                "{} Added {} {}",
                "✓".green(),
                item.category.cyan(),
                format!("(id {})", item.id).dimmed()
            );
            Ok(())
        }
        None => fail("Not logged in"),
    }
}

fn list(category: Option<&str>, format: OutputFormat, closet: &Closet) -> Result<()> {
    let user = require_user(closet)?;

    let items: Vec<Item> = closet
        .get_items()?
        .into_iter()
        .filter(|it| category.is_none_or(|c| it.category.eq_ignore_ascii_case(c)))
        .collect();

    if print_structured(format, &items)? {
        return Ok(());
    }

    println!("{} {}", "Wardrobe of".bold(), user.cyan().bold());
    println!();

    if items.is_empty() {
        println!("  {}", "(no items yet - add one with `wardrobe item add`)".dimmed());
        return Ok(());
    }

    for item in &items {
        print_item(item);
    }
    println!();
    println!("  {} item(s)", items.len().to_string().yellow());

    Ok(())
}

fn remove(id: i64, closet: &Closet) -> Result<()> {
    require_user(closet)?;

    let matching = closet.get_items()?.iter().filter(|it| it.id == id).count();

    if !closet.delete_item(id)? {
        fail("No items recorded yet");
    }

    if matching == 0 {
        println!("{} No item with id {}", "○".dimmed(), id);
    } else {
        println!("{} Removed {} item(s) with id {}", "✓".green(), matching, id);
    }
    Ok(())
}

pub(crate) fn print_item(item: &Item) {
    let note = if item.note.is_empty() {
        String::new()
    } else {
        format!(" {}", item.note)
    };
    println!(
        "  {:>14}  {:12}{} {}",
        item.id.to_string().dimmed(),
        item.category.cyan(),
        note,
        describe_image(&item.image).dimmed()
    );
}

/// Short label for an encoded image, e.g. `[image/png, 12.3 KB]`
fn describe_image(image: &str) -> String {
    let mime = image
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(';'))
        .map(|(mime, _)| mime)
        .unwrap_or("blob");
    format!("[{}, {:.1} KB]", mime, image.len() as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_image_data_url() {
        assert_eq!(describe_image("data:image/png;base64,AAAA"), "[image/png, 0.0 KB]");
    }

    #[test]
    fn test_describe_image_opaque_blob() {
        let blob = "x".repeat(2048);
        assert_eq!(describe_image(&blob), "[blob, 2.0 KB]");
    }
}
