//! Command handlers for CLI subcommands.

use std::fs;
use std::path::Path;

use plants_api::{ApiConfig, AppState};
use plants_core::PlantService;
use plants_models::{AppData, CollectionId, ItemId, List, ListId, Summary};
use tracing::info;

use crate::cli::{Commands, OutputFormat};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a CLI command against `service`.
pub fn execute(command: Commands, service: &PlantService) -> Result<()> {
    match command {
        Commands::Serve { host, port } => cmd_serve(service, host, port),
        Commands::Lists { format } => cmd_lists(service, format),
        Commands::Show { list, format } => cmd_show(service, list.as_deref(), format),
        Commands::Latest { format } => cmd_show(service, None, format),
        Commands::NewList { title } => cmd_new_list(service, title.as_deref()),
        Commands::Rename { list, title } => {
            let list = service.update_list_title(&ListId::from(list), &title)?;
            println!("Renamed list to '{}' ({})", list.title, list.id);
            Ok(())
        }
        Commands::Add { list, content } => {
            let item = service.add_list_item(&ListId::from(list), &content)?;
            println!("Added '{}' ({})", item.content, item.id);
            Ok(())
        }
        Commands::Apply { list, text } => cmd_apply(service, &ListId::from(list), &text),
        Commands::DeleteList { list } => {
            service.delete_list(&ListId::from(list.as_str()))?;
            println!("Deleted list {}", list);
            Ok(())
        }
        Commands::DeleteItem { list, item } => {
            service.delete_list_item(&ListId::from(list), &ItemId::from(item.as_str()))?;
            println!("Deleted item {}", item);
            Ok(())
        }
        Commands::Collections { format } => cmd_collections(service, format),
        Commands::NewCollection { title } => {
            let collection = service.create_collection(&title)?;
            println!("Created collection '{}' ({})", collection.title, collection.id);
            Ok(())
        }
        Commands::RenameCollection { collection, title } => {
            let collection =
                service.update_collection_title(&CollectionId::from(collection), &title)?;
            println!(
                "Renamed collection to '{}' ({})",
                collection.title, collection.id
            );
            Ok(())
        }
        Commands::AddToCollection {
            collection,
            content,
        } => {
            let item = service.add_collection_item(&CollectionId::from(collection), &content)?;
            println!("Added '{}' ({})", item.content, item.id);
            Ok(())
        }
        Commands::DeleteCollectionItem { collection, item } => {
            service.delete_collection_item(
                &CollectionId::from(collection),
                &ItemId::from(item.as_str()),
            )?;
            println!("Deleted item {}", item);
            Ok(())
        }
        Commands::Suggest { text } => {
            for collection in service.suggest_collections(&text)? {
                println!("{}\t{}", collection.id, collection.title);
            }
            Ok(())
        }
        Commands::Export { output } => cmd_export(service, output.as_deref()),
        Commands::Import { file } => cmd_import(service, &file),
    }
}

fn cmd_serve(service: &PlantService, host: String, port: u16) -> Result<()> {
    let config = ApiConfig::new(host, port);
    let state = AppState::new(config.clone(), service.clone());
    info!(address = %config.bind_address(), backend = service.backend(), "starting API server");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(plants_api::serve(config, state))?;
    Ok(())
}

fn cmd_lists(service: &PlantService, format: OutputFormat) -> Result<()> {
    let summaries = service.list_summaries()?;
    print_summaries(&summaries, format, "list")
}

fn cmd_collections(service: &PlantService, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let summaries = service.collection_summaries()?;
            print_summaries(&summaries, format, "collection")
        }
        OutputFormat::Json => {
            let collections = service.get_collections()?;
            println!("{}", serde_json::to_string_pretty(&collections)?);
            Ok(())
        }
    }
}

fn print_summaries(summaries: &[Summary], format: OutputFormat, noun: &str) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if summaries.is_empty() {
                println!("No {}s found.", noun);
                return Ok(());
            }

            println!("{:<36}  {:<30}  {:>5}  CREATED", "ID", "TITLE", "ITEMS");
            println!("{}", "-".repeat(90));
            for summary in summaries {
                println!(
                    "{:<36}  {:<30}  {:>5}  {}",
                    summary.id,
                    truncate(&summary.title, 30),
                    summary.item_count,
                    summary.created_at.format("%Y-%m-%d %H:%M")
                );
            }
            println!("\n{} {}(s)", summaries.len(), noun);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summaries)?);
        }
    }
    Ok(())
}

fn cmd_show(service: &PlantService, list_id: Option<&str>, format: OutputFormat) -> Result<()> {
    let list = match list_id {
        Some(id) => service.get_list(&ListId::from(id))?,
        None => match service.latest_list()? {
            Some(list) => list,
            None => {
                println!("No lists yet. Create one with `plants new-list`.");
                return Ok(());
            }
        },
    };

    match format {
        OutputFormat::Table => print_list(&list),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&list)?),
    }
    Ok(())
}

fn print_list(list: &List) {
    println!("{} ({})", list.title, list.id);
    println!("  Created: {}", list.created_at.format("%Y-%m-%d %H:%M"));
    if list.items.is_empty() {
        println!("  (no items)");
        return;
    }
    for item in &list.items {
        let mark = if item.completed { "x" } else { " " };
        println!("  [{}] {:>3}. {}  ({})", mark, item.position, item.content, item.id);
    }
    println!("\n{} plant(s)", list.items.len());
}

fn cmd_apply(service: &PlantService, list_id: &ListId, text: &str) -> Result<()> {
    let applied = service.apply_collection_to_list(list_id, text)?;
    match &applied.collection {
        Some(collection) => println!(
            "Added {} item(s) from collection '{}'",
            applied.items.len(),
            collection.title
        ),
        None => println!("Added {} item(s)", applied.items.len()),
    }
    Ok(())
}

fn cmd_new_list(service: &PlantService, title: Option<&str>) -> Result<()> {
    let list = service.create_list(title)?;
    println!("Created list '{}' ({})", list.title, list.id);
    Ok(())
}

fn cmd_export(service: &PlantService, output: Option<&Path>) -> Result<()> {
    let data = service.export_data()?;
    let json = serde_json::to_string_pretty(&data)?;
    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!(
                "Exported {} list(s) and {} collection(s) to {}",
                data.lists.len(),
                data.collections.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn cmd_import(service: &PlantService, file: &Path) -> Result<()> {
    let content = fs::read_to_string(file)?;
    let data: AppData = serde_json::from_str(&content)?;
    let (lists, collections) = (data.lists.len(), data.collections.len());
    service.import_data(data)?;
    println!(
        "Imported {} list(s) and {} collection(s)",
        lists, collections
    );
    Ok(())
}

/// Truncates a string to the given number of characters, adding "..." if
/// truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plants_persistence::MemoryStore;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn service() -> PlantService {
        PlantService::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_cmd_lists_empty() {
        let service = service();
        cmd_lists(&service, OutputFormat::Table).unwrap();
        cmd_lists(&service, OutputFormat::Json).unwrap();
    }

    #[test]
    fn test_cmd_show_latest_without_lists() {
        cmd_show(&service(), None, OutputFormat::Table).unwrap();
    }

    #[test]
    fn test_add_and_show() {
        let service = service();
        let list = service.create_list(Some("week")).unwrap();

        execute(
            Commands::Add {
                list: list.id.to_string(),
                content: "kale".into(),
            },
            &service,
        )
        .unwrap();

        cmd_show(&service, Some(list.id.as_str()), OutputFormat::Table).unwrap();
        assert_eq!(service.list_items(&list.id).unwrap()[0].content, "kale");
    }

    #[test]
    fn test_apply_collection() {
        let service = service();
        let collection = service.create_collection("Salad Kit").unwrap();
        service.add_collection_item(&collection.id, "Lettuce").unwrap();
        service.add_collection_item(&collection.id, "Tomato").unwrap();
        let list = service.create_list(None).unwrap();

        execute(
            Commands::Apply {
                list: list.id.to_string(),
                text: "salad kit".into(),
            },
            &service,
        )
        .unwrap();

        let contents: Vec<String> = service
            .list_items(&list.id)
            .unwrap()
            .into_iter()
            .map(|i| i.content)
            .collect();
        assert_eq!(contents, vec!["Lettuce", "Tomato"]);
    }

    #[test]
    fn test_missing_list_is_error() {
        let result = execute(
            Commands::Add {
                list: "missing".into(),
                content: "kale".into(),
            },
            &service(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_export_then_import() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("backup.json");

        let source = service();
        let list = source.create_list(Some("week")).unwrap();
        source.add_list_item(&list.id, "leek").unwrap();
        cmd_export(&source, Some(&file)).unwrap();

        let target = service();
        cmd_import(&target, &file).unwrap();
        assert_eq!(target.export_data().unwrap(), source.export_data().unwrap());
    }

    #[test]
    fn test_import_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bad.json");
        fs::write(&file, "{ nope").unwrap();

        assert!(cmd_import(&service(), &file).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hi", 2), "hi");
        assert_eq!(truncate("café crème", 6), "caf...");
    }
}
