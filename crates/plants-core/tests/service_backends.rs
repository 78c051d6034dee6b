//! The domain service behaves the same on every storage backend.

use std::sync::Arc;

use plants_core::{PlantService, ServiceError};
use plants_models::{AppData, List, ListId, ListItem};
use plants_persistence::{open_store, Backend, StoreConfig};
use tempfile::{tempdir, TempDir};

fn services() -> Vec<(PlantService, TempDir)> {
    [Backend::Memory, Backend::Json, Backend::Sqlite]
        .into_iter()
        .map(|backend| {
            let dir = tempdir().unwrap();
            let config = StoreConfig {
                backend,
                data_dir: dir.path().join("data"),
                db_path: dir.path().join("plants.db"),
            };
            (PlantService::new(open_store(&config).unwrap()), dir)
        })
        .collect()
}

#[test]
fn salad_kit_lands_in_order() {
    for (svc, _dir) in services() {
        let kit = svc.create_collection("Salad Kit").unwrap();
        svc.add_collection_item(&kit.id, "Lettuce").unwrap();
        svc.add_collection_item(&kit.id, "Tomato").unwrap();
        let list = svc.create_list(None).unwrap();

        svc.apply_collection_to_list(&list.id, "Salad Kit").unwrap();

        let items = svc.get_list(&list.id).unwrap().items;
        let pairs: Vec<(&str, u32)> = items
            .iter()
            .map(|i| (i.content.as_str(), i.position))
            .collect();
        assert_eq!(pairs, [("Lettuce", 0), ("Tomato", 1)], "backend {}", svc.backend());
    }
}

#[test]
fn unknown_name_becomes_literal_item() {
    for (svc, _dir) in services() {
        svc.create_collection("Herbs").unwrap();
        let list = svc.create_list(Some("week")).unwrap();

        svc.apply_collection_to_list(&list.id, "Nonexistent Name").unwrap();

        let items = svc.list_items(&list.id).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].content, "Nonexistent Name");
    }
}

#[test]
fn appended_positions_have_no_gaps() {
    for (svc, _dir) in services() {
        let list = svc.create_list(Some("week")).unwrap();
        for n in 0..5 {
            svc.add_list_item(&list.id, &format!("plant {n}")).unwrap();
        }
        let positions: Vec<u32> = svc
            .list_items(&list.id)
            .unwrap()
            .iter()
            .map(|i| i.position)
            .collect();
        assert_eq!(positions, [0, 1, 2, 3, 4], "backend {}", svc.backend());
    }
}

#[test]
fn missing_ids_are_not_found() {
    for (svc, _dir) in services() {
        let missing = ListId::from_string("123456");
        assert!(matches!(svc.get_list(&missing), Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_list(&missing), Err(ServiceError::NotFound(_))));
        assert!(matches!(
            svc.update_list_title(&missing, "x"),
            Err(ServiceError::NotFound(_))
        ));
    }
}

#[test]
fn deleting_a_list_removes_it_from_listing() {
    for (svc, _dir) in services() {
        let keep = svc.create_list(Some("keep")).unwrap();
        let drop = svc.create_list(Some("drop")).unwrap();
        svc.add_list_item(&drop.id, "Kale").unwrap();

        svc.delete_list(&drop.id).unwrap();

        let lists = svc.get_lists().unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].id, keep.id);
    }
}

#[test]
fn export_moves_between_backends() {
    let mut all = services();
    let (target, _target_dir) = all.pop().unwrap();
    let (source, _source_dir) = all.remove(1);

    let list = source.create_list(Some("week")).unwrap();
    source.add_list_item(&list.id, "Kale").unwrap();
    source.add_list_item(&list.id, "Leek").unwrap();
    let herbs = source.create_collection("Herbs").unwrap();
    source.add_collection_item(&herbs.id, "Basil").unwrap();

    target.import_data(source.export_data().unwrap()).unwrap();

    let lists = target.get_lists().unwrap();
    assert_eq!(lists[0].title, "week");
    assert_eq!(lists[0].items.len(), 2);
    assert_eq!(
        lists[0].created_at.timestamp_micros(),
        list.created_at.timestamp_micros()
    );
    let found = target.find_collection_by_title("HERBS").unwrap().unwrap();
    assert_eq!(found.items[0].content, "Basil");
}

#[test]
fn service_is_shareable_across_threads() {
    let (svc, _dir) = services().remove(0);
    let svc = Arc::new(svc);
    let list = svc.create_list(Some("week")).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let svc = Arc::clone(&svc);
            let id = list.id.clone();
            std::thread::spawn(move || svc.create_collection(&format!("c{n}")).map(|_| id))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    assert_eq!(svc.get_collections().unwrap().len(), 4);
}

#[test]
fn conflicting_import_is_rejected_everywhere() {
    let mut week = List::new("week");
    week.items.push(ListItem::new("Kale", 0));
    week.items.push(ListItem::new("Leek", 0));
    let data = AppData {
        lists: vec![week.clone(), week],
        collections: Vec::new(),
    };

    for (svc, _dir) in services() {
        let kept = svc.create_list(Some("kept")).unwrap();

        let result = svc.import_data(data.clone());

        assert!(
            matches!(result, Err(ServiceError::InvalidArgument(_))),
            "backend {}: {:?}",
            svc.backend(),
            result
        );
        let lists = svc.get_lists().unwrap();
        assert_eq!(lists.len(), 1, "backend {}", svc.backend());
        assert_eq!(lists[0].id, kept.id);
    }
}
