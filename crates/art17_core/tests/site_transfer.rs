use art17_core::service::site::load_fallback;
use art17_core::service::transfer::{backup_document, export_document, import_json, to_pretty_json};
use art17_core::service::upload::upload_image;
use art17_core::{
    new_entity_id, AdminStore, Application, ApplicationStatus, BusinessData, ContactForm,
    ContentSource, Image, ImageUpload, KeyValueStore, MemoryStore, Product, ProductDraft,
    ProductSpecs, Service, ServiceDraft, Settings, SiteContent, StorageKeys, TransferError,
    UploadError,
};
use chrono::{Duration, Utc};
use std::fs;

fn seeded_store() -> AdminStore<MemoryStore> {
    let mut store = AdminStore::open(MemoryStore::new()).unwrap();
    store
        .create::<Service>(ServiceDraft {
            name: "Монтаж".to_string(),
            description: "Установка оборудования".to_string(),
            price: "от 5000 ₽".to_string(),
            icon: String::new(),
            features_text: "Выезд\nГарантия".to_string(),
        })
        .unwrap();
    store
        .create::<Product>(ProductDraft {
            name: "Песочница".to_string(),
            description: "Деревянная".to_string(),
            price: "15 000 ₽".to_string(),
            category: "sandboxes".to_string(),
            image: "https://example.com/sand.jpg".to_string(),
            location: "Калуга".to_string(),
            specs: ProductSpecs {
                material: "Дерево".to_string(),
                ..ProductSpecs::default()
            },
            show_in_portfolio: true,
        })
        .unwrap();
    ContactForm {
        name: "Анна".to_string(),
        phone: "+7 900 000-00-00".to_string(),
        message: "Нужна горка".to_string(),
        ..ContactForm::default()
    }
    .submit(&mut store)
    .unwrap();
    store
}

fn application_at(name: &str, date: chrono::DateTime<Utc>) -> Application {
    Application {
        id: new_entity_id(),
        date,
        name: name.to_string(),
        phone: String::new(),
        email: String::new(),
        interest: String::new(),
        message: String::new(),
        status: ApplicationStatus::New,
        source: "website".to_string(),
    }
}

#[test]
fn business_data_round_trips_through_json() {
    let store = seeded_store();
    let json = serde_json::to_string(store.business_data()).unwrap();
    let parsed: BusinessData = serde_json::from_str(&json).unwrap();
    assert_eq!(&parsed, store.business_data());
}

#[test]
fn contact_form_records_new_website_application() {
    let store = seeded_store();
    let applications = store.list::<Application>();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].status, ApplicationStatus::New);
    assert_eq!(applications[0].source, "website");

    let stats = store.stats();
    assert_eq!(stats.new_applications, 1);
    assert_eq!(stats.total_applications, 1);
    assert_eq!(stats.services, 1);
    assert_eq!(stats.portfolio, 1);
}

#[test]
fn application_status_change_updates_stats() {
    let mut store = seeded_store();
    let id = store.list::<Application>()[0].id;

    let updated = store
        .set_application_status(id, ApplicationStatus::Processed)
        .unwrap();
    assert_eq!(updated.status, ApplicationStatus::Processed);
    assert_eq!(store.stats().new_applications, 0);
}

#[test]
fn prune_removes_only_old_applications() {
    let mut store = AdminStore::open(MemoryStore::new()).unwrap();
    let now = Utc::now();
    store
        .replace_all::<Application>(vec![
            application_at("old", now - Duration::days(45)),
            application_at("fresh", now - Duration::days(2)),
        ])
        .unwrap();

    assert_eq!(store.prune_applications(now).unwrap(), 1);
    let remaining = store.list::<Application>();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "fresh");
    assert_eq!(store.prune_applications(now).unwrap(), 0);
}

#[test]
fn site_prefers_stored_blob_over_fallback() {
    let store = seeded_store();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, r#"{"services":[],"products":[]}"#).unwrap();

    let content = SiteContent::load(store.backend(), &StorageKeys::default(), Some(path.as_path()));
    assert_eq!(content.source, ContentSource::Storage);
    assert_eq!(content.data.services.len(), 1);

    let page = content.render();
    assert!(page.services.contains("Монтаж"));
    assert!(page.portfolio.contains("Песочница"));
    assert!(page.contacts.contains("8 (499) 688-63-54"));
}

#[test]
fn site_uses_fallback_file_when_key_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(
        &path,
        r#"{"services":[{"id":1,"name":"Дизайн","description":"Проект","price":"от 3000 ₽"}],
            "products":[{"id":2,"name":"Качели","showInPortfolio":false}]}"#,
    )
    .unwrap();

    let content = SiteContent::load(
        &MemoryStore::new(),
        &StorageKeys::default(),
        Some(path.as_path()),
    );
    assert_eq!(content.source, ContentSource::Fallback);
    assert_eq!(content.data, load_fallback(&path).unwrap());
    assert_eq!(content.portfolio().count(), 0);
}

#[test]
fn site_degrades_to_empty_content() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let content = SiteContent::load(
        &MemoryStore::new(),
        &StorageKeys::default(),
        Some(missing.as_path()),
    );
    assert_eq!(content.source, ContentSource::Empty);
    assert!(content.data.is_empty());
    assert_eq!(content.settings, Settings::default());
}

#[test]
fn export_then_import_restores_sections() {
    let source = seeded_store();
    let document = export_document(&source, true, Utc::now());
    assert_eq!(document.version.as_deref(), Some("1.0"));
    let json = to_pretty_json(&document).unwrap();

    let mut target = AdminStore::open(MemoryStore::new()).unwrap();
    let summary = import_json(&mut target, &json).unwrap();

    assert!(summary.data && summary.images && summary.settings && summary.applications);
    assert_eq!(target.business_data(), source.business_data());
    assert_eq!(target.list::<Image>(), source.list::<Image>());
    assert_eq!(
        target.list::<Application>(),
        source.list::<Application>()
    );
}

#[test]
fn export_without_applications_omits_them() {
    let store = seeded_store();
    let document = export_document(&store, false, Utc::now());
    let json = to_pretty_json(&document).unwrap();
    assert!(!json.contains("\"applications\""));

    let backup = backup_document(&store, Utc::now());
    assert!(backup.version.is_none());
    assert_eq!(backup.applications.map(|apps| apps.len()), Some(1));
}

#[test]
fn invalid_import_changes_nothing() {
    let mut store = seeded_store();
    let before = store.state().clone();

    let err = import_json(&mut store, "{not json").unwrap_err();
    assert!(matches!(err, TransferError::Json(_)));
    assert_eq!(store.state(), &before);
}

#[test]
fn partial_import_replaces_only_present_sections() {
    let mut store = seeded_store();
    let before = store.business_data().clone();

    let summary = import_json(
        &mut store,
        r#"{"settings":{"companyName":"Новая студия","companyPhone":"1"}}"#,
    )
    .unwrap();

    assert!(summary.settings && !summary.data);
    assert_eq!(store.settings().company_name, "Новая студия");
    assert_eq!(store.business_data(), &before);
}

#[test]
fn settings_reset_restores_factory_values() {
    let mut store = AdminStore::open(MemoryStore::new()).unwrap();
    let mut settings = store.settings().clone();
    settings.company_name = "Другая".to_string();
    store.update_settings(settings).unwrap();

    store.reset_settings().unwrap();
    assert_eq!(store.settings(), &Settings::default());
}

#[test]
fn factory_reset_keeps_applications() {
    let mut store = seeded_store();
    store.factory_reset().unwrap();

    assert!(store.business_data().is_empty());
    assert_eq!(store.list::<Image>().len(), 6);
    assert_eq!(store.list::<Application>().len(), 1);
}

#[test]
fn clear_all_removes_every_key() {
    let mut store = seeded_store();
    store.clear_all().unwrap();

    let keys = StorageKeys::default();
    for key in keys.all() {
        assert!(store.backend().get(key).unwrap().is_none());
    }
    assert!(store.list::<Application>().is_empty());
    assert!(store.activities().is_empty());
}

#[test]
fn update_check_flags_stale_sessions() {
    let mut store = AdminStore::open(MemoryStore::new()).unwrap();
    let now = Utc::now();

    assert!(store.check_for_updates(now).unwrap());
    assert!(!store.check_for_updates(now + Duration::days(1)).unwrap());
    assert!(store.check_for_updates(now + Duration::days(9)).unwrap());
}

#[test]
fn upload_embeds_image_as_data_uri() {
    let mut store = AdminStore::open(MemoryStore::new()).unwrap();
    let upload = ImageUpload {
        file_name: "slide.png".to_string(),
        mime_type: "image/png".to_string(),
        bytes: vec![137, 80, 78, 71],
    };

    let image = upload_image(&mut store, &upload).unwrap();
    assert_eq!(image.name, "slide.png");
    assert!(image.url.starts_with("data:image/png;base64,"));
    assert_eq!(store.list::<Image>()[0].id, image.id);
}

#[test]
fn oversized_upload_is_rejected_before_store() {
    let mut store = AdminStore::open(MemoryStore::new()).unwrap();
    let upload = ImageUpload {
        file_name: "huge.jpg".to_string(),
        mime_type: "image/jpeg".to_string(),
        bytes: vec![0; store.config().max_upload_bytes + 1],
    };

    let err = upload_image(&mut store, &upload).unwrap_err();
    assert!(matches!(err, UploadError::TooLarge { .. }));
    assert_eq!(store.list::<Image>().len(), 6);
}
