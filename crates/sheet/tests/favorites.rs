//! End-to-end favorites flow against an in-memory store: user actions
//! issue updates, the store applies them, and the next context rebuild
//! reflects the new state.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use vellum_domain::{
    CharacterId, CharacterRecord, FavoriteDescriptor, FavoriteKind, Item, RelativeRef, SkillEntry,
};
use vellum_domain::reference::ProficiencyRank;
use vellum_sheet::{
    CharacterStore, EmptyCatalogue, ProjectionKind, SheetActions, SheetContextBuilder, SheetUpdate,
    StoreError,
};

/// A single-record store backed by a mutex, applying the update ops the
/// sheet issues the way the real document store would.
struct InMemoryStore {
    record: Mutex<CharacterRecord>,
}

impl InMemoryStore {
    fn new(record: CharacterRecord) -> Self {
        Self {
            record: Mutex::new(record),
        }
    }

    async fn snapshot(&self) -> CharacterRecord {
        self.record.lock().await.clone()
    }
}

#[async_trait]
impl CharacterStore for InMemoryStore {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, StoreError> {
        let record = self.record.lock().await;
        if record.id() == id {
            Ok(Some(record.clone()))
        } else {
            Ok(None)
        }
    }

    async fn apply(&self, id: CharacterId, update: SheetUpdate) -> Result<(), StoreError> {
        let mut record = self.record.lock().await;
        if record.id() != id {
            return Err(StoreError::not_found("character", id));
        }
        match update {
            SheetUpdate::Favorites { entries } => record.set_favorites(entries),
            SheetUpdate::EffectDisabled {
                effect_id,
                disabled,
            } => {
                if let Some(effect) = record.effect_mut(effect_id) {
                    effect.set_disabled(disabled);
                }
            }
            // The remaining ops exercise rules-layer behavior the sheet
            // only requests; this store records nothing for them.
            _ => {}
        }
        Ok(())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn seed_character() -> (CharacterRecord, String) {
    let item = Item::new("Wand of Magic Missiles", "icons/wand.webp")
        .with_type("Wondrous Item")
        .with_uses(2.0, 5.0);
    let item_ref = RelativeRef::item(item.id()).to_string();
    let mut record = CharacterRecord::new("Aveline").with_skill(
        "acr",
        SkillEntry {
            total: 3,
            passive: 13,
            ability: "dex".into(),
            rank: ProficiencyRank::Proficient,
        },
    );
    record.add_item(item);
    record.set_favorites(vec![
        FavoriteDescriptor::new(FavoriteKind::Skill, "acr", 1.0),
        FavoriteDescriptor::new(FavoriteKind::Item, item_ref.clone(), 2.0),
    ]);
    (record, item_ref)
}

#[tokio::test]
async fn drop_add_reorder_remove_round_trip() {
    init_tracing();
    let (record, item_ref) = seed_character();
    let character_id = record.id();
    let store = Arc::new(InMemoryStore::new(record));
    let actions = SheetActions::new(store.clone());

    // Add a tool favorite via a drop.
    let payload = r#"{"action":"favorite","type":"tool","id":"thief"}"#;
    actions
        .handle_favorite_drop(character_id, payload, None)
        .await
        .expect("drop handled");
    let record = store.snapshot().await;
    assert_eq!(record.favorites().len(), 3);
    let appended = record.favorites().get("thief").expect("appended");
    assert!(appended.sort() > 2.0);

    // Drag the item favorite before the skill. One update, one moved
    // entry, neighbors untouched.
    actions
        .sort_favorites(character_id, &item_ref, "acr")
        .await
        .expect("reordered");
    let record = store.snapshot().await;
    let moved = record.favorites().get(&item_ref).expect("moved");
    assert!(moved.sort() < 1.0);
    assert_eq!(record.favorites().get("acr").expect("skill").sort(), 1.0);

    // Remove the skill favorite.
    actions
        .remove_favorite(character_id, "acr")
        .await
        .expect("removed");
    let record = store.snapshot().await;
    assert!(!record.favorites().has_favorite("acr"));
    assert_eq!(record.favorites().len(), 2);
}

#[tokio::test]
async fn rebuilt_context_reflects_reordering() {
    init_tracing();
    let (record, item_ref) = seed_character();
    let character_id = record.id();
    let store = Arc::new(InMemoryStore::new(record));
    let actions = SheetActions::new(store.clone());

    let before = store.snapshot().await;
    let context = SheetContextBuilder::new(&before, &EmptyCatalogue).build();
    assert_eq!(context.favorites[0].id, "acr");
    assert_eq!(context.favorites[0].css, "modifier");
    assert_eq!(context.favorites[1].css, "uses");

    actions
        .sort_favorites(character_id, &item_ref, "acr")
        .await
        .expect("reordered");

    let after = store.snapshot().await;
    let context = SheetContextBuilder::new(&after, &EmptyCatalogue).build();
    assert_eq!(context.favorites[0].id, item_ref);
    assert_eq!(context.favorites[1].id, "acr");
}

#[tokio::test]
async fn deleting_the_referent_hides_but_keeps_the_favorite() {
    init_tracing();
    let (mut record, item_ref) = seed_character();
    let item_id = record.items()[0].id();
    record.remove_item(item_id);
    let store = Arc::new(InMemoryStore::new(record));

    let snapshot = store.snapshot().await;
    let context = SheetContextBuilder::new(&snapshot, &EmptyCatalogue).build();
    assert!(context.favorites.iter().all(|f| f.id != item_ref));
    assert!(snapshot.favorites().has_favorite(&item_ref));
}

#[tokio::test]
async fn duplicate_drop_reorders_instead_of_duplicating() {
    init_tracing();
    let (record, item_ref) = seed_character();
    let character_id = record.id();
    let store = Arc::new(InMemoryStore::new(record));
    let actions = SheetActions::new(store.clone());

    let payload = format!(r#"{{"action":"favorite","type":"item","id":"{item_ref}"}}"#);
    actions
        .handle_favorite_drop(character_id, &payload, Some("acr"))
        .await
        .expect("drop handled");

    let record = store.snapshot().await;
    assert_eq!(record.favorites().len(), 2);
    assert!(record.favorites().get(&item_ref).expect("moved").sort() < 1.0);
}

#[tokio::test]
async fn using_an_effect_favorite_toggles_it_in_the_store() {
    init_tracing();
    let effect = vellum_domain::Effect::new("Bless", "icons/bless.webp");
    let effect_ref = RelativeRef::effect(effect.id()).to_string();
    let mut record = CharacterRecord::new("Aveline");
    let effect_id = effect.id();
    record.add_effect(effect);
    record.set_favorites(vec![FavoriteDescriptor::new(
        FavoriteKind::Effect,
        effect_ref.clone(),
        1.0,
    )]);
    let character_id = record.id();
    let store = Arc::new(InMemoryStore::new(record));
    let actions = SheetActions::new(store.clone());

    actions
        .use_favorite(character_id, &effect_ref)
        .await
        .expect("toggled");
    let record = store.snapshot().await;
    assert!(record.effect(effect_id).expect("effect").disabled());

    // The toggled-off effect now projects with the disabled class.
    let context = SheetContextBuilder::new(&record, &EmptyCatalogue).build();
    let row = context
        .favorites
        .iter()
        .find(|f| f.kind == ProjectionKind::Effect)
        .expect("effect row");
    assert_eq!(row.toggle, Some(false));
    assert!(row.css.contains("disabled"));
}
