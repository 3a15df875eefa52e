use screenscene::{FavoritesSnapshot, FavoritesStore, InMemoryStore, MediaRef, UserId};

fn owner(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

#[test]
fn token_carries_a_collection_to_another_device() {
    let u1 = owner("u1");

    // Device A
    let device_a = FavoritesStore::new(InMemoryStore::new());
    device_a.add(&u1, MediaRef::movie(550));
    device_a.add(&u1, MediaRef::show(1399));
    let token = device_a.export(&u1).encode().unwrap();

    // Device B starts empty
    let device_b = FavoritesStore::new(InMemoryStore::new());
    assert_eq!(device_b.count(&u1), 0);

    let snapshot = FavoritesSnapshot::decode(&token).unwrap();
    assert!(device_b.import(&u1, &snapshot));

    assert_eq!(device_b.count(&u1), 2);
    assert!(device_b.is_favorite(&u1, MediaRef::movie(550)));
    assert!(device_b.is_favorite(&u1, MediaRef::show(1399)));
}

#[test]
fn snapshot_transfers_between_accounts() {
    let favorites = FavoritesStore::new(InMemoryStore::new());
    let u1 = owner("u1");
    let u2 = owner("u2");

    favorites.add(&u1, MediaRef::movie(550));
    let snapshot = favorites.export(&u1);

    assert!(favorites.import(&u2, &snapshot));
    let entries = favorites.list(&u2);
    assert_eq!(entries.len(), 1);
    // Transferred entries belong to the importing account.
    assert_eq!(entries[0].owner_id, u2);
    assert!(favorites.is_favorite(&u2, MediaRef::movie(550)));
    // The source account is untouched.
    assert!(favorites.is_favorite(&u1, MediaRef::movie(550)));
}

#[test]
fn import_replaces_never_merges() {
    let favorites = FavoritesStore::new(InMemoryStore::new());
    let u1 = owner("u1");

    favorites.add(&u1, MediaRef::movie(1));
    let snapshot = favorites.export(&u1);

    favorites.clear(&u1);
    favorites.add(&u1, MediaRef::movie(2));
    favorites.add(&u1, MediaRef::movie(3));

    assert!(favorites.import(&u1, &snapshot));
    let entries = favorites.list(&u1);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].item_id, 1);
}

#[test]
fn json_form_survives_an_editor_round_trip() {
    let favorites = FavoritesStore::new(InMemoryStore::new());
    let u1 = owner("u1");
    favorites.add(&u1, MediaRef::movie(550));

    let json = favorites.export(&u1).to_json().unwrap();
    let reparsed = FavoritesSnapshot::from_json(&json).unwrap();
    assert_eq!(reparsed.entries.len(), 1);
    assert_eq!(reparsed.owner_id, u1);
}

#[test]
fn truncated_token_is_rejected_without_side_effects() {
    let favorites = FavoritesStore::new(InMemoryStore::new());
    let u1 = owner("u1");
    favorites.add(&u1, MediaRef::movie(550));

    let token = favorites.export(&u1).encode().unwrap();
    let truncated = &token[..token.len() / 2];
    assert!(FavoritesSnapshot::decode(truncated).is_err());

    // Nothing happened to the stored collection.
    assert_eq!(favorites.count(&u1), 1);
}
