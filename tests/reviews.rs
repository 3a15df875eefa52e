use screenscene::{InMemoryStore, Rating, ReviewsStore, UserId};

fn owner(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

fn rating(value: u8) -> Rating {
    Rating::new(value).unwrap()
}

fn new_store() -> ReviewsStore<InMemoryStore> {
    ReviewsStore::new(InMemoryStore::new())
}

// --- One review per (owner, item) ---

#[test]
fn resubmitting_replaces_rather_than_duplicates() {
    let reviews = new_store();
    let u1 = owner("u1");

    reviews.add(&u1, 550, rating(4), "Great film");
    reviews.add(&u1, 550, rating(2), "Actually meh");

    let own = reviews.get_own(&u1, 550).unwrap();
    assert_eq!(own.rating.get(), 2);
    assert_eq!(own.comment, "Actually meh");
    assert_eq!(reviews.for_item(&u1, 550).len(), 1);
}

#[test]
fn uniqueness_holds_under_mixed_add_update_sequences() {
    let reviews = new_store();
    let u1 = owner("u1");

    reviews.add(&u1, 550, rating(3), "first");
    reviews.update(&u1, 550, rating(4), "second");
    reviews.add(&u1, 550, rating(5), "third");
    reviews.update(&u1, 550, rating(1), "fourth");

    let all = reviews.for_item(&u1, 550);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].rating.get(), 1);
    assert_eq!(all[0].comment, "fourth");
}

#[test]
fn created_at_survives_edits() {
    let reviews = new_store();
    let u1 = owner("u1");

    let original = reviews.add(&u1, 550, rating(4), "Great film").unwrap();
    let edited = reviews.update(&u1, 550, rating(5), "On rewatch: great").unwrap();

    assert_eq!(edited.created_at, original.created_at);
    assert!(edited.updated_at >= original.updated_at);
}

// --- No-op transitions ---

#[test]
fn update_without_review_mutates_nothing() {
    let reviews = new_store();
    let u1 = owner("u1");

    assert!(reviews.update(&u1, 550, rating(3), "ghost").is_none());
    assert!(reviews.get_own(&u1, 550).is_none());
}

#[test]
fn remove_without_review_is_a_quiet_success() {
    let reviews = new_store();
    let u1 = owner("u1");

    assert!(reviews.remove(&u1, 550));
    assert!(reviews.get_own(&u1, 550).is_none());
}

#[test]
fn full_lifecycle_returns_to_no_review() {
    let reviews = new_store();
    let u1 = owner("u1");

    reviews.add(&u1, 550, rating(4), "Great film");
    reviews.update(&u1, 550, rating(3), "cooled on it");
    assert!(reviews.remove(&u1, 550));
    assert!(reviews.get_own(&u1, 550).is_none());

    // A fresh add starts a new lifecycle.
    let fresh = reviews.add(&u1, 550, rating(5), "came back around").unwrap();
    assert_eq!(fresh.created_at, fresh.updated_at);
}

// --- Partitioning ---

#[test]
fn owners_do_not_see_each_others_reviews() {
    let reviews = new_store();
    let u1 = owner("u1");
    let u2 = owner("u2");

    reviews.add(&u1, 550, rating(4), "mine");
    reviews.add(&u2, 550, rating(1), "theirs");

    assert_eq!(reviews.get_own(&u1, 550).unwrap().comment, "mine");
    assert_eq!(reviews.get_own(&u2, 550).unwrap().comment, "theirs");
    // for_item reads one owner's partition only.
    assert_eq!(reviews.for_item(&u1, 550).len(), 1);
}

#[test]
fn removing_for_one_owner_leaves_the_other() {
    let reviews = new_store();
    let u1 = owner("u1");
    let u2 = owner("u2");

    reviews.add(&u1, 550, rating(4), "mine");
    reviews.add(&u2, 550, rating(1), "theirs");

    reviews.remove(&u1, 550);
    assert!(reviews.get_own(&u1, 550).is_none());
    assert_eq!(reviews.get_own(&u2, 550).unwrap().comment, "theirs");
}
