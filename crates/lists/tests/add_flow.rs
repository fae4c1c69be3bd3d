//! Add-item flow: duplicate check first, then the aggregate enforces it.

use chrono::Utc;
use listwise_core::{Aggregate, DomainError, ListId, ListItem, UserId};
use listwise_dedup::{DuplicateChecker, SuggestedAction};
use listwise_lists::{AddItem, CreateList, ListCommand, ShoppingList};

fn created_list(list_id: ListId) -> ShoppingList {
    let mut list = ShoppingList::empty(list_id);
    let events = list
        .handle(&ListCommand::CreateList(CreateList {
            list_id,
            owner: UserId::new(),
            name: "Weekly groceries".to_string(),
            occurred_at: Utc::now(),
        }))
        .unwrap();
    for event in &events {
        list.apply(event);
    }
    list
}

async fn try_add(
    list: &mut ShoppingList,
    checker: &DuplicateChecker,
    name: &str,
) -> Result<(), DomainError> {
    let decision = checker.check_for_duplicate(name, list.items()).await;

    let events = list.handle(&ListCommand::AddItem(AddItem {
        list_id: list.id_typed(),
        item: ListItem::new(name),
        duplicate_action: decision.is_duplicate.then_some(decision.suggested_action),
        override_duplicate: false,
        occurred_at: Utc::now(),
    }))?;

    for event in &events {
        list.apply(event);
    }
    Ok(())
}

#[tokio::test]
async fn duplicate_entries_are_blocked_and_variants_pass() {
    let checker = DuplicateChecker::builtin();
    let mut list = created_list(ListId::new());

    try_add(&mut list, &checker, "Milk").await.unwrap();
    try_add(&mut list, &checker, "paper towels").await.unwrap();

    // Same product again: the engine says reject, the aggregate refuses.
    let err = try_add(&mut list, &checker, "milk").await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
    assert_eq!(list.items().len(), 2);

    // A related-but-different dairy item gets a merge suggestion, which does
    // not block the add.
    try_add(&mut list, &checker, "yogurt").await.unwrap();
    assert_eq!(list.items().len(), 3);
}

#[tokio::test]
async fn override_lets_the_user_insist() {
    let checker = DuplicateChecker::builtin();
    let mut list = created_list(ListId::new());

    try_add(&mut list, &checker, "cereal").await.unwrap();

    let decision = checker.check_for_duplicate("cheerios", list.items()).await;
    assert!(decision.is_duplicate);
    assert_eq!(decision.suggested_action, SuggestedAction::Reject);

    let events = list
        .handle(&ListCommand::AddItem(AddItem {
            list_id: list.id_typed(),
            item: ListItem::new("cheerios"),
            duplicate_action: Some(decision.suggested_action),
            override_duplicate: true,
            occurred_at: Utc::now(),
        }))
        .unwrap();
    for event in &events {
        list.apply(event);
    }
    assert_eq!(list.items().len(), 2);
}
