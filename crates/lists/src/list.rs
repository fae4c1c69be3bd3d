use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use listwise_core::{Aggregate, AggregateRoot, DomainError, ItemId, ListId, ListItem, UserId};
use listwise_dedup::SuggestedAction;

/// Aggregate root: ShoppingList.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingList {
    id: ListId,
    owner: Option<UserId>,
    name: String,
    items: Vec<ListItem>,
    version: u64,
    created: bool,
}

impl ShoppingList {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: ListId) -> Self {
        Self {
            id,
            owner: None,
            name: String::new(),
            items: Vec::new(),
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> ListId {
        self.id
    }

    pub fn owner(&self) -> Option<UserId> {
        self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current items in insertion order — the `existing_items` input for a
    /// duplicate check on this list.
    pub fn items(&self) -> &[ListItem] {
        &self.items
    }
}

impl AggregateRoot for ShoppingList {
    type Id = ListId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateList.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateList {
    pub list_id: ListId,
    pub owner: UserId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddItem.
///
/// `duplicate_action` is the engine's suggestion from a prior
/// `check_for_duplicate` call (None when the caller skipped the check);
/// `override_duplicate` lets the user insist after seeing a rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddItem {
    pub list_id: ListId,
    pub item: ListItem,
    pub duplicate_action: Option<SuggestedAction>,
    pub override_duplicate: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub list_id: ListId,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CheckOffItem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOffItem {
    pub list_id: ListId,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ListCommand {
    CreateList(CreateList),
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    CheckOffItem(CheckOffItem),
}

/// Event: ListCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListCreated {
    pub list_id: ListId,
    pub owner: UserId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub list_id: ListId,
    pub item: ListItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub list_id: ListId,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemCheckedOff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCheckedOff {
    pub list_id: ListId,
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ListEvent {
    ListCreated(ListCreated),
    ItemAdded(ItemAdded),
    ItemRemoved(ItemRemoved),
    ItemCheckedOff(ItemCheckedOff),
}

impl ListEvent {
    /// Stable event name (e.g. "lists.list.created").
    pub fn event_type(&self) -> &'static str {
        match self {
            ListEvent::ListCreated(_) => "lists.list.created",
            ListEvent::ItemAdded(_) => "lists.item.added",
            ListEvent::ItemRemoved(_) => "lists.item.removed",
            ListEvent::ItemCheckedOff(_) => "lists.item.checked_off",
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ListEvent::ListCreated(e) => e.occurred_at,
            ListEvent::ItemAdded(e) => e.occurred_at,
            ListEvent::ItemRemoved(e) => e.occurred_at,
            ListEvent::ItemCheckedOff(e) => e.occurred_at,
        }
    }
}

impl Aggregate for ShoppingList {
    type Command = ListCommand;
    type Event = ListEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ListEvent::ListCreated(e) => {
                self.id = e.list_id;
                self.owner = Some(e.owner);
                self.name = e.name.clone();
                self.items.clear();
                self.created = true;
            }
            ListEvent::ItemAdded(e) => {
                self.items.push(e.item.clone());
            }
            ListEvent::ItemRemoved(e) => {
                self.items.retain(|item| item.id != e.item_id);
            }
            ListEvent::ItemCheckedOff(e) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id == e.item_id) {
                    item.checked = true;
                }
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ListCommand::CreateList(cmd) => self.handle_create(cmd),
            ListCommand::AddItem(cmd) => self.handle_add(cmd),
            ListCommand::RemoveItem(cmd) => self.handle_remove(cmd),
            ListCommand::CheckOffItem(cmd) => self.handle_check_off(cmd),
        }
    }
}

impl ShoppingList {
    fn ensure_list_id(&self, list_id: ListId) -> Result<(), DomainError> {
        if self.id != list_id {
            return Err(DomainError::invariant("list_id mismatch"));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateList) -> Result<Vec<ListEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("list already exists"));
        }
        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("list name cannot be empty"));
        }
        Ok(vec![ListEvent::ListCreated(ListCreated {
            list_id: cmd.list_id,
            owner: cmd.owner,
            name: cmd.name.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add(&self, cmd: &AddItem) -> Result<Vec<ListEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_list_id(cmd.list_id)?;

        if cmd.item.product_name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if self.items.iter().any(|item| item.id == cmd.item.id) {
            return Err(DomainError::conflict("item already on the list"));
        }

        // A reject-tier duplicate decision blocks the add unless the user
        // explicitly overrides; merge/allow stay with the caller/UI.
        if cmd.duplicate_action == Some(SuggestedAction::Reject) && !cmd.override_duplicate {
            return Err(DomainError::conflict(
                "duplicate item rejected by duplicate check",
            ));
        }

        Ok(vec![ListEvent::ItemAdded(ItemAdded {
            list_id: cmd.list_id,
            item: cmd.item.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Result<Vec<ListEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_list_id(cmd.list_id)?;

        if !self.items.iter().any(|item| item.id == cmd.item_id) {
            return Err(DomainError::not_found());
        }

        Ok(vec![ListEvent::ItemRemoved(ItemRemoved {
            list_id: cmd.list_id,
            item_id: cmd.item_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_check_off(&self, cmd: &CheckOffItem) -> Result<Vec<ListEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_list_id(cmd.list_id)?;

        let item = self
            .items
            .iter()
            .find(|item| item.id == cmd.item_id)
            .ok_or_else(DomainError::not_found)?;
        if item.checked {
            return Err(DomainError::conflict("item already checked off"));
        }

        Ok(vec![ListEvent::ItemCheckedOff(ItemCheckedOff {
            list_id: cmd.list_id,
            item_id: cmd.item_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_list_id() -> ListId {
        ListId::new()
    }

    fn test_owner() -> UserId {
        UserId::new()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn created_list(list_id: ListId) -> ShoppingList {
        let mut list = ShoppingList::empty(list_id);
        let events = list
            .handle(&ListCommand::CreateList(CreateList {
                list_id,
                owner: test_owner(),
                name: "Weekly groceries".to_string(),
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            list.apply(event);
        }
        list
    }

    fn add_item_cmd(list_id: ListId, name: &str) -> AddItem {
        AddItem {
            list_id,
            item: ListItem::new(name),
            duplicate_action: None,
            override_duplicate: false,
            occurred_at: test_time(),
        }
    }

    #[test]
    fn create_list_emits_list_created() {
        let list_id = test_list_id();
        let owner = test_owner();
        let list = ShoppingList::empty(list_id);

        let events = list
            .handle(&ListCommand::CreateList(CreateList {
                list_id,
                owner,
                name: "Weekly groceries".to_string(),
                occurred_at: test_time(),
            }))
            .unwrap();

        assert_eq!(events.len(), 1);
        match &events[0] {
            ListEvent::ListCreated(e) => {
                assert_eq!(e.list_id, list_id);
                assert_eq!(e.owner, owner);
                assert_eq!(e.name, "Weekly groceries");
            }
            other => panic!("expected ListCreated, got {other:?}"),
        }
        assert_eq!(events[0].event_type(), "lists.list.created");
    }

    #[test]
    fn create_rejects_blank_name() {
        let list_id = test_list_id();
        let list = ShoppingList::empty(list_id);
        let err = list
            .handle(&ListCommand::CreateList(CreateList {
                list_id,
                owner: test_owner(),
                name: "   ".to_string(),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn add_item_appends_and_bumps_version() {
        let list_id = test_list_id();
        let mut list = created_list(list_id);
        let version_before = list.version();

        let events = list
            .handle(&ListCommand::AddItem(add_item_cmd(list_id, "Milk")))
            .unwrap();
        for event in &events {
            list.apply(event);
        }

        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].product_name, "Milk");
        assert_eq!(list.version(), version_before + 1);
    }

    #[test]
    fn add_to_missing_list_is_not_found() {
        let list_id = test_list_id();
        let list = ShoppingList::empty(list_id);
        let err = list
            .handle(&ListCommand::AddItem(add_item_cmd(list_id, "Milk")))
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn reject_decision_blocks_the_add() {
        let list_id = test_list_id();
        let list = created_list(list_id);

        let mut cmd = add_item_cmd(list_id, "milk");
        cmd.duplicate_action = Some(SuggestedAction::Reject);

        let err = list.handle(&ListCommand::AddItem(cmd)).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn user_override_defeats_the_reject_decision() {
        let list_id = test_list_id();
        let list = created_list(list_id);

        let mut cmd = add_item_cmd(list_id, "milk");
        cmd.duplicate_action = Some(SuggestedAction::Reject);
        cmd.override_duplicate = true;

        let events = list.handle(&ListCommand::AddItem(cmd)).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn merge_and_allow_decisions_do_not_block() {
        let list_id = test_list_id();
        let list = created_list(list_id);

        for action in [SuggestedAction::Merge, SuggestedAction::Allow] {
            let mut cmd = add_item_cmd(list_id, "yogurt");
            cmd.duplicate_action = Some(action);
            assert!(list.handle(&ListCommand::AddItem(cmd)).is_ok());
        }
    }

    #[test]
    fn remove_and_check_off_round_trip() {
        let list_id = test_list_id();
        let mut list = created_list(list_id);

        let add = add_item_cmd(list_id, "Bread");
        let item_id = add.item.id;
        let events = list.handle(&ListCommand::AddItem(add)).unwrap();
        for event in &events {
            list.apply(event);
        }

        let events = list
            .handle(&ListCommand::CheckOffItem(CheckOffItem {
                list_id,
                item_id,
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            list.apply(event);
        }
        assert!(list.items()[0].checked);

        // Checking off twice is a conflict.
        let err = list
            .handle(&ListCommand::CheckOffItem(CheckOffItem {
                list_id,
                item_id,
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let events = list
            .handle(&ListCommand::RemoveItem(RemoveItem {
                list_id,
                item_id,
                occurred_at: test_time(),
            }))
            .unwrap();
        for event in &events {
            list.apply(event);
        }
        assert!(list.items().is_empty());
    }

    #[test]
    fn remove_missing_item_is_not_found() {
        let list_id = test_list_id();
        let list = created_list(list_id);
        let err = list
            .handle(&ListCommand::RemoveItem(RemoveItem {
                list_id,
                item_id: ItemId::new(),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: handle is deterministic and does not mutate state.
            #[test]
            fn handle_is_deterministic(name in "[A-Za-z][A-Za-z0-9 ]{0,40}") {
                let list_id = test_list_id();
                let list = created_list(list_id);
                let state_before = list.clone();

                let cmd = ListCommand::AddItem(add_item_cmd(list_id, &name));
                let events1 = list.handle(&cmd);
                let events2 = list.handle(&cmd);

                prop_assert_eq!(&state_before, &list);
                prop_assert_eq!(events1, events2);
            }

            /// Property: apply is deterministic (same events, same state).
            #[test]
            fn apply_is_deterministic(names in proptest::collection::vec("[a-z]{1,12}", 1..5)) {
                let list_id = test_list_id();
                let base = created_list(list_id);

                let mut events = Vec::new();
                let mut staging = base.clone();
                for name in &names {
                    let emitted = staging
                        .handle(&ListCommand::AddItem(add_item_cmd(list_id, name)))
                        .unwrap();
                    for event in &emitted {
                        staging.apply(event);
                    }
                    events.extend(emitted);
                }

                let mut replay_a = base.clone();
                let mut replay_b = base.clone();
                for event in &events {
                    replay_a.apply(event);
                    replay_b.apply(event);
                }

                prop_assert_eq!(&replay_a, &replay_b);
                prop_assert_eq!(replay_a.items().len(), names.len());
            }
        }
    }
}
