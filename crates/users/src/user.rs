//! User records and the directory that holds them.

use core::str::FromStr;
use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use deskerp_core::{
    Aggregate, AggregateRoot, DomainError, Entity, RecordFilter, RecordId, Searchable, locate,
    lookup,
    error::{require_email, require_non_blank},
};
use deskerp_events::Event;

// ─────────────────────────────────────────────────────────────────────────────
// User Status
// ─────────────────────────────────────────────────────────────────────────────

/// User account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn label(self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
        }
    }
}

impl core::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(UserStatus::Active),
            "Inactive" => Ok(UserStatus::Inactive),
            other => Err(DomainError::validation(format!("unknown user status: {other}"))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User Record
// ─────────────────────────────────────────────────────────────────────────────

/// Values captured by the add/edit user dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: UserStatus,
}

impl UserForm {
    fn validate(&self) -> Result<(), DomainError> {
        require_non_blank("name", &self.name)?;
        require_email("email", &self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    /// Free-form role label ("Admin", "Manager", ...).
    pub role: String,
    pub status: UserStatus,
    pub created_at: NaiveDate,
}

impl User {
    pub fn new(id: RecordId, created_at: NaiveDate, form: UserForm) -> Self {
        Self {
            id,
            name: form.name,
            email: form.email,
            role: form.role,
            status: form.status,
            created_at,
        }
    }

    pub fn to_form(&self) -> UserForm {
        UserForm {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            status: self.status,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

impl Entity for User {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.email.as_str()),
            Cow::Borrowed(self.role.as_str()),
        ]
    }

    fn category(&self) -> &str {
        self.status.label()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands & Events
// ─────────────────────────────────────────────────────────────────────────────

/// Command: AddUser. `created_at` is taken from `occurred_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddUser {
    pub user_id: RecordId,
    pub form: UserForm,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateUser. Keeps `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUser {
    pub user_id: RecordId,
    pub form: UserForm,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveUser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveUser {
    pub user_id: RecordId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserCommand {
    AddUser(AddUser),
    UpdateUser(UpdateUser),
    RemoveUser(RemoveUser),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAdded {
    pub user: User,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdated {
    pub user: User,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRemoved {
    pub user_id: RecordId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserEvent {
    UserAdded(UserAdded),
    UserUpdated(UserUpdated),
    UserRemoved(UserRemoved),
}

impl Event for UserEvent {
    fn event_type(&self) -> &'static str {
        match self {
            UserEvent::UserAdded(_) => "users.user.added",
            UserEvent::UserUpdated(_) => "users.user.updated",
            UserEvent::UserRemoved(_) => "users.user.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            UserEvent::UserAdded(e) => e.occurred_at,
            UserEvent::UserUpdated(e) => e.occurred_at,
            UserEvent::UserRemoved(e) => e.occurred_at,
        }
    }

    fn record_id(&self) -> RecordId {
        match self {
            UserEvent::UserAdded(e) => e.user.id,
            UserEvent::UserUpdated(e) => e.user.id,
            UserEvent::UserRemoved(e) => e.user_id,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User Directory Aggregate
// ─────────────────────────────────────────────────────────────────────────────

/// Aggregate: the users screen's list.
///
/// # Invariants
/// - User ids are unique.
/// - `created_at` never changes after the user is added.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDirectory {
    users: Vec<User>,
    version: u64,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, user_id: RecordId) -> Option<&User> {
        lookup(&self.users, user_id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.users.iter().filter(|user| user.is_active()).count()
    }

    pub fn filtered(&self, filter: &RecordFilter) -> Vec<&User> {
        filter.apply(&self.users)
    }

    fn position(&self, user_id: RecordId) -> Option<usize> {
        locate(&self.users, user_id)
    }

    fn handle_add(&self, cmd: &AddUser) -> Result<Vec<UserEvent>, DomainError> {
        if self.position(cmd.user_id).is_some() {
            return Err(DomainError::conflict("user already exists"));
        }
        cmd.form.validate()?;
        Ok(vec![UserEvent::UserAdded(UserAdded {
            user: User::new(cmd.user_id, cmd.occurred_at.date_naive(), cmd.form.clone()),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdateUser) -> Result<Vec<UserEvent>, DomainError> {
        let existing = self.get(cmd.user_id).ok_or_else(DomainError::not_found)?;
        cmd.form.validate()?;
        Ok(vec![UserEvent::UserUpdated(UserUpdated {
            user: User::new(existing.id, existing.created_at, cmd.form.clone()),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveUser) -> Result<Vec<UserEvent>, DomainError> {
        if self.position(cmd.user_id).is_none() {
            return Err(DomainError::not_found());
        }
        Ok(vec![UserEvent::UserRemoved(UserRemoved {
            user_id: cmd.user_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}

impl AggregateRoot for UserDirectory {
    const KIND: &'static str = "users";

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for UserDirectory {
    type Command = UserCommand;
    type Event = UserEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            UserEvent::UserAdded(e) => self.users.push(e.user.clone()),
            UserEvent::UserUpdated(e) => {
                if let Some(idx) = self.position(e.user.id) {
                    self.users[idx] = e.user.clone();
                }
            }
            UserEvent::UserRemoved(e) => self.users.retain(|user| user.id != e.user_id),
        }
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let result = match command {
            UserCommand::AddUser(cmd) => self.handle_add(cmd),
            UserCommand::UpdateUser(cmd) => self.handle_update(cmd),
            UserCommand::RemoveUser(cmd) => self.handle_remove(cmd),
        };
        if let Err(err) = &result {
            tracing::warn!(book = Self::KIND, error = %err, "user command rejected");
        }
        result
    }
}
