use serenity::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::server::{
    error::discord::DiscordApiError,
    model::{
        discord::{GuildMember, GuildRole},
        registration::{RegistrationRoleFields, TeamMode},
        role_sync::{RoleAssignmentOutcome, RoleSyncLimits},
    },
    service::{
        role_store::{RoleStore, SyncSession},
        role_sync::RoleSyncService,
    },
};


const GUILD_ID: u64 = 1000;
const BOT_USER_ID: u64 = 99;
const BOT_ROLE_ID: u64 = 1;
const BOT_ROLE_POSITION: i64 = 10;
const USER_ID: u64 = 42;

/// Discord call recorded by [`FakeRoleStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    ListRoles,
    CreateRole(String),
    GetMember(u64),
    AssignRole(u64, u64),
    CurrentUser,
}

struct FakeState {
    roles: Vec<GuildRole>,
    members: HashMap<u64, HashSet<u64>>,
    next_role_id: u64,
    fail_list: bool,
    fail_create: HashSet<String>,
    fail_assign: HashSet<u64>,
    calls: Vec<Call>,
}

/// In-memory guild standing in for Discord.
///
/// Starts with a single "Bot" role at position 10 held by the bot user. Roles created
/// through the store land at position 1.
struct FakeRoleStore {
    state: Mutex<FakeState>,
    assign_delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeRoleStore {
    fn new() -> Self {
        let mut members = HashMap::new();
        members.insert(BOT_USER_ID, HashSet::from([BOT_ROLE_ID]));
        members.insert(USER_ID, HashSet::new());

        Self {
            state: Mutex::new(FakeState {
                roles: vec![GuildRole {
                    id: BOT_ROLE_ID,
                    name: "Bot".to_string(),
                    position: BOT_ROLE_POSITION,
                }],
                members,
                next_role_id: 500,
                fail_list: false,
                fail_create: HashSet::new(),
                fail_assign: HashSet::new(),
                calls: Vec::new(),
            }),
            assign_delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    fn with_role(self, id: u64, name: &str, position: i64) -> Self {
        self.state.lock().unwrap().roles.push(GuildRole {
            id,
            name: name.to_string(),
            position,
        });
        self
    }

    fn with_member_roles(self, user_id: u64, role_ids: &[u64]) -> Self {
        self.state
            .lock()
            .unwrap()
            .members
            .insert(user_id, role_ids.iter().copied().collect());
        self
    }

    fn failing_list(self) -> Self {
        self.state.lock().unwrap().fail_list = true;
        self
    }

    fn failing_create(self, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .fail_create
            .insert(name.to_lowercase());
        self
    }

    fn failing_assign(self, role_id: u64) -> Self {
        self.state.lock().unwrap().fail_assign.insert(role_id);
        self
    }

    fn with_assign_delay(mut self, delay: Duration) -> Self {
        self.assign_delay = delay;
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    fn count_calls(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    fn role_id_by_name(&self, name: &str) -> Option<u64> {
        self.state
            .lock()
            .unwrap()
            .roles
            .iter()
            .find(|role| role.name.eq_ignore_ascii_case(name))
            .map(|role| role.id)
    }

    fn member_role_names(&self, user_id: u64) -> BTreeSet<String> {
        let state = self.state.lock().unwrap();
        let held = state.members.get(&user_id).cloned().unwrap_or_default();
        state
            .roles
            .iter()
            .filter(|role| held.contains(&role.id))
            .map(|role| role.name.clone())
            .collect()
    }

    fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleStore for FakeRoleStore {
    async fn list_roles(&self, _guild_id: u64) -> Result<Vec<GuildRole>, DiscordApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListRoles);
        if state.fail_list {
            return Err(DiscordApiError::Timeout {
                operation: "get_guild_roles",
                timeout_ms: 7000,
            });
        }
        Ok(state.roles.clone())
    }

    async fn create_role(&self, _guild_id: u64, name: &str) -> Result<GuildRole, DiscordApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreateRole(name.to_string()));
        if state.fail_create.contains(&name.to_lowercase()) {
            return Err(DiscordApiError::request(
                "create_role",
                serenity::Error::Other("Missing Permissions"),
            ));
        }

        let role = GuildRole {
            id: state.next_role_id,
            name: name.to_string(),
            position: 1,
        };
        state.next_role_id += 1;
        state.roles.push(role.clone());
        Ok(role)
    }

    async fn get_member(
        &self,
        _guild_id: u64,
        user_id: u64,
    ) -> Result<GuildMember, DiscordApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::GetMember(user_id));
        match state.members.get(&user_id) {
            Some(role_ids) => Ok(GuildMember {
                user_id,
                role_ids: role_ids.clone(),
            }),
            None => Err(DiscordApiError::request(
                "get_member",
                serenity::Error::Other("Unknown Member"),
            )),
        }
    }

    async fn assign_role(
        &self,
        _guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), DiscordApiError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if !self.assign_delay.is_zero() {
            tokio::time::sleep(self.assign_delay).await;
        }

        let result = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::AssignRole(user_id, role_id));
            if state.fail_assign.contains(&role_id) {
                Err(DiscordApiError::Timeout {
                    operation: "add_member_role",
                    timeout_ms: 7000,
                })
            } else {
                state.members.entry(user_id).or_default().insert(role_id);
                Ok(())
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn current_user_id(&self) -> Result<u64, DiscordApiError> {
        self.state.lock().unwrap().calls.push(Call::CurrentUser);
        Ok(BOT_USER_ID)
    }
}

/// Registration mapping to "Free Agent", "Interest: AI", "Interest: Robotics" and
/// "School: McGill".
fn sample_registration() -> RegistrationRoleFields {
    RegistrationRoleFields {
        interests: Some(vec!["AI".to_string(), "Robotics".to_string()]),
        school: Some("McGill".to_string()),
        team_mode: Some(TeamMode::FreeAgent),
        ..Default::default()
    }
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}

async fn sync(
    store: &FakeRoleStore,
    session: &SyncSession,
    limits: RoleSyncLimits,
    registration: &RegistrationRoleFields,
) -> Result<RoleAssignmentOutcome, DiscordApiError> {
    RoleSyncService::new(store, session, limits)
        .sync_member_roles(GUILD_ID, USER_ID, registration)
        .await
}
