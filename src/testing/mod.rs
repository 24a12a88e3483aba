use serde_json::json;

use crate::access::TokenPayload;
use crate::database::models::{Color, ModuleRecord, User};
use crate::database::{MemoryStore, Store};
use crate::types::UserId;

/// In-memory store seeded with two users and two colors
pub struct TestContext {
    store: MemoryStore,
    pub alice: User,
    pub bob: User,
    pub red: Color,
    pub blue: Color,
}

impl TestContext {
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        let alice = store
            .create_user("Alice", "alice@test.test")
            .await
            .expect("seed alice");
        let bob = store.create_user("Bob", "bob@test.test").await.expect("seed bob");
        let red = store.create_color("Red", "#ff0000").await.expect("seed red");
        let blue = store.create_color("Blue", "#0000ff").await.expect("seed blue");

        Self {
            store,
            alice,
            bob,
            red,
            blue,
        }
    }

    pub fn store(&self) -> &dyn Store {
        &self.store
    }

    /// Token payload as the middleware would attach it
    pub fn payload(&self, user_id: UserId) -> TokenPayload {
        TokenPayload(json!({ "user": { "id": user_id } }))
    }

    pub async fn module(&self, owner: UserId, name: &str) -> ModuleRecord {
        self.store
            .create_module(name, owner)
            .await
            .expect("seed module")
    }
}
