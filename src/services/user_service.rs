use serde_json::{Map, Value};

use crate::access::fields::{self, UserField};
use crate::access::guard::{self, Target};
use crate::access::{identity, locator, AccessError, TokenPayload, WriteOp};
use crate::database::models::{Color, ModuleRecord, User};
use crate::database::Store;
use crate::types::{Operation, ResourceKind};

/// User with the modules they own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: User,
    pub modules: Vec<ModuleRecord>,
}

pub struct UserService<'a> {
    store: &'a dyn Store,
}

impl<'a> UserService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    async fn profile(&self, user: User) -> Result<UserProfile, AccessError> {
        let modules = self.store.modules_by_owner(user.id).await?;
        Ok(UserProfile { user, modules })
    }

    pub async fn read_self(&self, payload: Option<&TokenPayload>) -> Result<UserProfile, AccessError> {
        let caller = identity::authenticate(self.store, payload).await?;
        self.profile(caller).await
    }

    pub async fn read(
        &self,
        payload: Option<&TokenPayload>,
        raw_user_id: Option<&str>,
    ) -> Result<UserProfile, AccessError> {
        let caller = identity::authenticate(self.store, payload).await?;
        let user = locator::find_user(self.store, raw_user_id).await?;
        let user = guard::authorize_user(Operation::ReadUser, &caller, user)?;
        self.profile(user).await
    }

    /// Rename a user. Only the user themself may do this.
    pub async fn edit(
        &self,
        payload: Option<&TokenPayload>,
        raw_user_id: Option<&str>,
        body: &Map<String, Value>,
    ) -> Result<UserProfile, AccessError> {
        let caller = identity::authenticate(self.store, payload).await?;
        let raw_user_id = raw_user_id.ok_or(AccessError::InvalidUserId)?;
        let user = locator::find_user(self.store, Some(raw_user_id)).await?;
        let mut user = guard::authorize_user(Operation::EditUser, &caller, user)?;

        let projected = fields::project(body, fields::USER_FIELDS);
        if projected.is_empty() {
            return Err(AccessError::InvalidContent);
        }
        for update in UserField::parse_all(&projected)? {
            update.apply(&mut user);
        }

        self.store.save_user(&user).await.map_err(|e| {
            tracing::warn!(user = user.id, "User save failed: {}", e);
            AccessError::persistence(ResourceKind::User, WriteOp::Save)
        })?;

        self.profile(user).await
    }

    pub async fn colors(&self, payload: Option<&TokenPayload>) -> Result<Vec<Color>, AccessError> {
        let caller = identity::authenticate(self.store, payload).await?;
        guard::decide(Operation::ListColors, Some(&caller), Target::None).into_result()?;
        Ok(self.store.colors().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::ForbiddenReason;
    use crate::testing::TestContext;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => Map::new(),
        }
    }

    #[tokio::test]
    async fn profile_lists_owned_modules() {
        let ctx = TestContext::new().await;
        ctx.module(ctx.alice.id, "one").await;
        ctx.module(ctx.bob.id, "two").await;

        let service = UserService::new(ctx.store());
        let me = service.read_self(Some(&ctx.payload(ctx.alice.id))).await.unwrap();
        assert_eq!(me.user, ctx.alice);
        assert_eq!(me.modules.len(), 1);
        assert_eq!(me.modules[0].module.name, "one");
    }

    #[tokio::test]
    async fn renaming_someone_else_is_forbidden() {
        let ctx = TestContext::new().await;
        let service = UserService::new(ctx.store());
        let raw = ctx.bob.id.to_string();
        let err = service
            .edit(Some(&ctx.payload(ctx.alice.id)), Some(&raw), &body(json!({ "name": "x" })))
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Forbidden(ForbiddenReason::EditUser)));
    }

    #[tokio::test]
    async fn rename_requires_id_and_name() {
        let ctx = TestContext::new().await;
        let service = UserService::new(ctx.store());
        let me = ctx.payload(ctx.alice.id);
        let raw = ctx.alice.id.to_string();

        let err = service.edit(Some(&me), None, &body(json!({ "name": "x" }))).await.unwrap_err();
        assert!(matches!(err, AccessError::InvalidUserId));

        let err = service.edit(Some(&me), Some(&raw), &body(json!({ "email": "x" }))).await.unwrap_err();
        assert!(matches!(err, AccessError::InvalidContent));

        let renamed = service
            .edit(Some(&me), Some(&raw), &body(json!({ "name": "Alice B", "email": "new@x" })))
            .await
            .unwrap();
        assert_eq!(renamed.user.name, "Alice B");
        assert_eq!(renamed.user.email, ctx.alice.email);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let ctx = TestContext::new().await;
        let service = UserService::new(ctx.store());
        let err = service
            .read(Some(&ctx.payload(ctx.alice.id)), Some("9999"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::NotFound(ResourceKind::User)));
    }

    #[tokio::test]
    async fn colors_require_identity() {
        let ctx = TestContext::new().await;
        let service = UserService::new(ctx.store());
        assert!(matches!(
            service.colors(None).await.unwrap_err(),
            AccessError::Unauthenticated
        ));
        assert_eq!(service.colors(Some(&ctx.payload(ctx.bob.id))).await.unwrap().len(), 2);
    }
}
