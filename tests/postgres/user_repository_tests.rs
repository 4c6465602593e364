//! User repository tests against embedded `PostgreSQL`.

use crate::postgres::helpers::{
    CleanupGuard, PostgresCluster, ensure_template, postgres_cluster, setup_repositories,
    test_runtime,
};
use pensum::identity::adapters::postgres::PostgresUserRepository;
use pensum::identity::domain::{EmailAddress, User, UserId};
use pensum::identity::ports::{UserRepository, UserRepositoryError};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

struct UserTestContext {
    guard: CleanupGuard<'static>,
    users: PostgresUserRepository,
    rt: Runtime,
}

impl UserTestContext {
    fn cleanup(self) {
        drop(self.users);
        self.guard.cleanup().expect("cleanup database");
    }
}

#[fixture]
fn user_context(postgres_cluster: PostgresCluster) -> UserTestContext {
    let cluster = postgres_cluster;
    ensure_template(cluster).expect("template setup");
    let db_name = format!("test_users_{}", uuid::Uuid::new_v4());
    let guard = CleanupGuard::new(cluster, db_name.clone());
    let (_tasks, users) = setup_repositories(cluster, &db_name).expect("repository setup");
    let rt = test_runtime().expect("tokio runtime");
    UserTestContext { guard, users, rt }
}

fn sample_user(id: &str, email: &str) -> User {
    User::new(
        UserId::new(id).expect("valid user id"),
        EmailAddress::new(email).expect("valid email"),
        "Alice",
        "Larkin",
    )
}

#[rstest]
fn store_and_find_user_by_id_and_email(user_context: UserTestContext) {
    let context = user_context;

    let user = sample_user("user-1", "Alice@Example.com");
    context.rt.block_on(context.users.store(&user)).expect("store");

    let by_id = context
        .rt
        .block_on(context.users.find_by_id(user.id()))
        .expect("find_by_id")
        .expect("user should exist");
    assert_eq!(by_id.email().as_str(), "alice@example.com");
    assert_eq!(by_id.first_name(), "Alice");
    assert_eq!(by_id.last_name(), "Larkin");

    let by_email = context
        .rt
        .block_on(context.users.find_by_email(user.email()))
        .expect("find_by_email")
        .expect("user should exist");
    assert_eq!(by_email.id(), user.id());

    context.cleanup();
}

#[rstest]
fn find_by_email_returns_none_for_unknown(user_context: UserTestContext) {
    let context = user_context;

    let email = EmailAddress::new("nobody@example.com").expect("valid email");
    let result = context
        .rt
        .block_on(context.users.find_by_email(&email))
        .expect("query ok");
    assert!(result.is_none());

    context.cleanup();
}

#[rstest]
fn duplicate_email_maps_to_duplicate_email(user_context: UserTestContext) {
    let context = user_context;

    let first = sample_user("user-1", "alice@example.com");
    let second = sample_user("user-2", "alice@example.com");
    context.rt.block_on(context.users.store(&first)).expect("store");

    // The unique index on users.email must surface as the email-specific
    // variant, not the identifier one.
    let err = context
        .rt
        .block_on(context.users.store(&second))
        .expect_err("second store must fail");

    assert!(
        matches!(err, UserRepositoryError::DuplicateEmail(ref email) if email == second.email()),
        "expected DuplicateEmail, got {err:?}",
    );

    context.cleanup();
}

#[rstest]
fn duplicate_id_maps_to_duplicate_user(user_context: UserTestContext) {
    let context = user_context;

    let first = sample_user("user-1", "alice@example.com");
    let imposter = sample_user("user-1", "other@example.com");
    context.rt.block_on(context.users.store(&first)).expect("store");

    let err = context
        .rt
        .block_on(context.users.store(&imposter))
        .expect_err("second store must fail");

    assert!(
        matches!(err, UserRepositoryError::DuplicateUser(ref id) if id == imposter.id()),
        "expected DuplicateUser, got {err:?}",
    );

    context.cleanup();
}

#[rstest]
fn delete_reports_not_found_for_missing_user(user_context: UserTestContext) {
    let context = user_context;

    let missing = UserId::new("user-missing").expect("valid user id");
    let err = context
        .rt
        .block_on(context.users.delete(&missing))
        .expect_err("delete of a missing user must fail");

    assert!(matches!(err, UserRepositoryError::NotFound(ref id) if id == &missing));

    context.cleanup();
}
