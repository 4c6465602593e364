//! In-memory integration tests for account lifecycle flows.

use std::sync::Arc;

use pensum::identity::{
    adapters::memory::{InMemoryAuthProvider, InMemoryUserRepository, RecordingMailer},
    ports::{ResetToken, UserRepository},
    services::{AccountService, RegisterRequest},
};
use pensum::task::{
    adapters::memory::InMemoryTaskRepository,
    services::{CreateTaskRequest, TaskLifecycleService},
};
use rstest::{fixture, rstest};

use super::helpers::{base_time, FixedClock};

type TestAccountService = AccountService<
    InMemoryUserRepository,
    InMemoryAuthProvider,
    RecordingMailer,
    InMemoryTaskRepository,
    FixedClock,
>;

struct Stack {
    accounts: TestAccountService,
    tasks: TaskLifecycleService<InMemoryTaskRepository, FixedClock>,
    users: Arc<InMemoryUserRepository>,
    auth: Arc<InMemoryAuthProvider>,
    mailer: RecordingMailer,
}

#[fixture]
fn stack() -> Stack {
    let users = Arc::new(InMemoryUserRepository::new());
    let auth = Arc::new(InMemoryAuthProvider::new());
    let mailer = RecordingMailer::new();
    let tasks = TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(FixedClock(base_time())),
    );
    let accounts = AccountService::new(
        Arc::clone(&users),
        Arc::clone(&auth),
        Arc::new(mailer.clone()),
        tasks.clone(),
    );
    Stack {
        accounts,
        tasks,
        users,
        auth,
        mailer,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_account_journey(stack: Stack) {
    // Register and sign in.
    let user = stack
        .accounts
        .register(RegisterRequest::new(
            "carol@example.com",
            "Carol",
            "Lang",
            "initial passphrase",
            "initial passphrase",
        ))
        .await
        .expect("registration should succeed");
    let session = stack
        .accounts
        .sign_in("carol@example.com", "initial passphrase")
        .await
        .expect("sign-in should succeed");

    // The session resolves to the stored user record.
    let resolved = stack
        .accounts
        .current_user(Some(&session))
        .await
        .expect("session should resolve");
    assert_eq!(resolved.id(), user.id());

    // Recover the password via the emailed token.
    stack
        .accounts
        .forgot_password("carol@example.com")
        .await
        .expect("recovery request should succeed");
    let sent = stack.mailer.sent().expect("outbox readable");
    let token_value = sent
        .last()
        .expect("one recovery email")
        .body()
        .lines()
        .map(str::trim)
        .find(|line| uuid::Uuid::parse_str(line).is_ok())
        .expect("body contains the token")
        .to_owned();
    stack
        .accounts
        .reset_password(
            "carol@example.com",
            &ResetToken::new(token_value),
            "recovered passphrase",
            "recovered passphrase",
        )
        .await
        .expect("reset should succeed");
    assert!(stack
        .accounts
        .sign_in("carol@example.com", "recovered passphrase")
        .await
        .is_ok());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn account_deletion_leaves_no_orphans(stack: Stack) {
    let user = stack
        .accounts
        .register(RegisterRequest::new(
            "dave@example.com",
            "Dave",
            "Nguyen",
            "daves passphrase",
            "daves passphrase",
        ))
        .await
        .expect("registration should succeed");
    let session = stack
        .accounts
        .sign_in("dave@example.com", "daves passphrase")
        .await
        .expect("sign-in should succeed");

    for summary in ["water plants", "fix bike", "call bank"] {
        stack
            .tasks
            .create(user.id(), CreateTaskRequest::new(summary))
            .await
            .expect("task creation should succeed");
    }

    stack
        .accounts
        .delete_account(&session)
        .await
        .expect("account deletion should succeed");

    let board = stack.tasks.list(user.id()).await.expect("listing");
    assert!(board.is_empty(), "no orphaned task rows may remain");
    assert!(stack
        .users
        .find_by_id(user.id())
        .await
        .expect("lookup")
        .is_none());
    assert_eq!(
        stack.auth.open_sessions().expect("session count"),
        0,
        "the deleted account's session must be closed"
    );
}
