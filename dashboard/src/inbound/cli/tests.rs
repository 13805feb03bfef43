//! Command coverage against mocked directories and in-memory storage.

use pagination::{Page, PageRequest};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{FixtureAuthService, MockUserDirectory};
use crate::domain::{AuthToken, ErrorCode, NewUser};
use crate::outbound::storage::MemoryKeyValueStore;

#[fixture]
fn storage() -> Arc<MemoryKeyValueStore> {
    Arc::new(MemoryKeyValueStore::default())
}

fn services(directory: MockUserDirectory, storage: &Arc<MemoryKeyValueStore>) -> Services {
    Services {
        directory: Arc::new(directory),
        auth: Arc::new(FixtureAuthService),
        storage: storage.clone(),
        page_size: PageSize::DASHBOARD,
        system_theme: Theme::Light,
    }
}

fn user(id: u64) -> User {
    User::from_new(
        UserId::new(id),
        NewUser::new(format!("user{id}@reqres.in"), format!("First{id}"), "Last"),
    )
}

fn signed_in(storage: &Arc<MemoryKeyValueStore>) {
    let mut session = SessionStore::init(storage.clone());
    session
        .login(AuthToken::new("reqres-free-v1"), user(1))
        .expect("seed session");
}

fn fields(first_name: Option<&str>, last_name: Option<&str>, email: Option<&str>) -> UserFields {
    UserFields {
        first_name: first_name.map(str::to_owned),
        last_name: last_name.map(str::to_owned),
        email: email.map(str::to_owned),
    }
}

async fn run_to_string(command: Command, services: &Services) -> (Result<(), CliError>, String) {
    let mut out = Vec::new();
    let result = run(command, services, &mut out).await;
    (result, String::from_utf8(out).expect("utf-8 output"))
}

#[rstest]
#[tokio::test]
async fn sign_in_prints_field_errors_for_bad_email(storage: Arc<MemoryKeyValueStore>) {
    let services = services(MockUserDirectory::new(), &storage);

    let (result, output) = run_to_string(
        Command::SignIn {
            email: "not-an-email".to_owned(),
            password: "secret".to_owned(),
        },
        &services,
    )
    .await;

    assert!(matches!(result, Err(CliError::InvalidForm)));
    assert_eq!(output, "  email: Please enter a valid email address\n");
    assert!(!SessionStore::init(storage).is_authenticated());
}

#[rstest]
#[tokio::test]
async fn sign_in_then_whoami_reports_session(storage: Arc<MemoryKeyValueStore>) {
    let services = services(MockUserDirectory::new(), &storage);

    let (result, output) = run_to_string(
        Command::SignIn {
            email: "ada@example.com".to_owned(),
            password: "x".to_owned(),
        },
        &services,
    )
    .await;
    result.expect("sign in");
    assert_eq!(output, "Signed in as ada@example.com User <ada@example.com>\n");

    let (result, output) = run_to_string(Command::Whoami, &services).await;
    result.expect("whoami");
    assert_eq!(output, "ada@example.com User <ada@example.com>\n");

    let (result, _) = run_to_string(Command::SignOut, &services).await;
    result.expect("sign out");
    let (_, output) = run_to_string(Command::Whoami, &services).await;
    assert_eq!(output, "Not signed in\n");
}

#[rstest]
#[tokio::test]
async fn sign_up_reports_password_mismatch(storage: Arc<MemoryKeyValueStore>) {
    let services = services(MockUserDirectory::new(), &storage);

    let (result, output) = run_to_string(
        Command::SignUp {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "password123".to_owned(),
            confirm_password: "password456".to_owned(),
        },
        &services,
    )
    .await;

    assert!(matches!(result, Err(CliError::InvalidForm)));
    assert_eq!(output, "  confirmPassword: Passwords do not match\n");
}

#[rstest]
#[tokio::test]
async fn listing_requires_a_session(storage: Arc<MemoryKeyValueStore>) {
    let services = services(MockUserDirectory::new(), &storage);

    let (result, output) = run_to_string(Command::List { page: 1 }, &services).await;

    match result {
        Err(CliError::Domain(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
        other => panic!("expected unauthorized, got {other:?}"),
    }
    assert!(output.is_empty());
}

#[rstest]
#[tokio::test]
async fn list_prints_requested_page(storage: Arc<MemoryKeyValueStore>) {
    signed_in(&storage);
    let mut directory = MockUserDirectory::new();
    directory
        .expect_list_users()
        .times(1)
        .returning(|request: PageRequest| Ok(Page::new(request, 7, vec![user(7)])));
    let services = services(directory, &storage);

    let (result, output) = run_to_string(Command::List { page: 2 }, &services).await;

    result.expect("list");
    assert_eq!(
        output,
        "   7  First7 Last <user7@reqres.in>\nPage 2 of 2 (7 users)\n"
    );
}

#[rstest]
#[tokio::test]
async fn create_refuses_incomplete_form_without_calling_directory(
    storage: Arc<MemoryKeyValueStore>,
) {
    signed_in(&storage);
    let mut directory = MockUserDirectory::new();
    directory
        .expect_list_users()
        .returning(|request| Ok(Page::new(request, 0, Vec::new())));
    directory.expect_create_user().never();
    let services = services(directory, &storage);

    let (result, output) = run_to_string(
        Command::Create {
            page: 1,
            fields: fields(Some("New"), Some("User"), None),
        },
        &services,
    )
    .await;

    assert!(matches!(result, Err(CliError::InvalidForm)));
    assert_eq!(output, "  email: This field is required\n");
}

#[rstest]
#[tokio::test]
async fn create_inserts_at_head_of_full_page(storage: Arc<MemoryKeyValueStore>) {
    signed_in(&storage);
    let mut directory = MockUserDirectory::new();
    directory
        .expect_list_users()
        .times(1)
        .returning(|request| Ok(Page::new(request, 12, (1..=6).map(user).collect())));
    directory
        .expect_create_user()
        .times(1)
        .returning(|_| Ok(Some(UserId::new(734))));
    let services = services(directory, &storage);

    let (result, output) = run_to_string(
        Command::Create {
            page: 1,
            fields: fields(Some("New"), Some("User"), Some("new@reqres.in")),
        },
        &services,
    )
    .await;

    result.expect("create");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "Created New User <new@reqres.in>");
    assert_eq!(lines[1], "  13  New User <new@reqres.in>");
    assert_eq!(lines.len(), 8, "{output}");
    assert_eq!(lines[7], "Page 1 of 3 (13 users)");
}

#[rstest]
#[tokio::test]
async fn update_without_fields_is_rejected(storage: Arc<MemoryKeyValueStore>) {
    signed_in(&storage);
    let services = services(MockUserDirectory::new(), &storage);

    let (result, _) = run_to_string(
        Command::Update {
            id: 2,
            fields: UserFields::default(),
        },
        &services,
    )
    .await;

    match result {
        Err(CliError::Domain(err)) => assert_eq!(err.code(), ErrorCode::InvalidRequest),
        other => panic!("expected invalid request, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn update_keeps_unchanged_fields_from_existing_record(storage: Arc<MemoryKeyValueStore>) {
    signed_in(&storage);
    let mut directory = MockUserDirectory::new();
    directory
        .expect_get_user()
        .times(1)
        .returning(|id| Ok(user(id.get())));
    directory
        .expect_update_user()
        .times(1)
        .withf(|id, patch| {
            *id == UserId::new(2)
                && patch.first_name.as_deref() == Some("Janet")
                && patch.email.as_deref() == Some("user2@reqres.in")
        })
        .returning(|id, patch| {
            let mut updated = User::blank(id);
            updated.apply(patch);
            Ok(updated)
        });
    let services = services(directory, &storage);

    let (result, output) = run_to_string(
        Command::Update {
            id: 2,
            fields: fields(Some("Janet"), None, None),
        },
        &services,
    )
    .await;

    result.expect("update");
    assert_eq!(output, "Updated Janet Last <user2@reqres.in>\n");
}

#[rstest]
#[tokio::test]
async fn theme_toggle_is_persisted(storage: Arc<MemoryKeyValueStore>) {
    let services = services(MockUserDirectory::new(), &storage);

    let (result, output) = run_to_string(
        Command::Theme {
            action: Some(ThemeAction::Toggle),
        },
        &services,
    )
    .await;
    result.expect("toggle");
    assert_eq!(output, "Theme: dark\n");

    let (_, output) = run_to_string(Command::Theme { action: None }, &services).await;
    assert_eq!(output, "Theme: dark\n");
}

#[rstest]
fn parses_kebab_case_commands() {
    let cli = Cli::try_parse_from(["dashboard", "update", "4", "--first-name", "Eve"])
        .expect("parse update");
    assert!(matches!(
        cli.command,
        Command::Update { id: 4, ref fields } if fields.first_name.as_deref() == Some("Eve")
    ));
    assert!(Cli::try_parse_from(["dashboard", "list", "--page", "0"]).is_err());
}
