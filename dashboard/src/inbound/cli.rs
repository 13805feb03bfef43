//! Command-line front end.
//!
//! Each command binds its arguments into the same form engines an interactive
//! front end would use, so submissions are gated by form validity exactly as
//! they would be on screen. Output is written to a caller-supplied sink.

use std::io::{self, Write};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use form_validation::{FormConfigError, FormValidation};
use pagination::{PageNumber, PageSize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::auth_flow::FIX_ERRORS_MESSAGE;
use crate::domain::forms::{
    CONFIRM_PASSWORD, EMAIL, FIRST_NAME, LAST_NAME, PASSWORD, UserFormMode, enter, field_errors,
    new_user_from, prepare_user_form, sign_in_form, sign_up_form, user_form,
};
use crate::domain::ports::{AuthService, KeyValueStore, KeyValueStoreError, UserDirectory, UserDirectoryError};
use crate::domain::{
    AuthFlow, AuthFlowError, DashboardController, Error, SessionStore, Theme, ThemeStore, User,
    UserId, UserPatch,
};

/// `dashboard` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dashboard",
    about = "Manage directory users from the command line",
    version
)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Dashboard commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in with any email and password.
    SignIn {
        /// Account email.
        #[arg(long, default_value = "")]
        email: String,
        /// Account password.
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Create an account and sign in.
    SignUp {
        /// Given name.
        #[arg(long, default_value = "")]
        first_name: String,
        /// Family name.
        #[arg(long, default_value = "")]
        last_name: String,
        /// Account email.
        #[arg(long, default_value = "")]
        email: String,
        /// Password of at least six characters.
        #[arg(long, default_value = "")]
        password: String,
        /// Repeat of the password.
        #[arg(long, default_value = "")]
        confirm_password: String,
    },
    /// Forget the stored session.
    SignOut,
    /// Show the signed-in user.
    Whoami,
    /// List one page of users.
    List {
        /// Page to show.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Add a user at the head of a page.
    Create {
        /// Page the user is added to.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Given name, email, and family name.
        #[command(flatten)]
        fields: UserFields,
    },
    /// Edit an existing user; omitted fields keep their current values.
    Update {
        /// User to edit.
        id: u64,
        /// Fields to change.
        #[command(flatten)]
        fields: UserFields,
    },
    /// Delete a user.
    Delete {
        /// User to delete.
        id: u64,
    },
    /// Show or change the colour scheme.
    Theme {
        /// Change to apply; shows the current theme when omitted.
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
}

/// User form inputs.
#[derive(Debug, Clone, Default, Args)]
pub struct UserFields {
    /// Given name.
    #[arg(long)]
    pub first_name: Option<String>,
    /// Family name.
    #[arg(long)]
    pub last_name: Option<String>,
    /// Contact address.
    #[arg(long)]
    pub email: Option<String>,
}

impl UserFields {
    fn entries(&self) -> [(&'static str, Option<&str>); 3] {
        [
            (FIRST_NAME, self.first_name.as_deref()),
            (LAST_NAME, self.last_name.as_deref()),
            (EMAIL, self.email.as_deref()),
        ]
    }
}

/// Theme changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeAction {
    /// Switch between light and dark.
    Toggle,
    /// Use the light theme.
    Light,
    /// Use the dark theme.
    Dark,
}

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The submitted form has errors; they were printed per field.
    #[error("{}", FIX_ERRORS_MESSAGE)]
    InvalidForm,
    /// A domain operation failed.
    #[error(transparent)]
    Domain(#[from] Error),
    /// A form definition is inconsistent.
    #[error(transparent)]
    Form(#[from] FormConfigError),
    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl From<UserDirectoryError> for CliError {
    fn from(value: UserDirectoryError) -> Self {
        Self::Domain(value.into())
    }
}

impl From<KeyValueStoreError> for CliError {
    fn from(value: KeyValueStoreError) -> Self {
        Self::Domain(value.into())
    }
}

impl From<AuthFlowError> for CliError {
    fn from(value: AuthFlowError) -> Self {
        match value {
            AuthFlowError::InvalidForm => Self::InvalidForm,
            other => Self::Domain(other.into()),
        }
    }
}

/// Collaborators shared by every command.
#[derive(Clone)]
pub struct Services {
    /// Remote user directory.
    pub directory: Arc<dyn UserDirectory>,
    /// Authenticator.
    pub auth: Arc<dyn AuthService>,
    /// Durable storage for the session and theme.
    pub storage: Arc<dyn KeyValueStore>,
    /// Records per page.
    pub page_size: PageSize,
    /// Theme used when none is stored.
    pub system_theme: Theme,
}

/// Run one command, writing human-readable output to `out`.
///
/// # Errors
///
/// Returns [`CliError::InvalidForm`] after printing field errors when a form
/// does not validate, and a domain error when a remote or storage call fails.
pub async fn run(command: Command, services: &Services, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::SignIn { email, password } => {
            let mut form = sign_in_form()?;
            enter(&mut form, EMAIL, &email)?;
            enter(&mut form, PASSWORD, &password)?;
            let mut session = SessionStore::init(services.storage.clone());
            let flow = AuthFlow::new(services.auth.clone());
            let result = flow.sign_in(&form, &mut session).await;
            let user = gate(result, &form, out)?;
            writeln!(out, "Signed in as {}", describe(&user))?;
        }
        Command::SignUp {
            first_name,
            last_name,
            email,
            password,
            confirm_password,
        } => {
            let mut form = sign_up_form()?;
            for (field, value) in [
                (FIRST_NAME, first_name.as_str()),
                (LAST_NAME, last_name.as_str()),
                (EMAIL, email.as_str()),
                (PASSWORD, password.as_str()),
                (CONFIRM_PASSWORD, confirm_password.as_str()),
            ] {
                enter(&mut form, field, value)?;
            }
            let mut session = SessionStore::init(services.storage.clone());
            let flow = AuthFlow::new(services.auth.clone());
            let result = flow.sign_up(&form, &mut session).await;
            let user = gate(result, &form, out)?;
            writeln!(out, "Signed up as {}", describe(&user))?;
        }
        Command::SignOut => {
            let mut session = SessionStore::init(services.storage.clone());
            session.logout()?;
            writeln!(out, "Signed out")?;
        }
        Command::Whoami => {
            let session = SessionStore::init(services.storage.clone());
            match session.user() {
                Some(user) => writeln!(out, "{}", describe(user))?,
                None => writeln!(out, "Not signed in")?,
            }
        }
        Command::List { page } => {
            require_session(services)?;
            let mut controller = DashboardController::new(services.directory.clone(), services.page_size);
            controller.load_page(page_number(page)?).await?;
            print_page(&controller, out)?;
        }
        Command::Create { page, fields } => {
            require_session(services)?;
            let mut controller = DashboardController::new(services.directory.clone(), services.page_size);
            controller.load_page(page_number(page)?).await?;

            let mut form = user_form()?;
            let _ = prepare_user_form(&mut form, UserFormMode::Create);
            for (field, value) in fields.entries() {
                enter(&mut form, field, value.unwrap_or_default())?;
            }
            submit_gate(&form, out)?;

            let user = controller.create_user(new_user_from(&form)).await?;
            writeln!(out, "Created {}", describe(&user))?;
            print_page(&controller, out)?;
        }
        Command::Update { id, fields } => {
            require_session(services)?;
            if fields.entries().iter().all(|(_, value)| value.is_none()) {
                return Err(Error::invalid_request("nothing to update").into());
            }
            let id = UserId::new(id);
            let existing = services.directory.get_user(id).await?;

            let mut form = user_form()?;
            if !prepare_user_form(&mut form, UserFormMode::Edit(&existing)).is_changed() {
                debug!(user_id = %id, "existing record has no field values");
            }
            for (field, value) in fields.entries() {
                if let Some(value) = value {
                    enter(&mut form, field, value)?;
                }
            }
            submit_gate(&form, out)?;

            let mut controller = DashboardController::new(services.directory.clone(), services.page_size);
            let patch = UserPatch::from(new_user_from(&form));
            let user = controller.update_user(id, patch).await?;
            writeln!(out, "Updated {}", describe(&user))?;
        }
        Command::Delete { id } => {
            require_session(services)?;
            let mut controller = DashboardController::new(services.directory.clone(), services.page_size);
            controller.delete_user(UserId::new(id)).await?;
            writeln!(out, "Deleted user {id}")?;
        }
        Command::Theme { action } => {
            let mut store = ThemeStore::init(services.storage.clone(), services.system_theme);
            match action {
                None => {}
                Some(ThemeAction::Toggle) => {
                    store.toggle()?;
                }
                Some(ThemeAction::Light) => store.set_theme(Theme::Light)?,
                Some(ThemeAction::Dark) => store.set_theme(Theme::Dark)?,
            }
            writeln!(out, "Theme: {}", store.theme())?;
        }
    }
    Ok(())
}

fn require_session(services: &Services) -> Result<(), CliError> {
    if SessionStore::init(services.storage.clone()).is_authenticated() {
        Ok(())
    } else {
        Err(Error::unauthorized("sign in first").into())
    }
}

fn page_number(raw: u32) -> Result<PageNumber, CliError> {
    PageNumber::new(raw).map_err(|err| Error::invalid_request(err.to_string()).into())
}

/// Print field errors and refuse when the form is not submittable.
fn submit_gate(form: &FormValidation, out: &mut impl Write) -> Result<(), CliError> {
    if form.is_valid() {
        return Ok(());
    }
    print_field_errors(form, out)?;
    Err(CliError::InvalidForm)
}

/// Print field errors for refused auth submissions.
fn gate(
    result: Result<User, AuthFlowError>,
    form: &FormValidation,
    out: &mut impl Write,
) -> Result<User, CliError> {
    result.or_else(|err| {
        if matches!(err, AuthFlowError::InvalidForm | AuthFlowError::PasswordMismatch) {
            print_field_errors(form, out)?;
        }
        Err(err.into())
    })
}

fn print_field_errors(form: &FormValidation, out: &mut impl Write) -> Result<(), CliError> {
    let errors = field_errors(form);
    if errors.is_empty() {
        warn!("form refused without field errors");
    }
    for (field, message) in errors {
        writeln!(out, "  {field}: {message}")?;
    }
    Ok(())
}

fn print_page(controller: &DashboardController, out: &mut impl Write) -> Result<(), CliError> {
    for user in controller.users() {
        writeln!(out, "{:>4}  {}", user.id.get(), describe(user))?;
    }
    writeln!(
        out,
        "Page {} of {} ({} users)",
        controller.current_page(),
        controller.total_pages(),
        controller.api_total()
    )?;
    Ok(())
}

fn describe(user: &User) -> String {
    format!("{} <{}>", user.display_name(), user.email)
}

#[cfg(test)]
mod tests;
