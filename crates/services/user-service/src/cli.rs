//! Command-line interface for operating the user service.

use clap::{builder::PossibleValuesParser, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use common::{AppError, AppResult};
use domain::{NewUser, UserRole, ROLE_USER, VALID_ROLES};

use crate::service::UserService;

#[derive(Debug, Parser)]
#[command(name = "user-service")]
#[command(about = "User management service")]
pub struct Cli {
    /// Database URL (overrides USER_SERVICE_DATABASE_URL / DATABASE_URL)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List all users
    List,
    /// Get a user by id
    Get { id: String },
    /// Find a user by a unique field, e.g. `find username jdoe`
    Find { field: String, value: String },
    /// Check whether a username is still free
    Available { username: String },
    /// Create a new user
    Add {
        #[arg(long)]
        username: String,
        #[arg(long, env = "USER_SERVICE_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(
            long,
            default_value = ROLE_USER,
            value_parser = PossibleValuesParser::new(VALID_ROLES.iter().copied())
        )]
        role: String,
    },
    /// Look a user up by username and password
    Login {
        username: String,
        #[arg(long, env = "USER_SERVICE_LOGIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

/// Run a command against the service and render its result as JSON.
pub async fn execute(service: &dyn UserService, command: Command) -> AppResult<String> {
    match command {
        Command::List => render(&service.get_all_users().await?),
        Command::Get { id } => render(&service.get_user_by_id(&id).await?),
        Command::Find { field, value } => {
            render(&service.get_user_by_unique_key(&field, &value).await?)
        }
        Command::Available { username } => {
            let available = service.is_username_available(&username).await?;
            render(&json!({ "username": username, "available": available }))
        }
        Command::Add {
            username,
            password,
            first_name,
            last_name,
            role,
        } => {
            let new_user = NewUser::new(username, password, first_name, last_name)
                .with_role(UserRole::from(role));
            render(&service.add_new_user(new_user).await?)
        }
        Command::Login { username, password } => {
            render(&service.get_user_by_credentials(&username, &password).await?)
        }
    }
}

/// Process exit status for a failed command: 2 when the caller's input was
/// at fault, 1 for system failures.
pub fn exit_code(err: &AppError) -> i32 {
    if err.is_client_error() {
        2
    } else {
        1
    }
}

fn render<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to render output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockUserService;
    use domain::User;

    fn sanitized_user(id: i64) -> User {
        NewUser::new("jdoe", "pw", "John", "Doe")
            .into_user(id)
            .without_password()
    }

    #[test]
    fn test_parse_add_command() {
        let cli = Cli::try_parse_from([
            "user-service",
            "add",
            "--username",
            "jdoe",
            "--password",
            "pw",
            "--first-name",
            "John",
            "--last-name",
            "Doe",
            "--role",
            "admin",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Command::Add { ref username, ref role, .. } if username == "jdoe" && role == "admin"
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_role() {
        let result = Cli::try_parse_from([
            "user-service",
            "add",
            "--username",
            "jdoe",
            "--password",
            "pw",
            "--first-name",
            "John",
            "--last-name",
            "Doe",
            "--role",
            "root",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_global_database_url() {
        let cli =
            Cli::try_parse_from(["user-service", "get", "7", "--database-url", "postgres://x"])
                .unwrap();

        assert_eq!(cli.database_url.as_deref(), Some("postgres://x"));
        assert_eq!(cli.command, Command::Get { id: "7".to_string() });
    }

    #[test]
    fn test_login_password_is_a_flag_or_env_value() {
        assert!(Cli::try_parse_from(["user-service", "login", "jdoe", "s3cret"]).is_err());

        let cli = Cli::try_parse_from(["user-service", "login", "jdoe", "--password", "s3cret"])
            .unwrap();
        assert_eq!(
            cli.command,
            Command::Login {
                username: "jdoe".to_string(),
                password: "s3cret".to_string(),
            }
        );

        std::env::set_var("USER_SERVICE_LOGIN_PASSWORD", "from-env");
        let cli = Cli::try_parse_from(["user-service", "login", "jdoe"]);
        std::env::remove_var("USER_SERVICE_LOGIN_PASSWORD");

        assert!(matches!(
            cli.unwrap().command,
            Command::Login { ref password, .. } if password == "from-env"
        ));
    }

    #[test]
    fn test_exit_code_separates_client_errors() {
        assert_eq!(exit_code(&AppError::bad_request("bad id")), 2);
        assert_eq!(exit_code(&AppError::authentication("Invalid credentials")), 2);
        assert_eq!(exit_code(&AppError::internal("boom")), 1);
    }

    #[tokio::test]
    async fn test_execute_get_renders_user_without_password() {
        let mut service = MockUserService::new();
        service
            .expect_get_user_by_id()
            .withf(|id| id == "7")
            .returning(|_| Ok(sanitized_user(7)));

        let output = execute(&service, Command::Get { id: "7".to_string() })
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["username"], "jdoe");
        assert!(json.get("password").is_none());
    }

    #[tokio::test]
    async fn test_execute_add_passes_role() {
        let mut service = MockUserService::new();
        service
            .expect_add_new_user()
            .withf(|user| user.role == UserRole::Locked)
            .returning(|user| Ok(user.into_user(1).without_password()));

        let command = Command::Add {
            username: "jdoe".to_string(),
            password: "pw".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            role: "locked".to_string(),
        };

        assert!(execute(&service, command).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_propagates_errors() {
        let mut service = MockUserService::new();
        service
            .expect_get_all_users()
            .returning(|| Err(AppError::not_found("No users found")));

        let result = execute(&service, Command::List).await;

        assert!(matches!(result, Err(AppError::ResourceNotFound(_))));
    }
}
