use clap::Args;
use market_app::{
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, UsersServiceError},
};

#[derive(Debug, Args)]
pub(crate) struct PromoteArgs {
    /// E-mail of the account to promote
    #[arg(long)]
    email: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: PromoteArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user = PgUsersService::new(Db::new(pool))
        .promote(&args.email)
        .await
        .map_err(|error| match error {
            UsersServiceError::NotFound => format!("no account registered for {}", args.email),
            error => format!("failed to promote user: {error}"),
        })?;

    println!("user_uuid: {}", user.uuid);
    println!("role: {}", user.role);

    Ok(())
}
