use betaware_core::{Credentials, User};

use crate::cli::RegisterArgs;
use crate::commands::common::{resolve_password, CliGateway};
use crate::error::CliError;

pub async fn run_login(
    gateway: &CliGateway,
    username: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    let password = resolve_password(password)?;
    let session = gateway
        .login(&Credentials::new(username.trim(), password))
        .await?;

    if session.is_offline() {
        println!(
            "Welcome, {}! Logged in offline with your local account.",
            session.first_name()
        );
    } else {
        println!("Welcome, {}!", session.first_name());
    }
    Ok(())
}

pub async fn run_register(gateway: &CliGateway, args: RegisterArgs) -> Result<(), CliError> {
    let password = resolve_password(args.password)?;
    let user = User {
        username: args.username.trim().to_string(),
        full_name: args.name.trim().to_string(),
        email: args.email.trim().to_string(),
        national_id: args.cpf.trim().to_string(),
        postal_code: args.cep.trim().to_string(),
        address: args.address.trim().to_string(),
        password,
    };

    gateway.register(&user).await?;
    if gateway.health().is_available() {
        println!("Account '{}' created.", user.username);
    } else {
        println!(
            "Account '{}' created on this device. It is not sent to the server.",
            user.username
        );
    }
    Ok(())
}

pub async fn run_logout(gateway: &CliGateway) {
    gateway.logout().await;
    println!("Logged out.");
}
