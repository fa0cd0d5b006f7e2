use betaware_core::config::ClientConfig;

use crate::cli::FaceCommands;
use crate::commands::common::{face_client, read_face_image};
use crate::error::CliError;

pub async fn run_face(config: &ClientConfig, command: FaceCommands) -> Result<(), CliError> {
    let client = face_client(config)?;
    match command {
        FaceCommands::Register { username, image } => {
            let image = read_face_image(&image)?;
            let username = client.register_face(username.trim(), image).await?;
            println!("Face registered for {username}.");
        }
        FaceCommands::Login { username, image } => {
            let image = read_face_image(&image)?;
            let username = client.face_login(username.as_deref(), image).await?;
            println!("Recognized {username}.");
        }
    }
    Ok(())
}
