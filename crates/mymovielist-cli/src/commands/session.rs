use super::prompts;
use super::status_ui::with_status;
use super::AppContext;
use crate::output::Output;
use color_eyre::Result;
use movielist_core::CatalogueService;

pub async fn run_sign_in(
    ctx: &AppContext,
    email: Option<String>,
    username: Option<String>,
    output: &Output,
) -> Result<()> {
    let email = prompts::value_or_prompt(email, "Email")?;
    let username = prompts::value_or_prompt(username, "Username")?;

    let service = CatalogueService::new(ctx.client()?);
    let user = with_status(service.subscribe(), service.sign_in(&email, &username)).await?;

    let mut session = ctx.session()?;
    session.set_user(&user);
    session
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save session: {}", e))?;

    tracing::info!(user_id = %user.id, "Signed in");
    output.success(format!("Signed in as {}", user.username));
    Ok(())
}

pub async fn run_sign_out(ctx: &AppContext, output: &Output) -> Result<()> {
    let mut session = ctx.session()?;
    match session.user() {
        Some(user) => {
            session
                .clear()
                .map_err(|e| color_eyre::eyre::eyre!("Failed to clear session: {}", e))?;
            output.success(format!("Signed out {}", user.username));
        }
        None => output.info("Not signed in"),
    }
    Ok(())
}
