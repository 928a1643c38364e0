use super::status_ui::with_status;
use super::AppContext;
use crate::output::Output;
use color_eyre::Result;
use movielist_core::CatalogueService;
use movielist_models::ReviewDraft;

fn draft(title: String, content: String, vote: u8) -> Result<ReviewDraft> {
    ReviewDraft::new(title, content, vote).map_err(|e| color_eyre::eyre::eyre!("{}", e))
}

pub async fn run_review(cmd: crate::ReviewCommands, ctx: &AppContext, output: &Output) -> Result<()> {
    let service = CatalogueService::new(ctx.client()?);
    let message = match cmd {
        crate::ReviewCommands::Add {
            movie_id,
            title,
            content,
            vote,
        } => {
            let user = ctx.require_user()?;
            let draft = draft(title, content, vote)?;
            with_status(service.subscribe(), service.add_review(&movie_id, &user, &draft)).await?
        }
        crate::ReviewCommands::Update {
            review_id,
            title,
            content,
            vote,
        } => {
            let draft = draft(title, content, vote)?;
            with_status(service.subscribe(), service.update_review(&review_id, &draft)).await?
        }
    };
    output.success(message);
    Ok(())
}
