use super::status_ui::with_status;
use super::AppContext;
use crate::output::Output;
use crate::render;
use clap::ValueEnum;
use color_eyre::Result;
use movielist_api::ApiClient;
use movielist_core::{CatalogueService, Gesture, ListStateReconciler};
use movielist_models::{ListEntry, ListFilter, MovieRef};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    All,
    ToWatch,
    Watched,
    Favourites,
}

impl FilterArg {
    fn filter(self) -> Option<ListFilter> {
        match self {
            FilterArg::All => None,
            FilterArg::ToWatch => Some(ListFilter::ToWatch),
            FilterArg::Watched => Some(ListFilter::Watched),
            FilterArg::Favourites => Some(ListFilter::Favourites),
        }
    }
}

pub async fn run_list(cmd: crate::ListCommands, ctx: &AppContext, output: &Output) -> Result<()> {
    let user = ctx.require_user()?;
    let client = ctx.client()?;
    let reconciler = ListStateReconciler::new(Arc::new(client.clone()), user.id.clone());
    tracing::debug!(user_id = %user.id, "List command started");

    match cmd {
        crate::ListCommands::Show { filter } => show(&reconciler, filter, output).await,
        crate::ListCommands::Status { movie_id } => status(&reconciler, &movie_id, output).await,
        crate::ListCommands::Cycle { movie_id } => {
            run_gesture(&reconciler, &client, &movie_id, Gesture::Cycle, output).await
        }
        crate::ListCommands::Favourite { movie_id } => {
            run_gesture(&reconciler, &client, &movie_id, Gesture::ToggleFavourite, output).await
        }
        crate::ListCommands::Remove { movie_id } => remove(&reconciler, &movie_id, output).await,
    }
}

async fn show(
    reconciler: &ListStateReconciler<ApiClient>,
    filter: FilterArg,
    output: &Output,
) -> Result<()> {
    with_status(reconciler.subscribe(), reconciler.refresh()).await?;
    let state = reconciler.snapshot().await;
    let entries: Vec<&ListEntry> = match filter.filter() {
        Some(filter) => state.entries(filter),
        None => state.all(),
    };

    if entries.is_empty() && output.is_human() {
        output.info("Your list is empty");
        return Ok(());
    }
    output.data(&entries, || render::list_table(&entries));
    Ok(())
}

async fn status(
    reconciler: &ListStateReconciler<ApiClient>,
    movie_id: &str,
    output: &Output,
) -> Result<()> {
    let membership =
        with_status(reconciler.subscribe(), reconciler.load_membership(movie_id)).await?;
    let snapshot = reconciler.snapshot().await;
    let title = snapshot.get(movie_id).map_or(movie_id, |e| e.title.as_str());
    output.data(
        &json!({"movie_id": movie_id, "membership": membership}),
        || render::membership_table(movie_id, title, membership),
    );
    Ok(())
}

async fn run_gesture(
    reconciler: &ListStateReconciler<ApiClient>,
    client: &ApiClient,
    movie_id: &str,
    gesture: Gesture,
    output: &Output,
) -> Result<()> {
    // A fresh process starts with an empty list; load it before deciding.
    with_status(reconciler.subscribe(), reconciler.refresh()).await?;
    let movie = movie_ref(reconciler, client, movie_id).await?;
    let before = reconciler.membership(movie_id).await;

    let after = with_status(reconciler.subscribe(), reconciler.apply(&movie, gesture)).await?;
    output.success(format!("{}: {} → {}", movie.title, before, after));
    Ok(())
}

async fn remove(
    reconciler: &ListStateReconciler<ApiClient>,
    movie_id: &str,
    output: &Output,
) -> Result<()> {
    let message = with_status(reconciler.subscribe(), reconciler.remove_from_list(movie_id)).await?;
    output.success(message);
    Ok(())
}

/// The list entry if the movie is already listed, else the catalogue record.
async fn movie_ref(
    reconciler: &ListStateReconciler<ApiClient>,
    client: &ApiClient,
    movie_id: &str,
) -> Result<MovieRef> {
    if let Some(entry) = reconciler.snapshot().await.get(movie_id) {
        return Ok(MovieRef::new(
            entry.movie_id.clone(),
            entry.title.clone(),
            entry.poster.clone(),
        ));
    }
    let catalogue = CatalogueService::new(client.clone());
    let details = with_status(catalogue.subscribe(), catalogue.movie(movie_id)).await?;
    Ok(MovieRef::from(&details))
}
