use super::status_ui::with_status;
use super::AppContext;
use crate::output::Output;
use crate::render;
use color_eyre::Result;
use movielist_api::SortOrder;
use movielist_core::CatalogueService;

fn service(ctx: &AppContext) -> Result<CatalogueService> {
    Ok(CatalogueService::new(ctx.client()?))
}

pub async fn run_search(ctx: &AppContext, query: &str, output: &Output) -> Result<()> {
    let service = service(ctx)?;
    let movies = with_status(service.subscribe(), service.search(query)).await?;
    if movies.is_empty() && output.is_human() {
        output.warn(format!("No movies match \"{}\"", query));
        return Ok(());
    }
    output.data(&movies, || render::movies_table(&movies));
    Ok(())
}

pub async fn run_genres(ctx: &AppContext, genres: &[String], output: &Output) -> Result<()> {
    let service = service(ctx)?;
    let movies = with_status(service.subscribe(), service.by_genres(genres)).await?;
    output.data(&movies, || render::movies_table(&movies));
    Ok(())
}

pub async fn run_year(ctx: &AppContext, year: i32, output: &Output) -> Result<()> {
    let service = service(ctx)?;
    let movies = with_status(service.subscribe(), service.by_release_year(year)).await?;
    output.data(&movies, || render::movies_table(&movies));
    Ok(())
}

pub async fn run_sort(ctx: &AppContext, field: &str, descending: bool, output: &Output) -> Result<()> {
    let order = if descending {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    let service = service(ctx)?;
    let movies = with_status(service.subscribe(), service.sorted(field, order)).await?;
    output.data(&movies, || render::movies_table(&movies));
    Ok(())
}

pub async fn run_movie(ctx: &AppContext, movie_id: &str, output: &Output) -> Result<()> {
    let service = service(ctx)?;
    let movie = with_status(service.subscribe(), service.movie(movie_id)).await?;
    output.data(&movie, || render::movie_table(&movie));
    Ok(())
}

pub async fn run_reviews(ctx: &AppContext, movie_id: &str, output: &Output) -> Result<()> {
    let service = service(ctx)?;
    let reviews = with_status(service.subscribe(), service.reviews(movie_id)).await?;
    if reviews.is_empty() && output.is_human() {
        output.info("No reviews yet");
        return Ok(());
    }
    output.data(&reviews, || render::reviews_table(&reviews));
    Ok(())
}

pub async fn run_troupe(ctx: &AppContext, troupe_id: &str, output: &Output) -> Result<()> {
    let service = service(ctx)?;
    let troupe = with_status(service.subscribe(), service.troupe(troupe_id)).await?;
    if output.is_human() {
        let kind = troupe.kind.as_deref().unwrap_or("cast member");
        output.info(format!("{} ({})", troupe.full_name, kind));
    }
    output.data(&troupe, || render::troupe_table(&troupe));
    Ok(())
}
