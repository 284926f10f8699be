//! Listing and detail lookups over the `movies` table.

use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};
use tracing::debug;

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{MovieDetail, MovieList},
    pagination::PageRequest,
};

pub const NO_MOVIES: &str = "No movies found.";
pub const MOVIE_NOT_FOUND: &str = "Movie with the given ID was not found.";

/// Returns one page of movies ordered by id.
///
/// An empty page is `NotFound`, including pages past the end. `link_base` is
/// the listing path the prev/next links point back at.
pub async fn list_movies<C>(
    conn: &C,
    request: PageRequest,
    link_base: &str,
) -> AppResult<MovieList>
where
    C: ConnectionTrait,
{
    let Some(offset) = request.offset() else {
        debug!(page = request.page(), per_page = request.per_page(), "page starts past any row");
        return Err(AppError::NotFound(NO_MOVIES));
    };
    debug!(page = request.page(), per_page = request.per_page(), offset, "listing movies");

    let rows = movie::Entity::find()
        .order_by_asc(movie::Column::Id)
        .offset(offset)
        .limit(request.per_page())
        .all(conn)
        .await?;

    if rows.is_empty() {
        return Err(AppError::NotFound(NO_MOVIES));
    }

    let total_items = movie::Entity::find().count(conn).await?;
    let total_pages = request.total_pages(total_items);
    debug!(total_items, total_pages, fetched = rows.len(), "page fetched");

    let movies = rows.into_iter().map(MovieDetail::try_from).collect::<AppResult<Vec<_>>>()?;

    Ok(MovieList {
        movies,
        prev_page: request.prev_link(link_base),
        next_page: request.next_link(link_base, total_pages),
        total_pages,
        total_items,
    })
}

pub async fn get_movie<C>(conn: &C, movie_id: i64) -> AppResult<MovieDetail>
where
    C: ConnectionTrait,
{
    let row = movie::Entity::find_by_id(movie_id).one(conn).await?;
    let Some(row) = row else {
        debug!(movie_id, "movie not found");
        return Err(AppError::NotFound(MOVIE_NOT_FOUND));
    };
    MovieDetail::try_from(row)
}
