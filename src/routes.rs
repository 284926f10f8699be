use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    routing::get,
};
use sea_orm::TransactionTrait;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{MovieDetail, MovieList},
    movies,
    pagination::PageParams,
};

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/movies/", get(list_movies))
        .route("/movies/{movie_id}/", get(get_movie));

    let prefix = state.config.api_prefix.as_str();
    let app = if prefix.is_empty() { api } else { Router::new().nest(prefix, api) };
    app.with_state(state)
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> AppResult<Json<MovieList>> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;
    let request = params.validate()?;

    let txn = state.db.begin().await?;
    let page = movies::list_movies(&txn, request, &state.listing_path()).await?;
    txn.commit().await?;

    Ok(Json(page))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    movie_id: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<MovieDetail>> {
    let Path(movie_id) = movie_id.map_err(|e| AppError::Validation(e.body_text()))?;

    let txn = state.db.begin().await?;
    let movie = movies::get_movie(&txn, movie_id).await?;
    txn.commit().await?;

    Ok(Json(movie))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::{Config, Environment},
        db::test_db,
        movies::tests::insert_movies,
    };

    async fn app_with(count: usize) -> Router {
        let db = test_db().await;
        insert_movies(&db, count).await;
        let config = Arc::new(Config::for_environment(Environment::Testing));
        router(Arc::new(AppState { config, db }))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app.oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn lists_with_default_params() {
        let (status, body) = get_json(app_with(25).await, "/theater/movies/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["movies"].as_array().unwrap().len(), 10);
        assert_eq!(body["prev_page"], Value::Null);
        assert_eq!(body["next_page"], "/theater/movies/?page=2&per_page=10");
        assert_eq!(body["total_pages"], 3);
        assert_eq!(body["total_items"], 25);
    }

    #[tokio::test]
    async fn lists_last_page() {
        let (status, body) =
            get_json(app_with(25).await, "/theater/movies/?page=3&per_page=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["movies"].as_array().unwrap().len(), 5);
        assert_eq!(body["prev_page"], "/theater/movies/?page=2&per_page=10");
        assert_eq!(body["next_page"], Value::Null);
    }

    #[tokio::test]
    async fn page_beyond_data_is_404() {
        let (status, body) =
            get_json(app_with(25).await, "/theater/movies/?page=100&per_page=10").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "No movies found.");
    }

    #[tokio::test]
    async fn overflowing_page_is_404() {
        let (status, body) = get_json(
            app_with(25).await,
            "/theater/movies/?page=18446744073709551615&per_page=20",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "No movies found.");
    }

    #[tokio::test]
    async fn out_of_bounds_params_are_rejected() {
        for uri in [
            "/theater/movies/?per_page=21",
            "/theater/movies/?page=0",
            "/theater/movies/?per_page=0",
            "/theater/movies/?page=abc",
            "/theater/movies/?page=-1",
        ] {
            let (status, body) = get_json(app_with(25).await, uri).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert!(body["detail"].is_string(), "{uri}");
        }
    }

    #[tokio::test]
    async fn max_per_page_is_accepted() {
        let (status, body) = get_json(app_with(25).await, "/theater/movies/?per_page=20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["movies"].as_array().unwrap().len(), 20);
        assert_eq!(body["total_pages"], 2);
    }

    #[tokio::test]
    async fn detail_returns_movie() {
        let (status, body) = get_json(app_with(3).await, "/theater/movies/2/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 2);
        assert_eq!(body["name"], "Movie 2");
        assert_eq!(body["date"], "2020-01-03T00:00:00");
        assert_eq!(body["country"], "US");
    }

    #[tokio::test]
    async fn detail_missing_is_404() {
        let (status, body) = get_json(app_with(3).await, "/theater/movies/42/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Movie with the given ID was not found.");
    }

    #[tokio::test]
    async fn detail_beyond_32_bit_ids_is_404() {
        let (status, body) = get_json(app_with(3).await, "/theater/movies/3000000000/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Movie with the given ID was not found.");
    }

    #[tokio::test]
    async fn detail_with_non_integer_id_is_rejected() {
        let (status, _) = get_json(app_with(3).await, "/theater/movies/abc/").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
