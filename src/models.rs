use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::{entities::movie, error::AppError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: i64,
    pub name: String,
    pub date: DateTime,
    pub score: f64,
    pub genre: String,
    pub overview: String,
    pub crew: String,
    pub orig_title: String,
    pub status: String,
    pub orig_lang: String,
    pub budget: f64,
    pub revenue: f64,
    pub country: String,
}

impl TryFrom<movie::Model> for MovieDetail {
    type Error = AppError;

    fn try_from(row: movie::Model) -> Result<Self, Self::Error> {
        let date: DateTime = row.date.parse()?;
        Ok(Self {
            id: row.id,
            name: row.name,
            date,
            score: row.score,
            genre: row.genre,
            overview: row.overview,
            crew: row.crew,
            orig_title: row.orig_title,
            status: row.status,
            orig_lang: row.orig_lang,
            budget: row.budget,
            revenue: row.revenue,
            country: row.country,
        })
    }
}

/// Page envelope returned by the listing endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieList {
    pub movies: Vec<MovieDetail>,
    pub prev_page: Option<String>,
    pub next_page: Option<String>,
    pub total_pages: u64,
    pub total_items: u64,
}
