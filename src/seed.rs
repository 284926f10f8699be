use std::{io::Read, path::Path};

use anyhow::Context;
use jiff::civil::{Date, Time};
use sea_orm::{
    DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::entities::movie;

const BATCH_SIZE: usize = 50;

/// One row of the IMDB movies export.
#[derive(Debug, Deserialize)]
struct CsvMovie {
    names: String,
    date_x: String,
    score: f64,
    genre: String,
    overview: String,
    crew: String,
    orig_title: String,
    status: String,
    orig_lang: String,
    budget_x: f64,
    revenue: f64,
    country: String,
}

impl CsvMovie {
    fn into_active_model(self) -> anyhow::Result<movie::ActiveModel> {
        let date = Date::strptime("%m/%d/%Y", self.date_x.trim())
            .with_context(|| format!("invalid date {:?}", self.date_x))?
            .to_datetime(Time::midnight());

        Ok(movie::ActiveModel {
            id: NotSet,
            name: Set(self.names),
            date: Set(date.to_string()),
            score: Set(self.score),
            genre: Set(self.genre),
            overview: Set(self.overview),
            crew: Set(self.crew),
            orig_title: Set(self.orig_title),
            status: Set(self.status),
            orig_lang: Set(self.orig_lang),
            budget: Set(self.budget_x),
            revenue: Set(self.revenue),
            country: Set(self.country),
        })
    }
}

/// Loads the CSV into an empty movies table. Returns the number of rows inserted.
pub async fn seed_if_empty(db: &DatabaseConnection, csv_path: &Path) -> anyhow::Result<u64> {
    let existing = movie::Entity::find().count(db).await?;
    if existing > 0 {
        info!(existing, "movies table already populated, skipping seed");
        return Ok(0);
    }

    if !csv_path.exists() {
        warn!(path = %csv_path.display(), "seed CSV not found, starting with an empty store");
        return Ok(0);
    }

    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("opening {}", csv_path.display()))?;
    let inserted = seed_from_reader(db, file).await?;
    info!(inserted, path = %csv_path.display(), "seeded movies");
    Ok(inserted)
}

pub async fn seed_from_reader<R: Read>(db: &DatabaseConnection, reader: R) -> anyhow::Result<u64> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = csv.headers()?.clone();

    let txn = db.begin().await?;
    let mut batch = Vec::with_capacity(BATCH_SIZE);
    let mut inserted = 0u64;
    let mut record = csv::StringRecord::new();

    while csv.read_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        let row: CsvMovie =
            record.deserialize(Some(&headers)).with_context(|| format!("CSV line {line}"))?;
        batch.push(row.into_active_model().with_context(|| format!("CSV line {line}"))?);

        if batch.len() == BATCH_SIZE {
            inserted += batch.len() as u64;
            movie::Entity::insert_many(std::mem::take(&mut batch)).exec(&txn).await?;
        }
    }

    if !batch.is_empty() {
        inserted += batch.len() as u64;
        movie::Entity::insert_many(batch).exec(&txn).await?;
    }

    txn.commit().await?;
    Ok(inserted)
}
