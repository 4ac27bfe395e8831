use std::{io::ErrorKind, path::PathBuf};

use crate::domain::review::clean_reviews;

use super::{write_atomically, StoreError};

const HEADER: &str = "Review";

/// One CSV file of reviews per company, keyed by the company name as given.
pub struct ReviewStore {
    dir: PathBuf,
    read_cap: usize,
}

impl ReviewStore {
    pub async fn new(dir: impl Into<PathBuf>, read_cap: usize) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::io(&dir, e))?;

        Ok(ReviewStore { dir, read_cap })
    }

    pub fn path_for(&self, company: &str) -> Result<PathBuf, StoreError> {
        if company.contains(['/', '\\', '\0']) {
            return Err(StoreError::InvalidCompanyName(company.to_string()));
        }
        Ok(self.dir.join(format!("reviews_{}.csv", company)))
    }

    /// Replaces the company's reviews with the cleaned `reviews`. Returns the
    /// number of records written.
    pub async fn save(&self, company: &str, reviews: &[String]) -> Result<usize, StoreError> {
        let path = self.path_for(company)?;
        let reviews = clean_reviews(reviews);

        let mut writer = csv::Writer::from_writer(vec![]);
        writer.write_record([HEADER])?;
        for review in reviews.iter() {
            writer.write_record([review])?;
        }
        let contents = writer
            .into_inner()
            .map_err(|e| StoreError::io(&path, e.into_error()))?;

        write_atomically(&path, &contents).await?;
        log::info!("Saved {} reviews for {} to {:?}", reviews.len(), company, path);

        Ok(reviews.len())
    }

    /// `None` when the company has never been saved.
    pub async fn read(&self, company: &str) -> Result<Option<Vec<String>>, StoreError> {
        let path = self.path_for(company)?;

        let contents = match tokio::fs::read(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(contents.as_slice());

        let mut reviews = vec![];
        for record in reader.records() {
            if reviews.len() >= self.read_cap {
                break;
            }
            let record = record?;
            let Some(review) = record.get(0).map(str::trim) else {
                continue;
            };
            if review.is_empty() {
                continue;
            }
            reviews.push(review.to_string());
        }

        Ok(Some(reviews))
    }
}
