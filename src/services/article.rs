//! Article browsing service
//!
//! The browse views narrow the article list by category, region or date
//! range; unknown ids and unparsable date segments resolve to `None` and
//! surface as 404 in the API layer. The archive bucketizer turns the
//! distinct year-month query into display records with per-bucket counts.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Month, Months, NaiveDate};

use crate::db::repositories::{ArticleRepository, CategoryRepository, RegionRepository};
use crate::models::{
    ArchiveMonth, Article, ArticleCategory, ArticleFilter, ListParams, PagedResult, Region,
};

/// A date-scoped browse view: the half-open interval and its page of
/// articles.
#[derive(Debug)]
pub struct DateBrowse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub articles: PagedResult<Article>,
}

/// An article detail view with its linked category and region records.
#[derive(Debug)]
pub struct ArticleDetail {
    pub article: Article,
    pub categories: Vec<ArticleCategory>,
    pub region: Option<Region>,
}

/// Article browsing service
pub struct ArticleService {
    articles: Arc<dyn ArticleRepository>,
    categories: Arc<dyn CategoryRepository>,
    regions: Arc<dyn RegionRepository>,
}

impl ArticleService {
    pub fn new(
        articles: Arc<dyn ArticleRepository>,
        categories: Arc<dyn CategoryRepository>,
        regions: Arc<dyn RegionRepository>,
    ) -> Self {
        Self {
            articles,
            categories,
            regions,
        }
    }

    /// Unfiltered article list, newest first.
    pub async fn list(&self, params: &ListParams) -> Result<PagedResult<Article>> {
        self.articles.list(&ArticleFilter::default(), params).await
    }

    /// Articles in one category; `None` when the category does not exist.
    pub async fn browse_category(
        &self,
        category_id: i64,
        params: &ListParams,
    ) -> Result<Option<(ArticleCategory, PagedResult<Article>)>> {
        let Some(category) = self.categories.get_by_id(category_id).await? else {
            return Ok(None);
        };

        let filter = ArticleFilter {
            category_id: Some(category.id),
            ..Default::default()
        };
        let articles = self.articles.list(&filter, params).await?;
        Ok(Some((category, articles)))
    }

    /// Articles in one region; `None` when the region does not exist.
    pub async fn browse_region(
        &self,
        region_id: i64,
        params: &ListParams,
    ) -> Result<Option<(Region, PagedResult<Article>)>> {
        let Some(region) = self.regions.get_by_id(region_id).await? else {
            return Ok(None);
        };

        let filter = ArticleFilter {
            region_id: Some(region.id),
            ..Default::default()
        };
        let articles = self.articles.list(&filter, params).await?;
        Ok(Some((region, articles)))
    }

    /// Articles within a requested year, or year and month.
    ///
    /// The interval is half-open `[start, end)`: a year-only request spans
    /// the full year, a year-month request spans exactly one calendar
    /// month via calendar-correct month addition. Unparsable segments
    /// resolve to `None`.
    pub async fn browse_date(
        &self,
        year: &str,
        month: Option<&str>,
        params: &ListParams,
    ) -> Result<Option<DateBrowse>> {
        let Some((start, end)) = date_interval(year, month) else {
            return Ok(None);
        };

        let filter = ArticleFilter {
            date_from: Some(start),
            date_until: Some(end),
            ..Default::default()
        };
        let articles = self.articles.list(&filter, params).await?;
        Ok(Some(DateBrowse {
            start,
            end,
            articles,
        }))
    }

    /// The archive: one bucket per distinct (year, month) pair across all
    /// article dates, chronologically ascending, each with its article
    /// count. Issues one count query per bucket.
    pub async fn archive(&self) -> Result<Vec<ArchiveMonth>> {
        let months = self.articles.distinct_months().await?;

        let mut buckets = Vec::with_capacity(months.len());
        for (year, month) in months {
            let article_count = self.articles.count_for_month(year, month).await?;
            buckets.push(ArchiveMonth {
                year,
                month_name: month_name(month).to_string(),
                month_number: month,
                link: format!("/articles/date/{}/{}", year, month),
                article_count,
            });
        }
        Ok(buckets)
    }

    /// Article detail by slug, with categories and region resolved.
    pub async fn detail(&self, slug: &str) -> Result<Option<ArticleDetail>> {
        let Some(article) = self.articles.get_by_slug(slug).await? else {
            return Ok(None);
        };

        let categories = self.articles.categories_for(article.id).await?;
        let region = match article.region_id {
            Some(region_id) => self.regions.get_by_id(region_id).await?,
            None => None,
        };

        Ok(Some(ArticleDetail {
            article,
            categories,
            region,
        }))
    }

    /// Most recently created articles, capped at `limit`.
    pub async fn latest(&self, limit: i64) -> Result<Vec<Article>> {
        self.articles.latest(limit).await
    }
}

/// Resolve year and optional month segments into a half-open interval.
fn date_interval(year: &str, month: Option<&str>) -> Option<(NaiveDate, NaiveDate)> {
    let year: i32 = year.parse().ok()?;

    match month {
        Some(month) => {
            let month: u32 = month.parse().ok()?;
            let start = NaiveDate::from_ymd_opt(year, month, 1)?;
            let end = start.checked_add_months(Months::new(1))?;
            Some((start, end))
        }
        None => {
            let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
            let end = start.checked_add_months(Months::new(12))?;
            Some((start, end))
        }
    }
}

/// English month name for a 1-12 month number.
fn month_name(month: u32) -> &'static str {
    Month::try_from(month as u8)
        .map(|m| m.name())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::db::repositories::{
        SqlxArticleRepository, SqlxCategoryRepository, SqlxRegionRepository,
    };
    use sqlx::SqlitePool;

    fn service(pool: SqlitePool) -> ArticleService {
        ArticleService::new(
            Arc::new(SqlxArticleRepository::new(pool.clone())),
            Arc::new(SqlxCategoryRepository::new(pool.clone())),
            Arc::new(SqlxRegionRepository::new(pool)),
        )
    }

    async fn insert_article(pool: &SqlitePool, slug: &str, date: &str) {
        sqlx::query("INSERT INTO articles (slug, title, date) VALUES (?, ?, ?)")
            .bind(slug)
            .bind(format!("Article {}", slug))
            .bind(date.parse::<NaiveDate>().unwrap())
            .execute(pool)
            .await
            .expect("insert article");
    }

    #[test]
    fn test_date_interval_year_only_spans_full_year() {
        let (start, end) = date_interval("2024", None).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_date_interval_month_spans_one_calendar_month() {
        // February of a leap year: calendar addition, not a fixed offset
        let (start, end) = date_interval("2024", Some("2")).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_date_interval_december_rolls_into_next_year() {
        let (start, end) = date_interval("2024", Some("12")).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_date_interval_rejects_garbage() {
        assert!(date_interval("not-a-year", None).is_none());
        assert!(date_interval("2024", Some("13")).is_none());
        assert!(date_interval("2024", Some("zero")).is_none());
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "");
    }

    #[tokio::test]
    async fn test_archive_builds_one_bucket_per_distinct_month() {
        let pool = create_test_pool().await.unwrap();
        insert_article(&pool, "a", "2024-11-05").await;
        insert_article(&pool, "b", "2024-11-20").await;
        insert_article(&pool, "c", "2025-01-03").await;
        let service = service(pool);

        let buckets = service.archive().await.unwrap();
        assert_eq!(buckets.len(), 2);

        assert_eq!(buckets[0].year, 2024);
        assert_eq!(buckets[0].month_number, 11);
        assert_eq!(buckets[0].month_name, "November");
        assert_eq!(buckets[0].article_count, 2);
        assert_eq!(buckets[0].link, "/articles/date/2024/11");

        assert_eq!(buckets[1].year, 2025);
        assert_eq!(buckets[1].month_name, "January");
        assert_eq!(buckets[1].article_count, 1);
    }

    #[tokio::test]
    async fn test_browse_date_unknown_segment_is_none() {
        let pool = create_test_pool().await.unwrap();
        let service = service(pool);

        let result = service
            .browse_date("twenty-twenty", None, &ListParams::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_browse_date_filters_to_month() {
        let pool = create_test_pool().await.unwrap();
        insert_article(&pool, "in", "2024-11-05").await;
        insert_article(&pool, "out", "2024-12-01").await;
        let service = service(pool);

        let browse = service
            .browse_date("2024", Some("11"), &ListParams::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(browse.articles.total, 1);
        assert_eq!(browse.articles.items[0].slug, "in");
    }

    #[tokio::test]
    async fn test_browse_category_unknown_id_is_none() {
        let pool = create_test_pool().await.unwrap();
        let service = service(pool);

        let result = service
            .browse_category(999, &ListParams::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_browse_region_unknown_id_is_none() {
        let pool = create_test_pool().await.unwrap();
        let service = service(pool);

        let result = service
            .browse_region(999, &ListParams::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
