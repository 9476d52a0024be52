//! Villarent - a holiday rental listing and travel article system

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use villarent::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{
            SqlxArticleRepository, SqlxCategoryRepository, SqlxCommentRepository,
            SqlxPropertyRepository, SqlxRegionRepository,
        },
    },
    services::{
        ArticleService, CommentService, FormCache, Mailer, PropertySearchService,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "villarent=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Villarent...");

    // Load configuration
    let config = Config::load(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected");

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Create repositories
    let property_repo = Arc::new(SqlxPropertyRepository::new(pool.clone()));
    let article_repo = Arc::new(SqlxArticleRepository::new(pool.clone()));
    let category_repo = Arc::new(SqlxCategoryRepository::new(pool.clone()));
    let region_repo = Arc::new(SqlxRegionRepository::new(pool.clone()));
    let comment_repo = Arc::new(SqlxCommentRepository::new(pool.clone()));

    // Outbound mail is optional; without an SMTP host the notification
    // fan-out is skipped
    let mailer = Mailer::from_config(&config.smtp, &config.site)?.map(Arc::new);
    if mailer.is_some() {
        tracing::info!("SMTP mailer configured");
    } else {
        tracing::info!("No SMTP host configured, comment notifications disabled");
    }

    // Initialize services
    let form_cache = Arc::new(FormCache::new());
    let property_search = Arc::new(PropertySearchService::new(property_repo.clone()));
    let article_service = Arc::new(ArticleService::new(
        article_repo.clone(),
        category_repo,
        region_repo.clone(),
    ));
    let comment_service = Arc::new(CommentService::new(
        comment_repo,
        article_repo,
        mailer,
        form_cache.clone(),
        config.site.base_url.clone(),
    ));

    // Build application state
    let state = AppState {
        property_search,
        property_repo,
        article_service,
        comment_service,
        region_repo,
        site: Arc::new(config.site.clone()),
    };

    // Expire stale cached form data (runs every 5 minutes)
    {
        let cache = form_cache.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(300));
            loop {
                interval.tick().await;
                cache.cleanup().await;
            }
        });
    }

    // Build router
    let app = api::build_router(state, &config.server.cors_origin)?;

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
