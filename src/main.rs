use std::{process, sync::Arc};

use rasteh::{
    application::{
        brands::BrandService,
        categories::CategoryService,
        comments::{CommentService, LikeService},
        error::AppError,
        products::{ProductItemService, ProductMediaService, ProductService},
        repos::{
            AttributesRepo, BrandsRepo, CategoriesRepo, CommentsRepo, LikesRepo,
            ProductItemsRepo, ProductMediaRepo, ProductsRepo, UsersRepo,
        },
        users::UserService,
    },
    cache::{CacheConfig, CacheReader, Invalidator, MemoryStore},
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AppState},
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli().map_err(|err| {
        AppError::from(InfraError::configuration(format!(
            "failed to load configuration: {err}"
        )))
    })?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let pool = connect(&settings).await?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;
    info!("migrations applied");
    Ok(())
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let pool = connect(&settings).await?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    let repositories = Arc::new(PostgresRepositories::new(pool));
    let state = build_state(repositories, &settings);

    let router = http::build_router(state);
    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::Io(err)))?;

    info!(addr = %settings.server.addr, "catalog server listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::from(InfraError::Io(err)))?;

    Ok(())
}

async fn connect(settings: &config::Settings) -> Result<sqlx::PgPool, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))?;

    PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))
}

fn build_state(repositories: Arc<PostgresRepositories>, settings: &config::Settings) -> AppState {
    let brands_repo: Arc<dyn BrandsRepo> = repositories.clone();
    let categories_repo: Arc<dyn CategoriesRepo> = repositories.clone();
    let attributes_repo: Arc<dyn AttributesRepo> = repositories.clone();
    let products_repo: Arc<dyn ProductsRepo> = repositories.clone();
    let items_repo: Arc<dyn ProductItemsRepo> = repositories.clone();
    let media_repo: Arc<dyn ProductMediaRepo> = repositories.clone();
    let comments_repo: Arc<dyn CommentsRepo> = repositories.clone();
    let likes_repo: Arc<dyn LikesRepo> = repositories.clone();
    let users_repo: Arc<dyn UsersRepo> = repositories.clone();

    let cache_config = CacheConfig::from(&settings.cache);
    let store = Arc::new(MemoryStore::new());
    let cache = CacheReader::new(store.clone(), cache_config.clone());
    let invalidator = Invalidator::new(store, cache_config);

    AppState {
        brands: BrandService::new(brands_repo, cache.clone(), invalidator.clone()),
        categories: CategoryService::new(
            categories_repo,
            attributes_repo,
            cache.clone(),
            invalidator.clone(),
        ),
        products: ProductService::new(
            products_repo.clone(),
            items_repo.clone(),
            repositories.clone(),
            cache.clone(),
            invalidator.clone(),
        ),
        items: ProductItemService::new(
            items_repo,
            products_repo.clone(),
            cache.clone(),
            invalidator.clone(),
        ),
        media: ProductMediaService::new(media_repo, products_repo.clone(), invalidator.clone()),
        comments: CommentService::new(
            comments_repo.clone(),
            products_repo,
            users_repo.clone(),
            cache.clone(),
            invalidator.clone(),
        ),
        likes: LikeService::new(likes_repo, comments_repo, invalidator.clone()),
        users: UserService::new(users_repo, cache, invalidator),
        db: repositories,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => error!(error = %err, "failed to install terminate handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("shutdown signal received");
}
