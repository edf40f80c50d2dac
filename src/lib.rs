pub mod modules;
mod schema;
pub mod shared;

use modules::{
    agenda::{AgendaService, InMemoryAgendaRepository},
    feed::{FeedService, InMemoryFeedRepository},
    group::{GroupService, InMemoryGroupRepository, InMemoryInvitationRepository},
    like::{InMemoryLikeRepository, LikeService},
    notification::{InMemoryNotificationRepository, NotificationService},
    production::{
        infrastructure::{InMemoryProductionRepository, ProductionRepositoryImpl},
        ProductionRepository, ProductionService,
    },
    rating::{
        AggregateStore, RateProductionHandler, RatingLedger, RatingReconciler,
        ReconciliationWorker, UserRatingStore,
    },
    review::{
        InMemoryReactionRepository, InMemoryReviewRepository, ReviewRepository,
        ReviewRepositoryImpl, ReviewService,
    },
    search::SearchAggregator,
    social::{InMemoryFriendshipRepository, SocialService},
    user::{InMemoryUserRepository, UserService},
    venue::{InMemoryVenueRepository, VenueService},
};
use shared::infrastructure::AppConfig;
use shared::utils::init_logger;
use shared::Database;
use std::sync::Arc;

/// Storage seams that differ between the in-memory and Postgres setups
struct RatingStores {
    productions: Arc<dyn ProductionRepository>,
    aggregates: Arc<dyn AggregateStore>,
    reviews: Arc<dyn ReviewRepository>,
    user_ratings: Arc<dyn UserRatingStore>,
    ledger: Arc<dyn RatingLedger>,
}

/// Every service of the application, wired once at startup
pub struct AppContainer {
    pub config: AppConfig,
    pub productions: Arc<ProductionService>,
    pub rate_production: Arc<RateProductionHandler>,
    pub reviews: Arc<ReviewService>,
    pub likes: Arc<LikeService>,
    pub users: Arc<UserService>,
    pub social: Arc<SocialService>,
    pub notifications: Arc<NotificationService>,
    pub feed: Arc<FeedService>,
    pub groups: Arc<GroupService>,
    pub agenda: Arc<AgendaService>,
    pub venues: Arc<VenueService>,
    pub search: Arc<SearchAggregator>,
    pub reconciler: Arc<RatingReconciler>,
}

impl AppContainer {
    pub fn in_memory() -> Self {
        Self::in_memory_with(AppConfig::default())
    }

    pub fn in_memory_with(config: AppConfig) -> Self {
        let productions = Arc::new(InMemoryProductionRepository::new());
        let reviews = Arc::new(InMemoryReviewRepository::new());

        Self::assemble(
            config,
            RatingStores {
                productions: productions.clone(),
                aggregates: productions,
                reviews: reviews.clone(),
                user_ratings: reviews.clone(),
                ledger: reviews,
            },
        )
    }

    /// Productions and reviews live in Postgres; the remaining stores stay in memory
    pub fn with_database(db: Arc<Database>, config: AppConfig) -> Self {
        let productions = Arc::new(ProductionRepositoryImpl::new(Arc::clone(&db)));
        let reviews = Arc::new(ReviewRepositoryImpl::new(db));

        Self::assemble(
            config,
            RatingStores {
                productions: productions.clone(),
                aggregates: productions,
                reviews: reviews.clone(),
                user_ratings: reviews.clone(),
                ledger: reviews,
            },
        )
    }

    fn assemble(config: AppConfig, stores: RatingStores) -> Self {
        let notifications = Arc::new(NotificationService::new(Arc::new(
            InMemoryNotificationRepository::new(),
        )));
        let social = Arc::new(SocialService::new(
            Arc::new(InMemoryFriendshipRepository::new()),
            Arc::clone(&notifications),
        ));
        let feed = Arc::new(FeedService::new(
            Arc::new(InMemoryFeedRepository::new()),
            Arc::clone(&social),
        ));
        let users = Arc::new(UserService::new(Arc::new(InMemoryUserRepository::new())));
        let groups = Arc::new(GroupService::new(
            Arc::new(InMemoryGroupRepository::new()),
            Arc::new(InMemoryInvitationRepository::new()),
        ));
        let productions = Arc::new(ProductionService::new(Arc::clone(&stores.productions)));

        let rate_production = Arc::new(RateProductionHandler::new(
            Arc::clone(&stores.aggregates),
            stores.user_ratings,
            config.rating_retry.clone(),
        ));
        let reconciler = Arc::new(RatingReconciler::new(
            stores.aggregates,
            stores.ledger,
            Arc::clone(&stores.productions),
            &config.reconciliation,
        ));
        let reviews = Arc::new(ReviewService::new(
            stores.reviews,
            Arc::new(InMemoryReactionRepository::new()),
            Arc::clone(&stores.productions),
            Arc::clone(&feed),
            Arc::clone(&notifications),
        ));
        let likes = Arc::new(LikeService::new(
            Arc::new(InMemoryLikeRepository::new()),
            Arc::clone(&stores.productions),
        ));
        let agenda = Arc::new(AgendaService::new(
            Arc::new(InMemoryAgendaRepository::new()),
            stores.productions,
            Arc::clone(&groups),
            Arc::clone(&notifications),
        ));
        let venues = Arc::new(VenueService::new(Arc::new(InMemoryVenueRepository::new())));
        let search = Arc::new(SearchAggregator::new(
            Arc::clone(&productions),
            Arc::clone(&users),
            Arc::clone(&groups),
            Arc::clone(&social),
        ));

        Self {
            config,
            productions,
            rate_production,
            reviews,
            likes,
            users,
            social,
            notifications,
            feed,
            groups,
            agenda,
            venues,
            search,
            reconciler,
        }
    }

    /// Background reconciliation using the configured interval and sample size
    pub fn reconciliation_worker(&self) -> Arc<ReconciliationWorker> {
        Arc::new(ReconciliationWorker::new(
            Arc::clone(&self.reconciler),
            &self.config.reconciliation,
        ))
    }
}

/// Load configuration, start logging and build the container.
///
/// With `DATABASE_URL` set the pool is created and pending migrations run first.
pub fn bootstrap() -> anyhow::Result<AppContainer> {
    let config = AppConfig::from_env()?;
    init_logger();

    match config.database_url.clone() {
        Some(url) => {
            let db = Arc::new(Database::connect(&url)?);
            db.run_migrations()?;
            crate::log_info!("Using Postgres storage");
            Ok(AppContainer::with_database(db, config))
        }
        None => {
            crate::log_warn!("DATABASE_URL not set, using in-memory storage");
            Ok(AppContainer::in_memory_with(config))
        }
    }
}
