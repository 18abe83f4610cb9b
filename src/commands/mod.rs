//! Subcommand handlers of the operator binary.

mod content;
mod io;
mod pos;
mod print;
mod resources;
mod session;
mod upload;

use mealdesk::{
    application::{
        error::AppError,
        resources::{
            Customers, Expenses, Faqs, Locations, MealPlans, Menus, MoreOptions, Orders, Roles,
            StaffMembers, Subscriptions,
        },
    },
    cache::{CacheConfig, ResourceCache},
    config::{Command, MealPlanAction, OrderAction, Settings, SubscriptionAction},
    infra::{auth::TokenStore, rest::ApiClient},
};

/// Everything a handler needs, built once per run.
pub struct Ctx {
    pub cache: ResourceCache,
    pub tokens: TokenStore,
    pub denominations: Vec<i64>,
}

impl Ctx {
    pub fn build(settings: &Settings) -> Result<Self, AppError> {
        let tokens = match (&settings.auth.token, &settings.auth.session_file) {
            (Some(token), _) => TokenStore::with_token(token.clone()),
            (None, Some(path)) => TokenStore::persistent(path)?,
            (None, None) => TokenStore::in_memory(),
        };
        let client = ApiClient::new(&settings.api, tokens.clone())?;
        let cache = ResourceCache::new(client, CacheConfig::from(&settings.cache));
        Ok(Self {
            cache,
            tokens,
            denominations: settings.pos.denominations.clone(),
        })
    }

    pub fn client(&self) -> &ApiClient {
        self.cache.client()
    }
}

pub async fn dispatch(ctx: &Ctx, command: Command) -> Result<(), AppError> {
    match command {
        Command::Login(args) => session::login(ctx, args).await,
        Command::Logout => session::logout(ctx),
        Command::Whoami => session::whoami(ctx),
        Command::MealPlans(args) => match args.action {
            MealPlanAction::Crud(action) => resources::handle::<MealPlans>(ctx, action).await,
            MealPlanAction::ToggleStatus { id } => resources::toggle_meal_plan(ctx, id).await,
        },
        Command::Menus(args) => resources::handle::<Menus>(ctx, args.action).await,
        Command::MoreOptions(args) => resources::handle::<MoreOptions>(ctx, args.action).await,
        Command::Customers(args) => resources::handle::<Customers>(ctx, args.action).await,
        Command::Staff(args) => resources::handle::<StaffMembers>(ctx, args.action).await,
        Command::Roles(args) => resources::handle::<Roles>(ctx, args.action).await,
        Command::Expenses(args) => resources::handle::<Expenses>(ctx, args.action).await,
        Command::Subscriptions(args) => match args.action {
            SubscriptionAction::Crud(action) => {
                resources::handle::<Subscriptions>(ctx, action).await
            }
            SubscriptionAction::SetStatus { id, status } => {
                resources::set_subscription_status(ctx, id, status.into()).await
            }
        },
        Command::Faqs(args) => resources::handle::<Faqs>(ctx, args.action).await,
        Command::Locations(args) => resources::handle::<Locations>(ctx, args.action).await,
        Command::Orders(args) => match args.action {
            OrderAction::Crud(action) => resources::handle::<Orders>(ctx, action).await,
            OrderAction::SetStatus { id, status } => {
                resources::set_order_status(ctx, id, status.into()).await
            }
        },
        Command::Content(args) => content::handle(ctx, args.action).await,
        Command::Upload(args) => upload::handle(ctx, args).await,
        Command::Pos(args) => pos::handle(ctx, args.action),
    }
}
