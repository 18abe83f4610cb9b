use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, builder::BoolishValueParser};
use mealdesk_api_types::content::ContentSlug;
use mealdesk_api_types::finance::SubscriptionStatus;
use mealdesk_api_types::orders::OrderStatus;

/// Command-line arguments for the Mealdesk binary.
#[derive(Debug, Parser)]
#[command(name = "mealdesk", version, about = "Mealdesk back-office client")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "MEALDESK_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the REST API base URL.
    #[arg(long = "api-base-url", global = true, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Override the request timeout.
    #[arg(long = "api-timeout-seconds", global = true, value_name = "SECONDS")]
    pub api_timeout_seconds: Option<u64>,

    /// Override where the signed-in session is stored.
    #[arg(long = "session-file", global = true, value_name = "PATH")]
    pub session_file: Option<PathBuf>,

    /// Bearer token from the environment; takes precedence over the session file.
    #[arg(long = "token", hide = true, env = "MEALDESK_TOKEN")]
    pub token: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        global = true,
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override how long unused cache entries are kept (0 keeps them forever).
    #[arg(long = "cache-keep-unused-seconds", global = true, value_name = "SECONDS")]
    pub cache_keep_unused_seconds: Option<u64>,

    /// Override the cache garbage collection cadence.
    #[arg(long = "cache-gc-interval-seconds", global = true, value_name = "SECONDS")]
    pub cache_gc_interval_seconds: Option<u64>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Sign in and store the session token.
    Login(LoginArgs),
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Meal plan management.
    #[command(name = "meal-plans")]
    MealPlans(MealPlansArgs),
    /// Menu management.
    Menus(ResourceArgs),
    /// Add-on options shown on the POS.
    #[command(name = "more-options")]
    MoreOptions(ResourceArgs),
    /// Customer management.
    Customers(ResourceArgs),
    /// Staff management.
    Staff(ResourceArgs),
    /// Staff role management.
    Roles(ResourceArgs),
    /// Expense tracking.
    Expenses(ResourceArgs),
    /// Meal plan subscriptions.
    Subscriptions(SubscriptionsArgs),
    /// Frequently asked questions.
    Faqs(ResourceArgs),
    /// Restaurant locations.
    Locations(ResourceArgs),
    /// POS orders.
    Orders(OrdersArgs),
    /// Static content pages.
    Content(ContentArgs),
    /// Upload a single file and print its URL.
    Upload(UploadArgs),
    /// Point-of-sale utilities.
    Pos(PosArgs),
}

#[derive(Debug, Args, Clone)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    /// File holding the password (takes precedence over the environment).
    #[arg(long = "password-file", value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub password_file: Option<PathBuf>,

    /// Password from the environment (no CLI flag to keep it out of shell history).
    #[arg(long = "password", hide = true, env = "MEALDESK_PASSWORD")]
    pub password_env: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub action: ResourceAction,
}

/// Operations every resource supports.
#[derive(Debug, Subcommand, Clone)]
pub enum ResourceAction {
    /// List records.
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Fetch one record by id.
    Get { id: String },
    /// Create a record from a JSON file.
    Create {
        #[arg(long, value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Replace a record from a JSON file.
    Update {
        id: String,
        #[arg(long, value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Delete a record.
    Delete { id: String },
}

#[derive(Debug, Args, Clone)]
pub struct MealPlansArgs {
    #[command(subcommand)]
    pub action: MealPlanAction,
}

#[derive(Debug, Subcommand, Clone)]
pub enum MealPlanAction {
    #[command(flatten)]
    Crud(ResourceAction),
    /// Flip a meal plan between active and inactive.
    ToggleStatus { id: String },
}

#[derive(Debug, Args, Clone)]
pub struct SubscriptionsArgs {
    #[command(subcommand)]
    pub action: SubscriptionAction,
}

#[derive(Debug, Subcommand, Clone)]
pub enum SubscriptionAction {
    #[command(flatten)]
    Crud(ResourceAction),
    /// Change a subscription's status.
    SetStatus {
        id: String,
        status: SubscriptionStatusArg,
    },
}

#[derive(Debug, Args, Clone)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub action: OrderAction,
}

#[derive(Debug, Subcommand, Clone)]
pub enum OrderAction {
    #[command(flatten)]
    Crud(ResourceAction),
    /// Move an order to another status.
    SetStatus { id: String, status: OrderStatusArg },
}

#[derive(Debug, Args, Clone)]
pub struct ContentArgs {
    #[command(subcommand)]
    pub action: ContentAction,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ContentAction {
    /// Print a content page (empty if it was never written).
    Get {
        /// privacy-policy | terms-and-conditions | about-us | refund-policy
        page: ContentSlug,
    },
    /// Save a content page from a JSON or text file.
    Save {
        page: ContentSlug,
        #[arg(long, value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Page title; defaults to the current one.
        #[arg(long)]
        title: Option<String>,
    },
}

#[derive(Debug, Args, Clone)]
pub struct UploadArgs {
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct PosArgs {
    #[command(subcommand)]
    pub action: PosAction,
}

#[derive(Debug, Subcommand, Clone)]
pub enum PosAction {
    /// Count the cash drawer and compare it with the expected takings.
    ShiftClose {
        /// Denomination count in minor units, e.g. `500=3`.
        #[arg(long = "count", value_name = "VALUE=N")]
        counts: Vec<String>,
        /// Expected drawer total in minor units.
        #[arg(long)]
        expected: i64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SubscriptionStatusArg {
    Active,
    Paused,
    Expired,
    Cancelled,
}

impl From<SubscriptionStatusArg> for SubscriptionStatus {
    fn from(arg: SubscriptionStatusArg) -> Self {
        match arg {
            SubscriptionStatusArg::Active => SubscriptionStatus::Active,
            SubscriptionStatusArg::Paused => SubscriptionStatus::Paused,
            SubscriptionStatusArg::Expired => SubscriptionStatus::Expired,
            SubscriptionStatusArg::Cancelled => SubscriptionStatus::Cancelled,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OrderStatusArg {
    Pending,
    Preparing,
    Completed,
    Cancelled,
}

impl From<OrderStatusArg> for OrderStatus {
    fn from(arg: OrderStatusArg) -> Self {
        match arg {
            OrderStatusArg::Pending => OrderStatus::Pending,
            OrderStatusArg::Preparing => OrderStatus::Preparing,
            OrderStatusArg::Completed => OrderStatus::Completed,
            OrderStatusArg::Cancelled => OrderStatus::Cancelled,
        }
    }
}
