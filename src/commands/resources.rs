use mealdesk::{
    application::{
        error::AppError,
        feedback::Toast,
        resources::{
            Create, Delete, Get, List, ListParams, Resource, SetOrderStatus,
            SetSubscriptionStatus, ToggleMealPlanStatus, Update,
        },
    },
    cache::{Mutation, Query},
    config::ResourceAction,
};
use mealdesk_api_types::{finance::SubscriptionStatus, orders::OrderStatus};
use serde::Serialize;

use super::Ctx;
use super::io::read_json;
use super::print::{print_json, toast};

pub async fn handle<R: Resource>(ctx: &Ctx, action: ResourceAction) -> Result<(), AppError> {
    match action {
        ResourceAction::List {
            page,
            limit,
            search,
        } => {
            let params = ListParams {
                page,
                limit,
                search,
            };
            read(ctx, List::<R>::new(params)).await
        }
        ResourceAction::Get { id } => read(ctx, Get::<R>::new(id)).await,
        ResourceAction::Create { file } => {
            let draft: R::Draft = read_json(&file)?;
            write(ctx, Create::<R>::new(draft), "Created").await
        }
        ResourceAction::Update { id, file } => {
            let draft: R::Draft = read_json(&file)?;
            write(ctx, Update::<R>::new(id, draft), "Updated").await
        }
        ResourceAction::Delete { id } => write(ctx, Delete::<R>::new(id), "Deleted").await,
    }
}

pub async fn toggle_meal_plan(ctx: &Ctx, id: String) -> Result<(), AppError> {
    write(ctx, ToggleMealPlanStatus { id }, "Status updated").await
}

pub async fn set_subscription_status(
    ctx: &Ctx,
    id: String,
    status: SubscriptionStatus,
) -> Result<(), AppError> {
    write(ctx, SetSubscriptionStatus { id, status }, "Status updated").await
}

pub async fn set_order_status(ctx: &Ctx, id: String, status: OrderStatus) -> Result<(), AppError> {
    write(ctx, SetOrderStatus { id, status }, "Status updated").await
}

/// Run a query through the cache and print its data (`null` when absent).
pub async fn read<Q>(ctx: &Ctx, query: Q) -> Result<(), AppError>
where
    Q: Query,
    Q::Output: Serialize,
{
    let data = ctx.cache.query(query).await.into_result()?;
    print_json(&data.as_deref())
}

/// Run a mutation, print what the server echoed and raise a toast.
pub async fn write<M>(ctx: &Ctx, mutation: M, default_message: &str) -> Result<(), AppError>
where
    M: Mutation,
    M::Output: Serialize,
{
    let outcome = ctx.cache.mutate(mutation).await?;
    print_json(&outcome.data)?;
    toast(&Toast::for_mutation(&outcome, default_message));
    Ok(())
}
