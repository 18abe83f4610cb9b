use mealdesk::{
    application::{
        error::AppError,
        resources::{GetContent, SaveContent},
    },
    config::ContentAction,
};
use mealdesk_api_types::content::{ContentPageDraft, ContentSlug};

use super::Ctx;
use super::io::read_text;
use super::resources::{read, write};

pub async fn handle(ctx: &Ctx, action: ContentAction) -> Result<(), AppError> {
    match action {
        ContentAction::Get { page } => read(ctx, GetContent::new(page)).await,
        ContentAction::Save { page, file, title } => {
            let raw = read_text(&file)?;
            let mut draft = parse_draft(&raw);
            if title.is_some() {
                draft.title = title;
            } else if draft.title.is_none() {
                draft.title = current_title(ctx, page).await?;
            }
            write(ctx, SaveContent::new(page, draft), "Page saved").await
        }
    }
}

/// A JSON draft when the file holds one, otherwise the text is the body.
fn parse_draft(raw: &str) -> ContentPageDraft {
    serde_json::from_str(raw).unwrap_or_else(|_| ContentPageDraft {
        title: None,
        content: raw.to_string(),
    })
}

async fn current_title(ctx: &Ctx, page: ContentSlug) -> Result<Option<String>, AppError> {
    let current = ctx.cache.query(GetContent::new(page)).await.into_result()?;
    Ok(current.and_then(|existing| existing.title.clone()))
}
