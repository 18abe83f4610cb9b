use mealdesk::{
    application::{error::AppError, feedback::Toast},
    config::UploadArgs,
    infra::uploads::Uploader,
};
use serde_json::json;

use super::Ctx;
use super::print::{print_json, toast};

pub async fn handle(ctx: &Ctx, args: UploadArgs) -> Result<(), AppError> {
    let url = Uploader::new(ctx.client().clone())
        .upload_path(&args.file)
        .await?;
    print_json(&json!({ "url": url }))?;
    toast(&Toast::success("File uploaded"));
    Ok(())
}
