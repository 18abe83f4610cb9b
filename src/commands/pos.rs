use mealdesk::{
    application::{error::AppError, feedback::Toast},
    config::PosAction,
    pos::ShiftCount,
};

use super::Ctx;
use super::print::{print_json, toast};

pub fn handle(ctx: &Ctx, action: PosAction) -> Result<(), AppError> {
    match action {
        PosAction::ShiftClose { counts, expected } => {
            let count = ShiftCount::from_entries(&ctx.denominations, &counts)?;
            let summary = count.close(expected)?;
            print_json(&summary)?;
            let text = if summary.is_balanced() {
                "Drawer balanced".to_string()
            } else {
                format!("Drawer off by {}", summary.variance)
            };
            toast(&Toast::success(text));
            Ok(())
        }
    }
}
