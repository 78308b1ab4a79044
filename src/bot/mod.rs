pub mod handlers;
pub mod menu;
pub mod utils;

use teloxide::{
    dispatching::UpdateHandler,
    prelude::*,
};

use handlers::Command;

pub fn init(token: String) -> Bot {
    Bot::new(token)
}

pub fn schema() -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handlers::handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(dptree::endpoint(|update: Update| async move {
            warn!("Unhandled update: {:?}", update.id);
            Ok::<(), anyhow::Error>(())
        }))
}
