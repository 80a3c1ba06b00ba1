use super::args::{Cli, Commands};
use super::handlers::{self, HandlerContext};
use crate::config::Config;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.display.default_format);
    let ctx = HandlerContext::new(format, config);

    match cli.command {
        Commands::Show { file, view } => handlers::show::handle(&ctx, &file, view),

        Commands::Validate { file, strict } => handlers::validate::handle(&ctx, &file, strict),

        Commands::Move {
            file,
            item,
            to,
            property,
        } => handlers::move_item::handle(&ctx, &file, item, to, property),

        Commands::View { command } => handlers::view::handle(&ctx, command),

        Commands::Property { command } => handlers::property::handle(&ctx, command),
    }
}
