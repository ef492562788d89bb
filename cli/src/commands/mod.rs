pub mod bbox;
pub mod query;
pub mod render;

use anyhow::{Context, Result};
use osmview::{Config, Selection, ViewState, Viewport};

use crate::cli::{Cli, SelectionArgs};

/// Config from `--config`, or the defaults.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => {
            if cli.verbose > 0 { eprintln!("[config] loading {}", path.display()); }
            Config::from_path(path)
        }
        None => Ok(Config::default()),
    }
}

/// Sidebar selection and view state from command-line arguments.
pub(crate) fn selection(args: &SelectionArgs, config: &Config) -> Result<(Selection, ViewState)> {
    let selection = Selection {
        table: args.table.parse()?,
        column: args.column.to_ascii_lowercase(),
        tags: args.tags.clone(),
        limit: args.limit.unwrap_or(config.row_limit),
    };
    let mut view = ViewState::default();
    if let Some(bounds) = &args.bounds {
        let viewport = Viewport::from_json_str(bounds).context("[cli] Invalid --bounds")?;
        view.center = viewport.center();
        view.bounds = Some(viewport);
    }
    Ok((selection, view))
}
