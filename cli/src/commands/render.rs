use anyhow::{bail, Context, Result};
use osmview::{read_rows, CachedSource, Explorer, MemSource, Redraw};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::RenderArgs) -> Result<()> {
    let config = super::load_config(cli)?;
    let (selection, view) = super::selection(&args.selection, &config)?;

    if cli.verbose > 0 { eprintln!("[render] loading rows from {}", args.rows.display()); }
    let rows = read_rows(&args.rows)?;
    if cli.verbose > 0 { eprintln!("[render] {} rows into {} table", rows.len(), selection.table); }

    let source = MemSource::new().with_table(selection.table, rows);
    let source = CachedSource::new(source, config.cache_capacity)?.with_verbose(cli.verbose);
    let mut explorer = Explorer::new(source, config).with_verbose(cli.verbose);

    let collection = match explorer.redraw(&view, &selection)? {
        Redraw::Updated(collection) => collection,
        Redraw::Unchanged => bail!("[render] nothing to draw"),
    };
    let text = collection.to_json_string()?;

    match &args.output {
        Some(path) => {
            if cli.verbose > 0 { eprintln!("[render] writing {} features to {}", collection.len(), path.display()); }
            std::fs::write(path, text)
                .with_context(|| format!("[render] Failed to write {}", path.display()))?;
        }
        None => println!("{text}"),
    }
    Ok(())
}
