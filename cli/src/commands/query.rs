use anyhow::Result;
use osmview::{Explorer, MemSource};

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::QueryArgs) -> Result<()> {
    let config = super::load_config(cli)?;
    let (selection, view) = super::selection(&args.selection, &config)?;

    // Only the request is needed; no rows are fetched.
    let explorer = Explorer::new(MemSource::new(), config);
    let request = explorer.request(&view, &selection)?;
    if cli.verbose > 0 { eprintln!("[query] bbox={:?}", request.bbox.to_array()); }

    println!("{}", request.to_sql());
    Ok(())
}
