use anyhow::Result;
use osmview::{normalize_with_pad, LatLng, Viewport};
use serde_json::json;

pub fn run(cli: &crate::cli::Cli, args: &crate::cli::BboxArgs) -> Result<()> {
    let config = super::load_config(cli)?;
    let round_to = args.round_to.unwrap_or(config.round_to);
    let pad_digits = config.pad_digits.unwrap_or(round_to);

    let viewport = Viewport::new(LatLng::new(args.south, args.west), LatLng::new(args.north, args.east));
    let bbox = normalize_with_pad(&viewport, round_to, pad_digits)?;
    if cli.verbose > 0 { eprintln!("[bbox] round_to={round_to} pad_digits={pad_digits}"); }

    let out = json!({ "bbox": bbox.to_array(), "wkt": bbox.to_wkt() });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
